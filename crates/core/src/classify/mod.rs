//! Classification of a single file into a catalog candidate.
//!
//! Evaluation order:
//! 1. ignored extension → nothing;
//! 2. extension rule → candidate, without reading the file;
//! 3. content descriptor; ignored descriptor or helper binary → nothing;
//! 4. first matching content rule;
//! 5. otherwise an `Unknown` candidate (callers decide whether to keep it).

pub mod sniff;

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::document::GameSection;
use crate::model::{CandidateArtifact, UNKNOWN_PLATFORM, UNKNOWN_RUNNER};
use crate::rules::{PayloadKind, RuleTable};

/// Name a compatibility-layer binary gets when the real title is the
/// directory it lives in.
const PLACEHOLDER_NAME: &str = "Game";

/// User-controlled naming and document tweaks applied to every candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingOptions {
    /// Substrings removed from file stems when deriving display names.
    pub strip_tokens: Vec<String>,
    /// Extra keys merged into every `game` block.
    pub game_options: BTreeMap<String, String>,
}

/// Platform/runner resolution before the candidate is assembled.
struct Resolution<'a> {
    platform: &'a str,
    runner: &'a str,
    compat_layer: bool,
    payload: PayloadKind,
    machine: Option<&'a str>,
    options: Option<&'a BTreeMap<String, String>>,
}

/// Classify `path`, returning a candidate or `None` when the file is not a
/// game artifact (or cannot be read).
pub fn classify(path: &Path, rules: &RuleTable, naming: &NamingOptions) -> Option<CandidateArtifact> {
    let file_name = path.file_name()?.to_string_lossy();
    let extension = path.extension().map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    if let Some(ext) = extension.as_deref() {
        if rules.is_ignored_extension(ext) {
            return None;
        }
        if let Some(rule) = rules.extension_rule(ext) {
            let resolution = Resolution {
                platform: &rule.platform,
                runner: &rule.runner,
                compat_layer: false,
                payload: PayloadKind::MainFile,
                machine: rule.machine.as_deref(),
                options: Some(&rule.options),
            };
            return Some(build_candidate(path, resolution, naming));
        }
    }

    let descriptor = match sniff::describe(path) {
        Ok(descriptor) => descriptor,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "Skipping unreadable file");
            return None;
        }
    };
    if rules.is_ignored_content(&descriptor) {
        debug!(path = %path.display(), %descriptor, "Ignoring content type");
        return None;
    }
    if rules.is_ignored_stem(&file_name) {
        debug!(path = %path.display(), "Ignoring helper binary");
        return None;
    }

    let resolution = match rules.content_rule(&descriptor) {
        Some(rule) => Resolution {
            platform: &rule.platform,
            runner: &rule.runner,
            compat_layer: rule.compat_layer,
            payload: rule.payload,
            machine: None,
            options: None,
        },
        None => Resolution {
            platform: UNKNOWN_PLATFORM,
            runner: UNKNOWN_RUNNER,
            compat_layer: false,
            payload: PayloadKind::MainFile,
            machine: None,
            options: None,
        },
    };
    debug!(path = %path.display(), %descriptor, platform = resolution.platform, "Classified");
    Some(build_candidate(path, resolution, naming))
}

fn build_candidate(path: &Path, resolution: Resolution<'_>, naming: &NamingOptions) -> CandidateArtifact {
    let mut display_name = display_name(path, &naming.strip_tokens);
    let is_placeholder = path
        .file_stem()
        .is_some_and(|stem| stem.to_string_lossy().eq_ignore_ascii_case(PLACEHOLDER_NAME));
    if resolution.compat_layer && is_placeholder {
        if let Some(parent) = path.parent().and_then(Path::file_name) {
            display_name = parent.to_string_lossy().into_owned();
        }
    }

    let path_str = path.to_string_lossy().into_owned();
    let mut payload = GameSection::default();
    match resolution.payload {
        PayloadKind::Exe => {
            payload.exe = Some(path_str);
            payload.working_dir = path.parent().map(|dir| dir.to_string_lossy().into_owned());
        }
        PayloadKind::MainFile => payload.main_file = Some(path_str),
    }
    payload.machine = resolution.machine.map(str::to_string);
    let options = resolution.options.into_iter().flatten().chain(&naming.game_options);
    for (key, value) in options {
        match key.as_str() {
            "machine" => payload.machine = Some(value.clone()),
            // The artifact path is never overridden by options.
            "exe" | "working_dir" | "main_file" => {}
            _ => {
                payload.options.insert(key.clone(), value.clone().into());
            }
        }
    }

    CandidateArtifact {
        path: path.to_path_buf(),
        display_name,
        platform: resolution.platform.to_string(),
        runner: resolution.runner.to_string(),
        machine: payload.machine.clone(),
        compat_layer: resolution.compat_layer,
        payload,
    }
}

/// File stem with strip tokens removed and whitespace collapsed.
pub fn display_name(path: &Path, strip_tokens: &[String]) -> String {
    let mut name = path
        .file_stem()
        .or_else(|| path.file_name())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    for token in strip_tokens.iter().filter(|t| !t.is_empty()) {
        name = name.replace(token.as_str(), "");
    }
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
