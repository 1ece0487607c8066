//! Rule table driving classification.
//!
//! The table is plain data. Built-in defaults cover common ROM extensions,
//! native executable formats, and the usual helper programs shipped next to
//! games; a YAML or JSON file can replace any subset of it at runtime so new
//! exclusions need no rebuild. Fields missing from a file keep their defaults.

mod defaults;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for loading rule tables.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to read rule table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rule table {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported rule table format for {} (expected .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to serialize rule table: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Which key of the `game` block carries the artifact path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// `exe` plus `working_dir`.
    Exe,
    /// `main_file`.
    #[default]
    MainFile,
}

/// Maps content descriptors to a platform and runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRule {
    /// Descriptor prefixes this rule matches.
    pub prefixes: Vec<String>,
    pub platform: String,
    pub runner: String,
    /// Runner is a compatibility layer (enables the placeholder-name rule).
    #[serde(default)]
    pub compat_layer: bool,
    #[serde(default)]
    pub payload: PayloadKind,
}

impl ContentRule {
    pub fn matches(&self, descriptor: &str) -> bool {
        self.prefixes.iter().any(|prefix| descriptor.starts_with(prefix.as_str()))
    }
}

/// Platform and runner for an extension that identifies its format on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRule {
    pub platform: String,
    pub runner: String,
    /// Machine discriminator for multi-system emulators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    /// Extra keys for the `game` block (e.g. a libretro core).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl ExtensionRule {
    pub fn new(platform: impl Into<String>, runner: impl Into<String>) -> Self {
        Self { platform: platform.into(), runner: runner.into(), machine: None, options: BTreeMap::new() }
    }

    pub fn machine(
        platform: impl Into<String>,
        runner: impl Into<String>,
        machine: impl Into<String>,
    ) -> Self {
        Self { machine: Some(machine.into()), ..Self::new(platform, runner) }
    }

    /// Builder-style helper to add one `game` option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Immutable per-run classification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTable {
    /// Lowercase extensions that are never artifacts.
    pub ignored_extensions: BTreeSet<String>,
    /// Execution suffix (without dot) used when matching ignored stems.
    pub executable_suffix: String,
    /// Content descriptor prefixes that are never runnable.
    pub ignored_content_prefixes: Vec<String>,
    /// Lowercase names of helper binaries, without the execution suffix.
    pub ignored_binary_stems: BTreeSet<String>,
    /// Ordered content rules; first match wins.
    pub content_rules: Vec<ContentRule>,
    /// Lowercase extension to rule.
    pub extension_rules: BTreeMap<String, ExtensionRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            ignored_extensions: defaults::ignored_extensions(),
            executable_suffix: "exe".to_string(),
            ignored_content_prefixes: defaults::ignored_content_prefixes(),
            ignored_binary_stems: defaults::ignored_binary_stems(),
            content_rules: defaults::content_rules(),
            extension_rules: defaults::extension_rules(),
        }
    }
}

impl RuleTable {
    /// Load a rule table from a YAML (`.yaml`/`.yml`) or JSON (`.json`) file.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
        let body = fs::read_to_string(path)
            .map_err(|source| RulesError::Io { path: path.to_path_buf(), source })?;
        let parse_err =
            |message: String| RulesError::Parse { path: path.to_path_buf(), message };
        let table: RuleTable = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&body).map_err(|e| parse_err(e.to_string()))?,
            "json" => serde_json::from_str(&body).map_err(|e| parse_err(e.to_string()))?,
            _ => return Err(RulesError::UnsupportedFormat(path.to_path_buf())),
        };
        Ok(table.normalized())
    }

    /// Render the table as YAML, suitable for editing and loading back.
    pub fn to_yaml(&self) -> Result<String, RulesError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Lowercase every case-insensitive key so lookups can compare directly.
    fn normalized(self) -> Self {
        let lower = |s: String| s.trim().trim_start_matches('.').to_ascii_lowercase();
        Self {
            ignored_extensions: self.ignored_extensions.into_iter().map(lower).collect(),
            executable_suffix: lower(self.executable_suffix),
            ignored_binary_stems: self.ignored_binary_stems.into_iter().map(lower).collect(),
            extension_rules: self
                .extension_rules
                .into_iter()
                .map(|(ext, rule)| (lower(ext), rule))
                .collect(),
            ..self
        }
    }

    pub fn is_ignored_extension(&self, ext: &str) -> bool {
        self.ignored_extensions.contains(&ext.to_ascii_lowercase())
    }

    pub fn extension_rule(&self, ext: &str) -> Option<&ExtensionRule> {
        self.extension_rules.get(&ext.to_ascii_lowercase())
    }

    pub fn is_ignored_content(&self, descriptor: &str) -> bool {
        self.ignored_content_prefixes.iter().any(|prefix| descriptor.starts_with(prefix.as_str()))
    }

    /// Whether `file_name` names a helper binary, with or without the
    /// execution suffix.
    pub fn is_ignored_stem(&self, file_name: &str) -> bool {
        let lower = file_name.to_ascii_lowercase();
        self.ignored_binary_stems.contains(&lower)
            || self.strip_executable_suffix(&lower).is_some_and(|stem| self.ignored_binary_stems.contains(stem))
    }

    /// Cheap pre-filter applied before any file is opened: only names carrying
    /// the execution suffix are checked.
    pub fn is_ignored_file_name(&self, file_name: &str) -> bool {
        let lower = file_name.to_ascii_lowercase();
        self.strip_executable_suffix(&lower).is_some_and(|stem| self.ignored_binary_stems.contains(stem))
    }

    /// First content rule matching `descriptor`.
    pub fn content_rule(&self, descriptor: &str) -> Option<&ContentRule> {
        self.content_rules.iter().find(|rule| rule.matches(descriptor))
    }

    fn strip_executable_suffix<'a>(&self, lower_name: &'a str) -> Option<&'a str> {
        if self.executable_suffix.is_empty() {
            return None;
        }
        lower_name
            .strip_suffix(self.executable_suffix.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
    }
}
