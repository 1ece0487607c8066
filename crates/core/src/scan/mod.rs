//! Recursive discovery of candidates under one or more directories.
//!
//! Results are keyed by absolute path, so scanning the same tree twice (or
//! overlapping trees) yields the same set. Per-entry failures are logged and
//! skipped. Symbolic links are followed; a link back to one of its own
//! ancestors is reported by `walkdir` as a loop and skipped like any other
//! unreadable entry.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::classify::{classify, NamingOptions};
use crate::model::CandidateArtifact;
use crate::rules::RuleTable;

/// Candidates keyed by absolute path.
pub type CandidateSet = BTreeMap<PathBuf, CandidateArtifact>;

/// Error type for scans. Only a bad root is fatal.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan directory does not exist or is not a directory: {}", .0.display())]
    MissingRoot(PathBuf),

    #[error("Failed to resolve scan directory {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Options controlling what a scan keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Keep files that no content rule recognized.
    pub include_unknown: bool,
    pub naming: NamingOptions,
}

/// Scan `root` and return every candidate found beneath it.
pub fn scan(root: &Path, rules: &RuleTable, options: &ScanOptions) -> Result<CandidateSet, ScanError> {
    let mut found = CandidateSet::new();
    scan_into(root, rules, options, &mut found)?;
    Ok(found)
}

/// Scan `root`, adding candidates to `found`. Returns how many were added.
pub fn scan_into(
    root: &Path,
    rules: &RuleTable,
    options: &ScanOptions,
    found: &mut CandidateSet,
) -> Result<usize, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }
    let root = root
        .canonicalize()
        .map_err(|source| ScanError::Resolve { path: root.to_path_buf(), source })?;

    let before = found.len();
    for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                match (err.loop_ancestor(), err.path()) {
                    (Some(ancestor), Some(path)) => warn!(
                        path = %path.display(),
                        ancestor = %ancestor.display(),
                        "Skipping symbolic link cycle"
                    ),
                    _ => warn!(error = %err, "Skipping unreadable entry"),
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if rules.is_ignored_file_name(&file_name) {
            debug!(path = %entry.path().display(), "Skipping helper binary by name");
            continue;
        }

        match classify(entry.path(), rules, &options.naming) {
            Some(candidate) if candidate.is_unknown() && !options.include_unknown => {
                debug!(path = %entry.path().display(), "Dropping unknown file");
            }
            Some(candidate) => {
                found.insert(candidate.path.clone(), candidate);
            }
            None => {}
        }
    }

    Ok(found.len() - before)
}
