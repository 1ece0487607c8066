//! Core value types shared by the classifier, scanner, and synchronizer.

mod slug;

pub use slug::{normalize_name, path_hash, slug_for};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::{ConfigDocument, GameSection};

/// Platform assigned when no rule matched the file content.
pub const UNKNOWN_PLATFORM: &str = "Unknown";

/// Runner assigned when no rule matched the file content.
pub const UNKNOWN_RUNNER: &str = "unknown";

/// A file that classified as a potential game executable or ROM.
///
/// Identity is the absolute `path`; everything else is derived from it and the
/// rule table at classification time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateArtifact {
    /// Absolute path of the discovered file.
    pub path: PathBuf,
    /// Human-facing name derived from the file (or parent directory) name.
    pub display_name: String,
    /// Platform label (e.g. "Nintendo NES", "Windows").
    pub platform: String,
    /// Runner identifier the configuration document targets (e.g. "wine").
    pub runner: String,
    /// Machine discriminator for multi-system emulators (e.g. "nes").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    /// Whether the runner is a compatibility layer (wine, dosbox).
    #[serde(default)]
    pub compat_layer: bool,
    /// The `game` block that ends up in the configuration document.
    pub payload: GameSection,
}

impl CandidateArtifact {
    /// True when no content rule matched.
    pub fn is_unknown(&self) -> bool {
        self.runner == UNKNOWN_RUNNER
    }

    /// Catalog slug for this candidate: normalized name plus a path hash.
    pub fn slug(&self) -> String {
        slug_for(&self.display_name, &self.path)
    }

    /// Directory the artifact lives in (recorded as the entry's install directory).
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    /// Configuration document this candidate would be written as.
    pub fn document(&self) -> ConfigDocument {
        ConfigDocument::new(self.runner.clone(), self.payload.clone())
    }
}
