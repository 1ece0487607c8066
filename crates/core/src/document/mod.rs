//! Per-game configuration documents.
//!
//! Each catalog entry has one YAML document named `<slug>.yml` in the
//! configuration directory. Its shape depends on the runner:
//!
//! ```yaml
//! wine: {}
//! game:
//!   exe: /games/Foo/Foo.exe
//!   working_dir: /games/Foo
//! system: {}
//! ```
//!
//! Emulator runners use `main_file` instead of `exe`/`working_dir`, and
//! multi-system emulators add a `machine` key. This crate only writes these
//! documents and reads back the primary binary path; everything else is left
//! to the launcher that consumes them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// File extension of configuration documents.
pub const DOCUMENT_EXTENSION: &str = "yml";

/// Error type for reading or writing configuration documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to access configuration document {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in configuration document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration document {} has no `game` section", .0.display())]
    MissingGameSection(PathBuf),
}

/// The `game` block of a configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSection {
    /// Executable launched through an exe-style runner (wine, linux).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exe: Option<String>,
    /// Working directory for `exe`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    /// ROM or disc image handed to an emulator runner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_file: Option<String>,
    /// Machine discriminator for multi-system emulators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    /// Any other keys (rule options, user-supplied options, foreign keys).
    #[serde(flatten)]
    pub options: BTreeMap<String, Value>,
}

impl GameSection {
    /// Path of the file this document launches, if it names one.
    pub fn primary_path(&self) -> Option<&str> {
        fn named(field: &Option<String>) -> Option<&str> {
            field.as_deref().map(str::trim).filter(|path| !path.is_empty())
        }
        named(&self.main_file).or_else(|| named(&self.exe))
    }
}

/// A configuration document as written for a new catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    pub runner: String,
    pub game: GameSection,
}

impl ConfigDocument {
    pub fn new(runner: impl Into<String>, game: GameSection) -> Self {
        Self { runner: runner.into(), game }
    }

    /// Render the document as YAML: an empty runner section, the `game`
    /// block, and an empty `system` section.
    pub fn to_yaml(&self) -> Result<String, DocumentError> {
        let mut root = Mapping::new();
        root.insert(Value::from(self.runner.clone()), Value::Mapping(Mapping::new()));
        root.insert(Value::from("game"), serde_yaml::to_value(&self.game)?);
        root.insert(Value::from("system"), Value::Mapping(Mapping::new()));
        Ok(serde_yaml::to_string(&Value::Mapping(root))?)
    }

    /// Write the document to `path`, replacing any existing file.
    pub fn write(&self, path: &Path) -> Result<(), DocumentError> {
        let body = self.to_yaml()?;
        fs::write(path, body)
            .map_err(|source| DocumentError::Io { path: path.to_path_buf(), source })
    }
}

/// Read a document from disk and extract its `game` block.
pub fn read_game_section(path: &Path) -> Result<GameSection, DocumentError> {
    let body = fs::read_to_string(path)
        .map_err(|source| DocumentError::Io { path: path.to_path_buf(), source })?;
    let value: Value = serde_yaml::from_str(&body)?;
    let game = value
        .get("game")
        .filter(|game| game.is_mapping())
        .cloned()
        .ok_or_else(|| DocumentError::MissingGameSection(path.to_path_buf()))?;
    Ok(serde_yaml::from_value(game)?)
}
