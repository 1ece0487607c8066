use std::path::{Path, PathBuf};

use crate::document::DOCUMENT_EXTENSION;

/// Where the catalog lives on disk: the record store file and the directory
/// holding one configuration document per entry.
///
/// This is pure path arithmetic; it does *not* touch the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    /// Path to the SQLite record store.
    pub store_path: PathBuf,
    /// Directory of `<slug>.yml` configuration documents.
    pub config_dir: PathBuf,
}

impl CatalogLayout {
    pub fn new(store_path: impl Into<PathBuf>, config_dir: impl Into<PathBuf>) -> Self {
        Self { store_path: store_path.into(), config_dir: config_dir.into() }
    }

    /// Lutris' default locations under a home directory.
    pub fn lutris_default(home: &Path) -> Self {
        Self::new(
            home.join(".local").join("share").join("lutris").join("pga.db"),
            home.join(".config").join("lutris").join("games"),
        )
    }

    /// Path of the configuration document called `name`.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.config_dir.join(format!("{name}.{DOCUMENT_EXTENSION}"))
    }
}
