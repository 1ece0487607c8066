use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::db::CatalogLayout;

/// Optional user settings, stored as JSON (by default at
/// `~/.config/gamesweep/settings.json`).
///
/// Every field is optional; command-line flags take precedence over values
/// found here, and values found here take precedence over built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the catalog's SQLite store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<String>,
    /// Directory holding configuration documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<String>,
    /// Rule table file (YAML or JSON) replacing the built-in rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_path: Option<String>,
    /// Keep files no content rule recognized.
    #[serde(default)]
    pub include_unknown: bool,
}

impl Settings {
    /// Settings path under a user configuration directory.
    pub fn default_path(config_home: &Path) -> PathBuf {
        config_home.join("gamesweep").join("settings.json")
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings at {}", path.display()))?;
        let settings: Settings =
            serde_json::from_str(&body).context("Failed to parse settings JSON")?;
        Ok(settings)
    }

    /// Resolve the catalog layout: explicit values first, then settings, then
    /// Lutris' defaults under `home`.
    pub fn resolve_layout(
        &self,
        store_path: Option<&str>,
        config_dir: Option<&str>,
        home: &Path,
    ) -> CatalogLayout {
        let defaults = CatalogLayout::lutris_default(home);
        let store_path = store_path
            .or(self.store_path.as_deref())
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);
        let config_dir = config_dir
            .or(self.config_dir.as_deref())
            .map(PathBuf::from)
            .unwrap_or(defaults.config_dir);
        CatalogLayout::new(store_path, config_dir)
    }
}
