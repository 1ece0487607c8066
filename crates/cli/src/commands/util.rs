use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use gamesweep_core::db::{CatalogLayout, Settings};
use gamesweep_core::rules::RuleTable;
use tracing::debug;

/// Resolve the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))
}

/// Settings file to read: the explicit path, else the per-user default.
pub fn settings_path(explicit: Option<&str>) -> Option<PathBuf> {
    explicit
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| Settings::default_path(&dir)))
}

/// Load settings. An explicitly named file must exist; the default one is
/// optional.
pub fn load_settings(explicit: Option<&str>) -> Result<Settings> {
    if let Some(path) = explicit {
        if !Path::new(path).is_file() {
            bail!("Settings file does not exist: {path}");
        }
    }
    match settings_path(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "Loading settings");
            Settings::load(&path)
        }
        None => Ok(Settings::default()),
    }
}

/// Rule table from `--rules`, else from settings, else the built-in defaults.
pub fn load_rules(explicit: Option<&str>, settings: &Settings) -> Result<RuleTable> {
    match explicit.or(settings.rules_path.as_deref()) {
        Some(path) => {
            debug!(path, "Loading rule table");
            RuleTable::load(Path::new(path))
                .with_context(|| format!("Failed to load rule table from {path}"))
        }
        None => Ok(RuleTable::default()),
    }
}

/// Catalog layout from flags, settings, and Lutris' defaults, in that order.
pub fn resolve_layout(
    settings: &Settings,
    store_path: Option<&str>,
    config_dir: Option<&str>,
) -> Result<CatalogLayout> {
    let needs_home = store_path.or(settings.store_path.as_deref()).is_none()
        || config_dir.or(settings.config_dir.as_deref()).is_none();
    let home = if needs_home { home_dir()? } else { PathBuf::new() };
    Ok(settings.resolve_layout(store_path, config_dir, &home))
}
