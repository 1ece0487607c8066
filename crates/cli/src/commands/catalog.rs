use anyhow::{Context, Result};
use gamesweep_core::db::CatalogContext;

use crate::commands::util::{load_settings, resolve_layout};

/// List every entry in the catalog store.
pub fn list_command(
    lutris_database: Option<&str>,
    lutris_yaml_dir: Option<&str>,
    json: bool,
    settings_file: Option<&str>,
) -> Result<()> {
    let settings = load_settings(settings_file)?;
    let layout = resolve_layout(&settings, lutris_database, lutris_yaml_dir)?;
    let ctx = CatalogContext::open(layout.clone()).with_context(|| {
        format!("Failed to open catalog at {}", layout.store_path.display())
    })?;

    let entries = ctx.db.list_entries().context("Failed to list catalog entries")?;

    if json {
        let serialized = serde_json::to_string_pretty(&entries)
            .context("Failed to serialize entries to JSON")?;
        println!("{serialized}");
        return Ok(());
    }

    println!("Games ({}):", entries.len());
    if entries.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for entry in entries {
        let config = ctx.document_path(entry.document_name());
        println!(
            "  - [{}] {} [{}/{}] slug={} config={}{}",
            entry.id,
            entry.name,
            entry.platform.as_deref().unwrap_or("-"),
            entry.runner.as_deref().unwrap_or("-"),
            entry.slug,
            config.display(),
            if config.is_file() { "" } else { " (missing)" }
        );
    }
    Ok(())
}
