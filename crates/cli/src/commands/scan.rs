use anyhow::{Context, Result};
use clap::Args;
use gamesweep_core::classify::NamingOptions;
use gamesweep_core::scan::{scan_into, CandidateSet, ScanOptions};

use crate::canonicalize_or_current;
use crate::commands::util::{load_rules, load_settings};

/// Arguments of `gamesweep scan`.
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Directory to scan. May be given more than once.
    #[arg(short = 'd', long = "directory", required = true)]
    pub directories: Vec<String>,

    /// Rule table file (YAML or JSON) replacing the built-in rules.
    #[arg(long)]
    pub rules: Option<String>,

    /// Also list files no rule recognized.
    #[arg(long, default_value_t = false)]
    pub include_unknown: bool,

    /// Text to strip from file names when deriving game names.
    #[arg(short = 's', long = "strip-filename")]
    pub strip_filename: Vec<String>,

    /// Emit JSON instead of human-readable text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Classify everything under the given directories without touching the
/// catalog.
pub fn scan_command(args: &ScanArgs, settings_file: Option<&str>) -> Result<()> {
    let settings = load_settings(settings_file)?;
    let rules = load_rules(args.rules.as_deref(), &settings)?;
    let options = ScanOptions {
        include_unknown: args.include_unknown || settings.include_unknown,
        naming: NamingOptions { strip_tokens: args.strip_filename.clone(), ..Default::default() },
    };

    let mut found = CandidateSet::new();
    for dir in &args.directories {
        let root = canonicalize_or_current(dir)?;
        scan_into(&root, &rules, &options, &mut found)
            .with_context(|| format!("Failed to scan {}", root.display()))?;
    }

    if args.json {
        let candidates: Vec<_> = found.values().collect();
        let serialized = serde_json::to_string_pretty(&candidates)
            .context("Failed to serialize candidates to JSON")?;
        println!("{serialized}");
        return Ok(());
    }

    println!("Candidates ({}):", found.len());
    if found.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for candidate in found.values() {
        println!(
            "  - {} [{}/{}] {}",
            candidate.display_name,
            candidate.platform,
            candidate.runner,
            candidate.path.display()
        );
    }
    Ok(())
}
