use anyhow::{Context, Result};
use clap::Args;
use gamesweep_core::classify::NamingOptions;
use gamesweep_core::scan::ScanOptions;
use gamesweep_core::sync::{self, CommitStatus, SyncRequest, SyncSummary};

use crate::commands::util::{load_rules, load_settings, resolve_layout};
use crate::{canonicalize_or_current, parse_game_option};

/// Arguments of `gamesweep sync`.
#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    /// Directory to scan for games. May be given more than once.
    #[arg(short = 'd', long = "directory", required = true)]
    pub directories: Vec<String>,

    /// Path to the Lutris database (defaults to ~/.local/share/lutris/pga.db).
    #[arg(long)]
    pub lutris_database: Option<String>,

    /// Directory of Lutris game configs (defaults to ~/.config/lutris/games).
    #[arg(long)]
    pub lutris_yaml_dir: Option<String>,

    /// Show what would change without writing anything.
    #[arg(short = 'n', long = "no-write", default_value_t = false)]
    pub no_write: bool,

    /// Also add files no rule recognized.
    #[arg(long, default_value_t = false)]
    pub include_unknown: bool,

    /// Rule table file (YAML or JSON) replacing the built-in rules.
    #[arg(long)]
    pub rules: Option<String>,

    /// Text to strip from file names when deriving game names.
    #[arg(short = 's', long = "strip-filename")]
    pub strip_filename: Vec<String>,

    /// Extra `key=value` added to every game's config.
    #[arg(short = 'o', long = "game-option", value_parser = parse_game_option)]
    pub game_options: Vec<(String, String)>,

    /// Emit the run summary as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl SyncArgs {
    /// Build the core request, merging flags over settings.
    pub fn to_request(&self, settings_file: Option<&str>) -> Result<SyncRequest> {
        let settings = load_settings(settings_file)?;
        let rules = load_rules(self.rules.as_deref(), &settings)?;
        let layout = resolve_layout(
            &settings,
            self.lutris_database.as_deref(),
            self.lutris_yaml_dir.as_deref(),
        )?;
        let roots = self
            .directories
            .iter()
            .map(|dir| canonicalize_or_current(dir))
            .collect::<Result<Vec<_>>>()?;

        Ok(SyncRequest {
            roots,
            layout,
            rules,
            scan: ScanOptions {
                include_unknown: self.include_unknown || settings.include_unknown,
                naming: NamingOptions {
                    strip_tokens: self.strip_filename.clone(),
                    game_options: self.game_options.iter().cloned().collect(),
                },
            },
            dry_run: self.no_write,
        })
    }
}

/// Scan, prune, and add new games to the catalog.
pub fn sync_command(args: &SyncArgs, settings_file: Option<&str>) -> Result<()> {
    let request = args.to_request(settings_file)?;
    let summary = sync::run(&request).context("Sync failed")?;

    if args.json {
        let serialized =
            serde_json::to_string_pretty(&summary).context("Failed to serialize sync summary")?;
        println!("{serialized}");
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &SyncSummary) {
    for stale in &summary.load.stale {
        let verb = if summary.dry_run {
            "Would remove"
        } else if stale.removed {
            "Removed"
        } else {
            "Failed to remove"
        };
        println!(
            "{verb} {} ({}): {} no longer exists",
            stale.entry.name,
            stale.entry.slug,
            stale.binary.display()
        );
    }

    for outcome in &summary.commit.outcomes {
        let entry = &outcome.entry;
        match &outcome.status {
            CommitStatus::Previewed => {
                println!(
                    "Would add {} [{}/{}]",
                    entry.name,
                    entry.platform.as_deref().unwrap_or("-"),
                    entry.runner.as_deref().unwrap_or("-")
                );
                println!("  Id: {}", entry.id);
                println!("  Slug: {}", entry.slug);
                println!("  Directory: {}", entry.directory.as_deref().unwrap_or("-"));
                println!("  Config: {}", outcome.document_path.display());
                if let Some(yaml) = &outcome.document_yaml {
                    for line in yaml.lines() {
                        println!("    {line}");
                    }
                }
            }
            CommitStatus::Inserted => {
                println!("Added {} (id {}, slug {})", entry.name, entry.id, entry.slug);
            }
            CommitStatus::SkippedExistingSlug => {
                println!("Skipped {}: slug {} already in catalog", entry.name, entry.slug);
            }
            CommitStatus::Failed { error } => {
                println!("Failed to add {}: {error}", outcome.path.display());
            }
        }
    }

    let commit = &summary.commit;
    let (added, removed) = if summary.dry_run {
        (commit.previewed(), summary.load.stale.len())
    } else {
        (commit.inserted(), summary.load.removed_count())
    };
    println!(
        "{}{} found, {} added, {} removed, {} unverified, {} skipped, {} failed",
        if summary.dry_run { "Dry run: " } else { "" },
        summary.discovered,
        added,
        removed,
        summary.load.unverified.len(),
        commit.skipped(),
        commit.failed()
    );
}
