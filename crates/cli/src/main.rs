use anyhow::Result;
use clap::{Parser, Subcommand};
use gamesweep::commands::{
    list_command, rules_command, scan_command, sync_command, ScanArgs, SyncArgs,
};
use gamesweep::logging::init_logging;

/// Keep a Lutris library in sync with the games on disk.
///
/// This CLI is a thin wrapper around `gamesweep-core` (exposed in code as
/// `gamesweep_core`).
#[derive(Parser, Debug)]
#[command(name = "gamesweep", version, about = "Find games on disk and add them to Lutris", long_about = None)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Settings file (defaults to ~/.config/gamesweep/settings.json).
    #[arg(long, global = true)]
    settings: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan directories, drop stale entries, and add new games.
    Sync(SyncArgs),

    /// Classify files under directories without touching the catalog.
    Scan(ScanArgs),

    /// List the games in the catalog.
    List {
        /// Path to the Lutris database.
        #[arg(long)]
        lutris_database: Option<String>,

        /// Directory of Lutris game configs.
        #[arg(long)]
        lutris_yaml_dir: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the effective rule table as YAML.
    Rules {
        /// Rule table file (YAML or JSON) to load instead of the built-in rules.
        #[arg(long)]
        rules: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let settings = cli.settings.as_deref();

    match cli.command {
        Command::Sync(args) => sync_command(&args, settings)?,
        Command::Scan(args) => scan_command(&args, settings)?,
        Command::List { lutris_database, lutris_yaml_dir, json } => list_command(
            lutris_database.as_deref(),
            lutris_yaml_dir.as_deref(),
            json,
            settings,
        )?,
        Command::Rules { rules } => rules_command(rules.as_deref(), settings)?,
    }

    Ok(())
}
