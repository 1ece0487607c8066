use anyhow::{Context, Result};

use crate::commands::util::{load_rules, load_settings};

/// Print the effective rule table as YAML, ready to be edited and passed back
/// with `--rules`.
pub fn rules_command(rules: Option<&str>, settings_file: Option<&str>) -> Result<()> {
    let settings = load_settings(settings_file)?;
    let table = load_rules(rules, &settings)?;
    let yaml = table.to_yaml().context("Failed to render rule table")?;
    print!("{yaml}");
    Ok(())
}
