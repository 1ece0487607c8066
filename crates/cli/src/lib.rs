use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod commands;
pub mod logging;

/// Make a user-supplied directory absolute, canonicalizing when possible and
/// otherwise joining it onto the current working directory.
pub fn canonicalize_or_current(dir: &str) -> Result<PathBuf> {
    let path = Path::new(dir);
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(_) if path.is_absolute() => Ok(path.to_path_buf()),
        Err(_) => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            Ok(cwd.join(path))
        }
    }
}

/// Parse a `key=value` game option as given on the command line.
pub fn parse_game_option(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("Option \"{raw}\" is not formatted correctly")),
    }
}
