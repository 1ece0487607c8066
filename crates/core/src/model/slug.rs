use std::path::Path;

use sha2::{Digest, Sha256};

/// Number of hex digits of the path digest kept in a slug.
const PATH_HASH_LEN: usize = 32;

/// Normalize a display name into the human-readable part of a slug.
///
/// Anything outside `[0-9A-Za-z']` splits words, apostrophes are dropped,
/// words are joined with `-` and lowercased.
pub fn normalize_name(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '\'' { c } else { ' ' })
        .filter(|c| *c != '\'')
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join("-").to_ascii_lowercase()
}

/// Hex digest of the absolute path, truncated to `PATH_HASH_LEN`.
pub fn path_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let mut digest = format!("{:x}", hasher.finalize());
    digest.truncate(PATH_HASH_LEN);
    digest
}

/// Build the catalog slug for a display name located at `path`.
pub fn slug_for(display_name: &str, path: &Path) -> String {
    let name = normalize_name(display_name);
    let hash = path_hash(path);
    if name.is_empty() {
        hash
    } else {
        format!("{name}-{hash}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_apostrophes_and_punctuation() {
        assert_eq!(normalize_name("Baldur's Gate II: Enhanced"), "baldurs-gate-ii-enhanced");
        assert_eq!(normalize_name("  Super   Mario (USA) "), "super-mario-usa");
        assert_eq!(normalize_name("--"), "");
    }

    #[test]
    fn slug_hash_depends_on_path_only() {
        let a = slug_for("Rom", Path::new("/games/a/rom.nes"));
        let b = slug_for("Rom", Path::new("/games/b/rom.nes"));
        assert_ne!(a, b);
        assert!(a.starts_with("rom-"));
        assert_eq!(a.len(), "rom-".len() + PATH_HASH_LEN);
        assert_eq!(a, slug_for("Rom", Path::new("/games/a/rom.nes")));
    }

    #[test]
    fn empty_name_yields_bare_hash() {
        let slug = slug_for("???", Path::new("/games/???.exe"));
        assert_eq!(slug.len(), PATH_HASH_LEN);
        assert!(!slug.contains('-'));
    }
}
