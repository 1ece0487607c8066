//! Loading and validating existing catalog entries.
//!
//! Each row is checked against its configuration document and the binary
//! that document points at:
//! - document names an existing file: the entry is valid;
//! - document names a file that is gone: the entry is stale and is removed
//!   (row first, then document) unless this is a dry run;
//! - document missing, unreadable, or naming no file, or the binary cannot be
//!   inspected: the entry cannot be validated and is left alone.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::db::{CatalogDb, CatalogEntry, CatalogLayout, DbResult};
use crate::document::read_game_section;

/// An entry whose document resolves to an existing binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedEntry {
    pub entry: CatalogEntry,
    /// Binary path as recorded in the document.
    pub binary: PathBuf,
    /// Canonical form of `binary`, when it differs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<PathBuf>,
}

/// Why an entry could not be validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnverifiedReason {
    MissingDocument { document: PathBuf },
    UnreadableDocument { document: PathBuf, error: String },
    NoBinaryPath { document: PathBuf },
    /// The binary's existence could not be determined (permissions, symlink
    /// loop, unavailable mount).
    UninspectableBinary { document: PathBuf, binary: PathBuf, error: String },
}

/// An entry kept without validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnverifiedEntry {
    pub entry: CatalogEntry,
    pub reason: UnverifiedReason,
}

/// An entry whose binary no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaleEntry {
    pub entry: CatalogEntry,
    pub document: PathBuf,
    pub binary: PathBuf,
    /// Whether the row was deleted (always false in dry runs or on failure).
    pub removed: bool,
}

/// Outcome of loading the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub valid: Vec<ValidatedEntry>,
    pub unverified: Vec<UnverifiedEntry>,
    pub stale: Vec<StaleEntry>,
}

impl LoadReport {
    /// Number of stale rows actually deleted.
    pub fn removed_count(&self) -> usize {
        self.stale.iter().filter(|s| s.removed).count()
    }
}

enum Inspection {
    Valid(ValidatedEntry),
    Unverified(UnverifiedReason),
    Stale { document: PathBuf, binary: PathBuf },
}

/// Load every row, validate it, and prune stale entries unless `dry_run`.
///
/// Only a failure to read the table is fatal; per-entry problems are logged
/// and reported.
pub fn load(db: &CatalogDb, layout: &CatalogLayout, dry_run: bool) -> DbResult<LoadReport> {
    let mut report = LoadReport::default();
    for entry in db.list_entries()? {
        match inspect(&entry, layout) {
            Inspection::Valid(valid) => report.valid.push(valid),
            Inspection::Unverified(reason) => {
                warn!(slug = %entry.slug, ?reason, "Cannot validate catalog entry; keeping it");
                report.unverified.push(UnverifiedEntry { entry, reason });
            }
            Inspection::Stale { document, binary } => {
                let removed = if dry_run {
                    info!(slug = %entry.slug, binary = %binary.display(), "Would remove stale entry");
                    false
                } else {
                    remove_stale(db, &entry, &document)
                };
                report.stale.push(StaleEntry { entry, document, binary, removed });
            }
        }
    }
    Ok(report)
}

fn inspect(entry: &CatalogEntry, layout: &CatalogLayout) -> Inspection {
    let document = layout.document_path(entry.document_name());
    if !document.is_file() {
        return Inspection::Unverified(UnverifiedReason::MissingDocument { document });
    }
    let game = match read_game_section(&document) {
        Ok(game) => game,
        Err(err) => {
            return Inspection::Unverified(UnverifiedReason::UnreadableDocument {
                document,
                error: err.to_string(),
            })
        }
    };
    let Some(binary) = game.primary_path().map(PathBuf::from) else {
        return Inspection::Unverified(UnverifiedReason::NoBinaryPath { document });
    };

    match binary.try_exists() {
        Ok(true) => {
            let canonical = binary.canonicalize().ok().filter(|c| *c != binary);
            Inspection::Valid(ValidatedEntry { entry: entry.clone(), binary, canonical })
        }
        Ok(false) => Inspection::Stale { document, binary },
        Err(err) => Inspection::Unverified(UnverifiedReason::UninspectableBinary {
            document,
            binary,
            error: err.to_string(),
        }),
    }
}

/// Delete the row, then the document. Returns whether the row is gone.
fn remove_stale(db: &CatalogDb, entry: &CatalogEntry, document: &std::path::Path) -> bool {
    match db.delete_by_slug(&entry.slug) {
        Ok(_) => {}
        Err(err) => {
            warn!(slug = %entry.slug, error = %err, "Failed to delete stale catalog row");
            return false;
        }
    }
    if let Err(err) = fs::remove_file(document) {
        warn!(document = %document.display(), error = %err, "Failed to delete stale document");
    }
    info!(slug = %entry.slug, "Removed stale entry");
    true
}
