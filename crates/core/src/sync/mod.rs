//! Reconciliation of discovered candidates against the catalog.
//!
//! `reconcile` picks the candidates whose path no validated entry already
//! points at; `commit` turns each of them into a configuration document plus
//! a catalog row; `run` drives the whole pipeline for one invocation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{self, LoadReport, ValidatedEntry};
use crate::db::{CatalogDb, CatalogEntry, CatalogLayout, DbError, EntryDraft};
use crate::model::CandidateArtifact;
use crate::rules::RuleTable;
use crate::scan::{scan_into, CandidateSet, ScanError, ScanOptions};

/// Error type for a sync run. Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Configuration directory does not exist: {}", .0.display())]
    MissingConfigDir(PathBuf),
}

/// What happened to one candidate during commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommitStatus {
    /// Document written and row inserted.
    Inserted,
    /// Dry run: nothing written.
    Previewed,
    /// A row with this slug already exists.
    SkippedExistingSlug,
    /// Writing the document or inserting the row failed.
    Failed { error: String },
}

/// Per-candidate commit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    pub path: PathBuf,
    /// The row as inserted (or as it would be inserted).
    pub entry: CatalogEntry,
    pub document_path: PathBuf,
    /// Rendered document, kept for dry-run previews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_yaml: Option<String>,
    #[serde(flatten)]
    pub status: CommitStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    pub outcomes: Vec<CommitOutcome>,
}

impl CommitReport {
    fn count(&self, pred: impl Fn(&CommitStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }

    pub fn inserted(&self) -> usize {
        self.count(|s| *s == CommitStatus::Inserted)
    }

    pub fn previewed(&self) -> usize {
        self.count(|s| *s == CommitStatus::Previewed)
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| *s == CommitStatus::SkippedExistingSlug)
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, CommitStatus::Failed { .. }))
    }
}

/// Candidates not yet represented by any validated entry.
///
/// An entry represents a candidate when its recorded binary path, or that
/// path's canonical form, equals the candidate's path.
pub fn reconcile(existing: &[ValidatedEntry], discovered: &CandidateSet) -> Vec<CandidateArtifact> {
    let known: HashSet<&Path> = existing
        .iter()
        .flat_map(|e| std::iter::once(e.binary.as_path()).chain(e.canonical.as_deref()))
        .collect();
    discovered.values().filter(|c| !known.contains(c.path.as_path())).cloned().collect()
}

/// Commit `to_add` sequentially.
///
/// Live runs write the document first and then insert the row, allocating
/// the id in the same transaction as the insert, so a committed row never
/// references a missing document. Dry runs compute the same rows (ids
/// previewed from the current maximum) and render the documents without
/// writing anything.
pub fn commit(
    to_add: &[CandidateArtifact],
    db: &mut CatalogDb,
    layout: &CatalogLayout,
    dry_run: bool,
) -> Result<CommitReport, DbError> {
    let base_id = db.max_id()?.unwrap_or(0);
    let mut next_offset = 1;
    let mut report = CommitReport::default();

    for candidate in to_add {
        let draft = EntryDraft::from_candidate(candidate, Utc::now().timestamp());
        let document = candidate.document();
        let document_path = layout.document_path(&draft.configpath);
        let preview = draft.with_id(base_id + next_offset);

        let mut outcome = CommitOutcome {
            path: candidate.path.clone(),
            entry: preview,
            document_path,
            document_yaml: None,
            status: CommitStatus::Previewed,
        };

        match db.slug_exists(&draft.slug) {
            Ok(false) => {}
            Ok(true) => {
                info!(slug = %draft.slug, "Already have");
                outcome.status = CommitStatus::SkippedExistingSlug;
                report.outcomes.push(outcome);
                continue;
            }
            Err(err) => {
                warn!(slug = %draft.slug, error = %err, "Failed to check slug");
                outcome.status = CommitStatus::Failed { error: err.to_string() };
                report.outcomes.push(outcome);
                continue;
            }
        }

        if dry_run {
            outcome.document_yaml = match document.to_yaml() {
                Ok(yaml) => Some(yaml),
                Err(err) => {
                    outcome.status = CommitStatus::Failed { error: err.to_string() };
                    None
                }
            };
            next_offset += 1;
            report.outcomes.push(outcome);
            continue;
        }

        if let Err(err) = document.write(&outcome.document_path) {
            warn!(slug = %draft.slug, error = %err, "Failed to write configuration document");
            outcome.status = CommitStatus::Failed { error: err.to_string() };
            report.outcomes.push(outcome);
            continue;
        }
        match db.insert_with_next_id(&draft) {
            Ok(id) => {
                info!(slug = %draft.slug, id, "New game");
                outcome.entry = draft.with_id(id);
                outcome.status = CommitStatus::Inserted;
                next_offset += 1;
            }
            Err(err) => {
                warn!(slug = %draft.slug, error = %err, "Failed to insert catalog row");
                outcome.status = CommitStatus::Failed { error: err.to_string() };
            }
        }
        report.outcomes.push(outcome);
    }

    Ok(report)
}

/// Everything one sync invocation needs.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Directories to scan.
    pub roots: Vec<PathBuf>,
    pub layout: CatalogLayout,
    pub rules: RuleTable,
    pub scan: ScanOptions,
    pub dry_run: bool,
}

/// Result of a sync invocation.
#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    pub discovered: usize,
    pub load: LoadReport,
    pub commit: CommitReport,
    pub dry_run: bool,
}

/// Run the full pipeline: validate inputs, scan, load/prune, reconcile, commit.
///
/// Fatal conditions (missing store, config directory, or scan root, or a
/// malformed store) are checked before anything is mutated.
pub fn run(request: &SyncRequest) -> Result<SyncSummary, SyncError> {
    let layout = &request.layout;
    if !layout.config_dir.is_dir() {
        return Err(SyncError::MissingConfigDir(layout.config_dir.clone()));
    }
    let mut db = CatalogDb::open(&layout.store_path)?;

    let mut discovered = CandidateSet::new();
    for root in &request.roots {
        let added = scan_into(root, &request.rules, &request.scan, &mut discovered)?;
        info!(root = %root.display(), added, "Scanned directory");
    }

    let load = catalog::load(&db, layout, request.dry_run)?;
    let to_add = reconcile(&load.valid, &discovered);
    info!(
        discovered = discovered.len(),
        existing = load.valid.len(),
        new = to_add.len(),
        "Reconciled catalog"
    );
    let committed = commit(&to_add, &mut db, layout, request.dry_run)?;

    Ok(SyncSummary {
        discovered: discovered.len(),
        load,
        commit: committed,
        dry_run: request.dry_run,
    })
}
