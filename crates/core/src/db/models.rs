use serde::{Deserialize, Serialize};

use crate::model::CandidateArtifact;

/// A row of the catalog's `games` table.
///
/// Only the columns this tool reads or writes are modelled; the store may
/// carry more, which are left untouched (and null on rows we insert).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    /// Unique key of the entry; also the default configuration document name.
    pub slug: String,
    pub platform: Option<String>,
    pub runner: Option<String>,
    /// Install directory of the game.
    pub directory: Option<String>,
    /// Insertion time in epoch seconds.
    pub installed_at: Option<i64>,
    /// Name (without extension) of the configuration document.
    pub configpath: Option<String>,
}

impl CatalogEntry {
    /// Name of the configuration document for this entry, falling back to the
    /// slug when `configpath` is unset.
    pub fn document_name(&self) -> &str {
        self.configpath.as_deref().map(str::trim).filter(|name| !name.is_empty()).unwrap_or(&self.slug)
    }
}

/// A catalog row that has not been assigned an id yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryDraft {
    pub name: String,
    pub slug: String,
    pub platform: String,
    pub runner: String,
    pub directory: String,
    pub installed_at: i64,
    pub configpath: String,
}

impl EntryDraft {
    /// Build the row for a freshly discovered candidate.
    pub fn from_candidate(candidate: &CandidateArtifact, installed_at: i64) -> Self {
        let slug = candidate.slug();
        Self {
            name: candidate.display_name.clone(),
            configpath: slug.clone(),
            slug,
            platform: candidate.platform.clone(),
            runner: candidate.runner.clone(),
            directory: candidate.directory().to_string_lossy().into_owned(),
            installed_at,
        }
    }

    /// Attach an id, producing the full row.
    pub fn with_id(&self, id: i64) -> CatalogEntry {
        CatalogEntry {
            id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            platform: Some(self.platform.clone()),
            runner: Some(self.runner.clone()),
            directory: Some(self.directory.clone()),
            installed_at: Some(self.installed_at),
            configpath: Some(self.configpath.clone()),
        }
    }
}
