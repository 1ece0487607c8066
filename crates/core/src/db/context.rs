use std::path::PathBuf;

use crate::db::{CatalogDb, CatalogLayout, DbResult};

/// Convenience wrapper bundling a layout and its opened record store.
#[derive(Debug)]
pub struct CatalogContext {
    pub layout: CatalogLayout,
    pub db: CatalogDb,
}

impl CatalogContext {
    /// Open the store named by `layout`. The store must already exist.
    pub fn open(layout: CatalogLayout) -> DbResult<Self> {
        let db = CatalogDb::open(&layout.store_path)?;
        Ok(Self { layout, db })
    }

    /// Configuration document path for an entry's document name.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.layout.document_path(name)
    }
}
