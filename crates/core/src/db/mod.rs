//! The persisted catalog: SQLite record store, layout, and user settings.
//!
//! - `CatalogLayout`: where the store and configuration documents live.
//! - `Settings`: optional JSON settings overriding default locations.
//! - `CatalogDb`: a small SQLite wrapper over the `games` table.
//! - `CatalogEntry` / `EntryDraft`: row types.

mod catalog_db;
mod config;
mod context;
mod layout;
mod models;

pub use catalog_db::*;
pub use config::*;
pub use context::*;
pub use layout::*;
pub use models::*;
