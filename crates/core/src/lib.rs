//! gamesweep-core
//!
//! Core library for discovering game files on disk and keeping a Lutris-style
//! game catalog in sync with them.
//!
//! The crate is split along the pipeline:
//! - `rules`: the data tables driving classification.
//! - `classify`: turns one file path into a candidate (or nothing).
//! - `scan`: walks a directory tree and collects candidates.
//! - `db` / `document`: the persisted catalog (SQLite rows + YAML documents).
//! - `catalog`: loads and validates existing entries, pruning stale ones.
//! - `sync`: diffs candidates against the catalog and commits additions.
//!
//! All substantive logic lives here so it is testable without the CLI.

pub mod catalog;
pub mod classify;
pub mod db;
pub mod document;
pub mod model;
pub mod rules;
pub mod scan;
pub mod sync;
