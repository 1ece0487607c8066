use std::path::{Path, PathBuf};

use rusqlite::{params, params_from_iter, Connection, TransactionBehavior};
use thiserror::Error;

use crate::db::{CatalogEntry, EntryDraft};

/// Table holding one row per catalog entry.
pub const GAMES_TABLE: &str = "games";

/// Columns the catalog cannot work without.
pub const REQUIRED_COLUMNS: &[&str] =
    &["id", "name", "slug", "platform", "runner", "directory", "installed_at", "configpath"];

/// Lutris bookkeeping columns populated on insert when the table has them:
/// `installed = 1`, `lastplayed = 0`, `hidden = 0`.
const FLAG_COLUMNS: &[(&str, i64)] = &[("installed", 1), ("lastplayed", 0), ("hidden", 0)];

/// Error type for record store operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Underlying SQLite error.
    #[error("SQLite error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The store file is absent. The catalog never creates it implicitly.
    #[error("Catalog store does not exist: {}", .0.display())]
    MissingStore(PathBuf),

    /// The store opened but has no games table.
    #[error("Catalog store {} has no `{table}` table; is it a Lutris database?", path.display())]
    MissingTable { path: PathBuf, table: &'static str },

    /// The games table lacks columns we need.
    #[error("Catalog table `{table}` is missing required columns: {}", missing.join(", "))]
    MissingColumns { table: &'static str, missing: Vec<String> },
}

/// Convenience result type for DB operations.
pub type DbResult<T> = Result<T, DbError>;

/// SQLite-backed catalog store.
///
/// This is a thin wrapper around `rusqlite::Connection` that is responsible for:
/// - Opening an existing store and validating the `games` schema.
/// - Small, testable helpers for the handful of queries the sync needs.
///
/// Schema creation is limited to `create`, which lays out an empty
/// Lutris-shaped table for fresh setups and tests.
#[derive(Debug)]
pub struct CatalogDb {
    conn: Connection,
    /// Subset of `FLAG_COLUMNS` present in this store.
    flag_columns: Vec<(&'static str, i64)>,
}

impl CatalogDb {
    /// Open an existing store and validate its schema.
    pub fn open(path: &Path) -> DbResult<Self> {
        if !path.is_file() {
            return Err(DbError::MissingStore(path.to_path_buf()));
        }
        let conn = Connection::open(path)?;
        let columns = table_columns(&conn, GAMES_TABLE)?;
        if columns.is_empty() {
            return Err(DbError::MissingTable { path: path.to_path_buf(), table: GAMES_TABLE });
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|required| !columns.iter().any(|c| c == *required))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DbError::MissingColumns { table: GAMES_TABLE, missing });
        }

        let flag_columns = FLAG_COLUMNS
            .iter()
            .copied()
            .filter(|(name, _)| columns.iter().any(|c| c == name))
            .collect();
        Ok(Self { conn, flag_columns })
    }

    /// Create a store with an empty Lutris-shaped `games` table, then open it.
    pub fn create(path: &Path) -> DbResult<Self> {
        {
            let conn = Connection::open(path)?;
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS games (
                    id                INTEGER PRIMARY KEY,
                    name              TEXT,
                    slug              TEXT UNIQUE,
                    installer_slug    TEXT,
                    parent_slug       TEXT,
                    platform          TEXT,
                    runner            TEXT,
                    executable        TEXT,
                    directory         TEXT,
                    updated           DATETIME,
                    lastplayed        INTEGER,
                    installed         INTEGER,
                    installed_at      INTEGER,
                    year              INTEGER,
                    configpath        TEXT,
                    has_custom_banner INTEGER,
                    has_custom_icon   INTEGER,
                    playtime          REAL,
                    hidden            INTEGER,
                    service           TEXT,
                    service_id        TEXT
                );
                "#,
            )?;
        }
        Self::open(path)
    }

    /// List all entries (ordered by id).
    pub fn list_entries(&self) -> DbResult<Vec<CatalogEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, slug, platform, runner, directory, installed_at, configpath
            FROM games
            ORDER BY id
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CatalogEntry {
                id: row.get(0)?,
                name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                slug: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                platform: row.get(3)?,
                runner: row.get(4)?,
                directory: row.get(5)?,
                installed_at: row.get(6)?,
                configpath: row.get(7)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Highest id in the table, if any rows exist.
    pub fn max_id(&self) -> DbResult<Option<i64>> {
        let id = self.conn.query_row("SELECT MAX(id) FROM games", [], |row| row.get(0))?;
        Ok(id)
    }

    /// Whether a row with this slug exists.
    pub fn slug_exists(&self, slug: &str) -> DbResult<bool> {
        let count: i64 =
            self.conn.query_row("SELECT COUNT(*) FROM games WHERE slug = ?1", params![slug], |row| {
                row.get(0)
            })?;
        Ok(count > 0)
    }

    /// Insert a fully specified row (explicit id).
    pub fn insert_entry(&self, entry: &CatalogEntry) -> DbResult<()> {
        insert_row(&self.conn, entry, &self.flag_columns)
    }

    /// Insert a draft, allocating its id as `MAX(id) + 1` inside an immediate
    /// transaction so allocation and insert happen under one write lock.
    ///
    /// Returns the allocated id.
    pub fn insert_with_next_id(&mut self, draft: &EntryDraft) -> DbResult<i64> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id: i64 =
            tx.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM games", [], |row| row.get(0))?;
        insert_row(&tx, &draft.with_id(id), &self.flag_columns)?;
        tx.commit()?;
        Ok(id)
    }

    /// Delete the row with this slug. Returns the number of rows affected.
    pub fn delete_by_slug(&self, slug: &str) -> DbResult<usize> {
        let affected = self.conn.execute("DELETE FROM games WHERE slug = ?1", params![slug])?;
        Ok(affected)
    }
}

fn insert_row(
    conn: &Connection,
    entry: &CatalogEntry,
    flag_columns: &[(&'static str, i64)],
) -> DbResult<()> {
    let mut columns: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    let mut values: Vec<rusqlite::types::Value> = vec![
        entry.id.into(),
        entry.name.clone().into(),
        entry.slug.clone().into(),
        entry.platform.clone().into(),
        entry.runner.clone().into(),
        entry.directory.clone().into(),
        entry.installed_at.into(),
        entry.configpath.clone().into(),
    ];
    for (name, value) in flag_columns {
        columns.push(name);
        values.push((*value).into());
    }

    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO games ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    );
    conn.execute(&sql, params_from_iter(values))?;
    Ok(())
}

/// Column names of `table`; empty when the table does not exist.
fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let pragma = format!("PRAGMA table_info({table});");
    let mut stmt = conn.prepare(&pragma)?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
    let mut out = Vec::new();
    for name in rows {
        out.push(name?);
    }
    Ok(out)
}
