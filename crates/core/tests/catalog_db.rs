use gamesweep_core::db::{CatalogDb, CatalogEntry, DbError, EntryDraft};
use rusqlite::Connection;
use tempfile::tempdir;

fn draft(slug: &str) -> EntryDraft {
    EntryDraft {
        name: "Quest".into(),
        slug: slug.into(),
        platform: "Windows".into(),
        runner: "wine".into(),
        directory: "/games/Quest".into(),
        installed_at: 1_700_000_000,
        configpath: slug.into(),
    }
}

#[test]
fn created_store_reopens_and_round_trips_rows() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("pga.db");

    {
        let mut db = CatalogDb::create(&path).expect("create store");
        assert_eq!(db.max_id().expect("max id"), None);
        assert_eq!(db.insert_with_next_id(&draft("quest-1")).expect("insert"), 1);
        assert_eq!(db.insert_with_next_id(&draft("quest-2")).expect("insert"), 2);
    }

    let db = CatalogDb::open(&path).expect("reopen store");
    let entries = db.list_entries().expect("list");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], draft("quest-1").with_id(1));
    assert_eq!(entries[1].id, 2);
    assert_eq!(db.max_id().expect("max id"), Some(2));
}

#[test]
fn next_id_follows_the_current_maximum() {
    let dir = tempdir().expect("tempdir");
    let mut db = CatalogDb::create(&dir.path().join("pga.db")).expect("create");
    db.insert_entry(&draft("old").with_id(41)).expect("insert explicit id");

    assert_eq!(db.insert_with_next_id(&draft("new")).expect("insert"), 42);
}

#[test]
fn lutris_flag_columns_are_filled_in() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("pga.db");
    let mut db = CatalogDb::create(&store).expect("create");
    db.insert_with_next_id(&draft("quest")).expect("insert");

    let (installed, lastplayed, hidden): (i64, i64, i64) = Connection::open(&store)
        .expect("raw connection")
        .query_row("SELECT installed, lastplayed, hidden FROM games WHERE slug = 'quest'", [], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?))
        })
        .expect("flags");
    assert_eq!((installed, lastplayed, hidden), (1, 0, 0));
}

#[test]
fn minimal_schema_without_flag_columns_is_accepted() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("minimal.db");
    Connection::open(&path)
        .expect("open")
        .execute_batch(
            "CREATE TABLE games (id INTEGER PRIMARY KEY, name TEXT, slug TEXT, platform TEXT,
             runner TEXT, directory TEXT, installed_at INTEGER, configpath TEXT);",
        )
        .expect("create table");

    let mut db = CatalogDb::open(&path).expect("open minimal store");
    assert_eq!(db.insert_with_next_id(&draft("quest")).expect("insert"), 1);
}

#[test]
fn slug_lookup_and_delete() {
    let dir = tempdir().expect("tempdir");
    let mut db = CatalogDb::create(&dir.path().join("pga.db")).expect("create");
    db.insert_with_next_id(&draft("quest")).expect("insert");

    assert!(db.slug_exists("quest").expect("exists"));
    assert!(!db.slug_exists("other").expect("exists"));
    assert_eq!(db.delete_by_slug("quest").expect("delete"), 1);
    assert_eq!(db.delete_by_slug("quest").expect("delete again"), 0);
    assert!(!db.slug_exists("quest").expect("exists"));
}

#[test]
fn duplicate_slug_is_rejected_by_the_store() {
    let dir = tempdir().expect("tempdir");
    let mut db = CatalogDb::create(&dir.path().join("pga.db")).expect("create");
    db.insert_with_next_id(&draft("quest")).expect("insert");

    let err = db.insert_with_next_id(&draft("quest")).expect_err("unique slug");
    assert!(matches!(err, DbError::Sql(_)));
    assert_eq!(db.max_id().expect("max id"), Some(1));
}

#[test]
fn foreign_rows_with_null_columns_are_listed() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("pga.db");
    let db = CatalogDb::create(&store).expect("create");
    Connection::open(&store)
        .expect("raw connection")
        .execute("INSERT INTO games (id, name, slug) VALUES (7, 'Imported', 'imported')", [])
        .expect("insert foreign row");

    let entries = db.list_entries().expect("list");
    let entry: &CatalogEntry = &entries[0];
    assert_eq!(entry.configpath, None);
    assert_eq!(entry.document_name(), "imported");
}

#[test]
fn open_requires_an_existing_lutris_table() {
    let dir = tempdir().expect("tempdir");

    let missing = dir.path().join("missing.db");
    assert!(matches!(CatalogDb::open(&missing), Err(DbError::MissingStore(_))));
    assert!(!missing.exists(), "open must not create the store");

    let empty = dir.path().join("empty.db");
    Connection::open(&empty).expect("open").execute_batch("CREATE TABLE other (x INTEGER);").expect("ddl");
    assert!(matches!(CatalogDb::open(&empty), Err(DbError::MissingTable { .. })));

    let partial = dir.path().join("partial.db");
    Connection::open(&partial)
        .expect("open")
        .execute_batch("CREATE TABLE games (id INTEGER PRIMARY KEY, name TEXT, slug TEXT);")
        .expect("ddl");
    match CatalogDb::open(&partial) {
        Err(DbError::MissingColumns { missing, .. }) => {
            assert_eq!(missing, vec!["platform", "runner", "directory", "installed_at", "configpath"]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}
