use std::fs;

use gamesweep_core::db::{CatalogDb, EntryDraft};
use predicates::prelude::*;
use tempfile::tempdir;

fn gamesweep(home: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gamesweep");
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config")).env_remove("RUST_LOG");
    cmd
}

#[test]
fn list_prints_rows_as_text_and_json() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("pga.db");
    let mut db = CatalogDb::create(&store).expect("create store");
    db.insert_with_next_id(&EntryDraft {
        name: "Quest".into(),
        slug: "quest-0123".into(),
        platform: "Windows".into(),
        runner: "wine".into(),
        directory: "/games/Quest".into(),
        installed_at: 0,
        configpath: "quest-0123".into(),
    })
    .expect("insert");

    gamesweep(dir.path())
        .args(["list", "--lutris-database"])
        .arg(&store)
        .arg("--lutris-yaml-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Games (1):"))
        .stdout(predicate::str::contains("[1] Quest [Windows/wine] slug=quest-0123"))
        .stdout(predicate::str::contains("(missing)"));

    let output = gamesweep(dir.path())
        .args(["list", "--json", "--lutris-database"])
        .arg(&store)
        .arg("--lutris-yaml-dir")
        .arg(dir.path())
        .output()
        .expect("run list");
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["slug"], "quest-0123");
}

#[test]
fn list_on_empty_store_says_none() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("pga.db");
    CatalogDb::create(&store).expect("create store");

    gamesweep(dir.path())
        .args(["list", "--lutris-database"])
        .arg(&store)
        .arg("--lutris-yaml-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(none)"));
}

#[test]
fn scan_lists_candidates_without_a_store() {
    let dir = tempdir().expect("tempdir");
    let games = dir.path().join("games");
    fs::create_dir_all(games.join("Sonic")).expect("games");
    fs::write(games.join("Sonic").join("sonic.gen"), b"SEGA").expect("rom");
    fs::write(games.join("Sonic").join("notes.txt"), b"notes").expect("notes");

    gamesweep(dir.path())
        .args(["scan", "-d"])
        .arg(&games)
        .assert()
        .success()
        .stdout(predicate::str::contains("Candidates (1):"))
        .stdout(predicate::str::contains("sonic [Sega Genesis/mednafen]"));

    let output = gamesweep(dir.path())
        .args(["scan", "--json", "-d"])
        .arg(&games)
        .output()
        .expect("run scan");
    assert!(output.status.success());
    let candidates: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(candidates[0]["machine"], "md");
    assert_eq!(candidates[0]["payload"]["machine"], "md");
}

#[test]
fn scan_of_missing_directory_fails() {
    let dir = tempdir().expect("tempdir");
    gamesweep(dir.path())
        .args(["scan", "-d"])
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scan directory does not exist"));
}

#[test]
fn rules_prints_loadable_yaml() {
    let dir = tempdir().expect("tempdir");
    let output = gamesweep(dir.path()).arg("rules").output().expect("run rules");
    assert!(output.status.success());
    let yaml = String::from_utf8(output.stdout).expect("utf8");
    assert!(yaml.contains("extension_rules:"));
    assert!(yaml.contains("unins000"));

    // The printed table works as a --rules file.
    let rules_path = dir.path().join("rules.yaml");
    fs::write(&rules_path, &yaml).expect("write rules");
    gamesweep(dir.path())
        .arg("rules")
        .arg("--rules")
        .arg(&rules_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("extension_rules:"));
}

#[test]
fn custom_rules_change_what_scan_finds() {
    let dir = tempdir().expect("tempdir");
    let games = dir.path().join("games");
    fs::create_dir_all(&games).expect("games");
    fs::write(games.join("tetris.gb"), b"rom").expect("rom");
    let rules_path = dir.path().join("rules.yml");
    fs::write(&rules_path, "ignored_extensions: [gb]\n").expect("rules");

    gamesweep(dir.path())
        .args(["scan", "-d"])
        .arg(&games)
        .arg("--rules")
        .arg(&rules_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Candidates (0):"));
}

#[test]
fn unreadable_rules_file_is_reported() {
    let dir = tempdir().expect("tempdir");
    gamesweep(dir.path())
        .args(["rules", "--rules"])
        .arg(dir.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load rule table"));
}
