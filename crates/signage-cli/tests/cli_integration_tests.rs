//! CLI integration tests
//!
//! Drive the `signage` binary against a scratch database.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn signage(dir: &Path, db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_signage"))
        .current_dir(dir)
        .env_remove("SIGNAGE_CONFIG")
        .env_remove("SIGNAGE_DB")
        .arg("--db")
        .arg(db)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Value printed on a `  key: value` line
fn field(out: &str, key: &str) -> String {
    let prefix = format!("  {}: ", key);
    out.lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .unwrap_or_else(|| panic!("missing {} in output:\n{}", key, out))
        .to_string()
}

fn setup() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join(".signage/store.db");
    (temp_dir, db_path)
}

fn add_layout(dir: &Path, db: &Path, name: &str) -> String {
    let out = stdout(&signage(
        dir,
        db,
        &[
            "layout", "add", "--owner", "1", "--name", name, "--width", "1920", "--height",
            "1080", "--tag", "lobby",
        ],
    ));
    assert!(out.starts_with(&format!("Added {}", name)));
    field(&out, "layout_id")
}

#[test]
fn test_layout_add_show_list() {
    let (temp_dir, db) = setup();
    let dir = temp_dir.path();
    let layout_id = add_layout(dir, &db, "Lobby");

    let out = stdout(&signage(
        dir,
        &db,
        &[
            "layout", "add-region", &layout_id, "--owner", "1", "--name", "banner", "--width",
            "1920", "--height", "200",
        ],
    ));
    assert!(out.contains("Regions = 1"));

    let out = stdout(&signage(dir, &db, &["layout", "show", &layout_id]));
    assert!(out.starts_with("Layout Lobby - 1920 x 1080. Regions = 1, Tags = 1."));
    assert!(out.contains("tags: lobby"));

    let out = stdout(&signage(dir, &db, &["layout", "list", "--owner", "1"]));
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("Lobby"));
}

#[test]
fn test_layout_show_json() {
    let (temp_dir, db) = setup();
    let dir = temp_dir.path();
    let layout_id = add_layout(dir, &db, "Lobby");

    let out = stdout(&signage(dir, &db, &["layout", "show", &layout_id, "--json"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["name"], "Lobby");
    assert_eq!(value["regions"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_layout_add_invalid_name_fails() {
    let (temp_dir, db) = setup();
    let long_name = "n".repeat(51);

    let output = signage(
        temp_dir.path(),
        &db,
        &[
            "layout", "add", "--owner", "1", "--name", &long_name, "--width", "10", "--height",
            "10",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_INVALID_ARGUMENT"), "stderr: {}", stderr);
}

#[test]
fn test_layout_copy_and_delete() {
    let (temp_dir, db) = setup();
    let dir = temp_dir.path();
    let layout_id = add_layout(dir, &db, "Lobby");

    let out = stdout(&signage(
        dir,
        &db,
        &["layout", "copy", &layout_id, "--name", "Lobby 2"],
    ));
    assert!(out.starts_with("Copied Lobby 2"));
    let copy_id = field(&out, "layout_id");
    assert_ne!(copy_id, layout_id);

    let out = stdout(&signage(dir, &db, &["layout", "delete", &layout_id]));
    assert_eq!(out.trim(), "Deleted Lobby");

    let conn = Connection::open(&db).unwrap();
    let remaining: String = conn
        .query_row("SELECT layout FROM layout", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, "Lobby 2");
}

#[test]
fn test_delete_uses_configured_fallback_layout() {
    let (temp_dir, db) = setup();
    let dir = temp_dir.path();
    std::fs::write(dir.join("signage.toml"), "fallback_layout_id = 77\n").unwrap();
    let layout_id = add_layout(dir, &db, "Lobby");

    let conn = Connection::open(&db).unwrap();
    conn.execute(
        "INSERT INTO display (display, defaultLayoutId) VALUES ('foyer', ?1)",
        [layout_id.parse::<i64>().unwrap()],
    )
    .unwrap();
    drop(conn);

    stdout(&signage(dir, &db, &["layout", "delete", &layout_id]));

    let conn = Connection::open(&db).unwrap();
    let default_layout: i64 = conn
        .query_row("SELECT defaultLayoutId FROM display", [], |row| row.get(0))
        .unwrap();
    assert_eq!(default_layout, 77);
}

#[test]
fn test_set_owner() {
    let (temp_dir, db) = setup();
    let dir = temp_dir.path();
    let layout_id = add_layout(dir, &db, "Lobby");

    let out = stdout(&signage(
        dir,
        &db,
        &["layout", "set-owner", &layout_id, "--owner", "5"],
    ));
    assert_eq!(out.trim(), "Owner of Lobby set to 5");
}

#[test]
fn test_application_add_list_authorize() {
    let (temp_dir, db) = setup();
    let dir = temp_dir.path();
    let callback = "https://kiosk.example/cb";

    let out = stdout(&signage(
        dir,
        &db,
        &["application", "add", "--name", "Kiosk", "--redirect-uri", callback],
    ));
    assert!(out.starts_with("Added Kiosk"));
    let client_id = field(&out, "client_id");
    assert_eq!(client_id.len(), 40);

    let out = stdout(&signage(dir, &db, &["application", "list"]));
    assert!(out.contains(&client_id));
    assert!(out.contains("total: 1"));

    let out = stdout(&signage(
        dir,
        &db,
        &[
            "application", "authorize", "--client-id", &client_id, "--redirect-uri", callback,
            "--user", "3", "--state", "abc",
        ],
    ));
    assert!(out.starts_with("https://kiosk.example/cb?code="));
    assert!(out.trim().ends_with("&state=abc"));

    let out = stdout(&signage(
        dir,
        &db,
        &[
            "application", "authorize", "--client-id", &client_id, "--redirect-uri", callback,
            "--user", "3", "--decision", "Deny",
        ],
    ));
    assert!(out.contains("error=access_denied"));
}
