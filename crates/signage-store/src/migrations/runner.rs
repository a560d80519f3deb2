use rusqlite::{params, Connection, OptionalExtension};

use super::embedded::{Migration, MIGRATIONS};
use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};

const CREATE_SCHEMA_VERSION: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    migration_id TEXT NOT NULL UNIQUE,
    applied_at INTEGER NOT NULL,
    checksum TEXT
)";

/// Apply every pending migration; returns the ids applied by this call
///
/// # Errors
/// * `ConstraintViolation` - an applied migration's checksum changed
/// * `Persistence` - a migration's SQL failed
pub fn apply_migrations(conn: &mut Connection) -> Result<Vec<&'static str>> {
    conn.execute(CREATE_SCHEMA_VERSION, [])
        .map_err(from_rusqlite)?;

    let mut applied = Vec::new();
    for migration in MIGRATIONS {
        if apply_one(conn, migration)? {
            applied.push(migration.id);
        }
    }
    Ok(applied)
}

/// Ids of the applied migrations, in application order
///
/// # Errors
/// Storage errors only.
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT migration_id FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<rusqlite::Result<Vec<String>>>()
        .map_err(from_rusqlite)?;
    Ok(ids)
}

/// False when the migration was already applied
fn apply_one(conn: &mut Connection, migration: &Migration) -> Result<bool> {
    let checksum = migration.checksum();

    let recorded: Option<Option<String>> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    match recorded {
        Some(Some(expected)) if expected != checksum => {
            return Err(checksum_mismatch(migration.id, &expected, &checksum));
        }
        Some(_) => return Ok(false),
        None => {}
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;
    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        params![migration.id, chrono::Utc::now().timestamp(), checksum],
    )
    .map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(migration_id = migration.id, "migration applied");
    Ok(true)
}
