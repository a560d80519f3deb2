use rusqlite::{params, OptionalExtension};
use signage_core::errors::ExResult;
use signage_core::ports::DisplayRepository;

use super::SqliteGateway;
use crate::errors::{from_rusqlite, Result};

impl SqliteGateway<'_> {
    /// Register a display defaulting to `default_layout_id`; returns its id
    pub fn insert_display(&self, display: &str, default_layout_id: i64) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO display (display, defaultLayoutId) VALUES (?1, ?2)",
                params![display, default_layout_id],
            )
            .map_err(from_rusqlite)?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn display_default_layout(&self, display_id: i64) -> Result<Option<i64>> {
        self.conn
            .query_row(
                "SELECT defaultLayoutId FROM display WHERE displayId = ?",
                [display_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)
    }
}

impl DisplayRepository for SqliteGateway<'_> {
    fn repoint_default_layout(&self, from_layout_id: i64, to_layout_id: i64) -> ExResult<usize> {
        self.conn
            .execute(
                "UPDATE display SET defaultLayoutId = ?1 WHERE defaultLayoutId = ?2",
                params![to_layout_id, from_layout_id],
            )
            .map_err(from_rusqlite)
    }
}
