//! SQLite implementations of the layout repository ports
//!
//! One [`SqliteGateway`] borrows a connection (or a transaction, through
//! `Deref`) and implements every port, so a whole cascade runs on the same
//! connection.

mod campaigns;
mod displays;
mod layouts;
mod permissions;
mod regions;
mod tags;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use signage_core::ports::LayoutRepositories;

use crate::errors::{from_rusqlite, Result};

/// SQLite repository for the layout aggregate
pub struct SqliteGateway<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteGateway<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// The port bundle consumed by `LayoutLifecycle`
    pub fn repositories(&self) -> LayoutRepositories<'_> {
        LayoutRepositories::from_backend(self)
    }

    pub fn connection(&self) -> &'c Connection {
        self.conn
    }
}

/// Delete children of `parent_id` whose ids are not in `keep`
fn delete_missing(
    conn: &Connection,
    table: &str,
    id_column: &str,
    parent_column: &str,
    parent_id: i64,
    keep: &[i64],
) -> Result<usize> {
    let sql = if keep.is_empty() {
        format!("DELETE FROM {} WHERE {} = ?", table, parent_column)
    } else {
        format!(
            "DELETE FROM {} WHERE {} = ? AND {} NOT IN ({})",
            table,
            parent_column,
            id_column,
            vec!["?"; keep.len()].join(", ")
        )
    };

    let params = std::iter::once(parent_id)
        .chain(keep.iter().copied())
        .map(Value::Integer);
    conn.execute(&sql, params_from_iter(params))
        .map_err(from_rusqlite)
}
