//! Transaction boundary for engine commands

use rusqlite::{Connection, Transaction};
use signage_store::errors::{from_rusqlite, Result};

/// Run `work` inside one transaction
///
/// Commits when `work` succeeds. On error the transaction is dropped, which
/// rolls back every statement `work` issued.
pub fn in_transaction<T, F>(conn: &mut Connection, work: F) -> Result<T>
where
    F: FnOnce(&Transaction<'_>) -> Result<T>,
{
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let value = work(&tx)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(value)
}
