use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use signage_core::oauth::{ApplicationPage, ApplicationQuery, ApplicationSummary, ClientRegistration};

use crate::errors::{from_rusqlite, Result};

/// Store a client and its redirect URI
///
/// Runs two inserts; callers wanting atomicity pass a transaction.
pub fn insert_application(conn: &Connection, registration: &ClientRegistration) -> Result<()> {
    conn.execute(
        "INSERT INTO oauth_clients (id, secret, name) VALUES (?1, ?2, ?3)",
        params![
            registration.client_id(),
            registration.secret().expose(),
            registration.name()
        ],
    )
    .map_err(from_rusqlite)?;

    conn.execute(
        "INSERT INTO oauth_client_redirect_uris (client_id, redirect_uri) VALUES (?1, ?2)",
        params![registration.client_id(), registration.redirect_uri()],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

fn redirect_uris(conn: &Connection, client_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT redirect_uri FROM oauth_client_redirect_uris WHERE client_id = ? ORDER BY id",
        )
        .map_err(from_rusqlite)?;
    let uris = stmt
        .query_map([client_id], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<rusqlite::Result<Vec<String>>>()
        .map_err(from_rusqlite)?;
    Ok(uris)
}

/// Fetch one application by client id
pub fn get_application(conn: &Connection, client_id: &str) -> Result<Option<ApplicationSummary>> {
    let name: Option<String> = conn
        .query_row(
            "SELECT name FROM oauth_clients WHERE id = ?",
            [client_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    let Some(name) = name else {
        return Ok(None);
    };
    Ok(Some(ApplicationSummary {
        client_id: client_id.to_string(),
        name,
        redirect_uris: redirect_uris(conn, client_id)?,
    }))
}

/// Applications sorted by name, filtered and paged, with the filtered total
pub fn list_applications(conn: &Connection, query: &ApplicationQuery) -> Result<ApplicationPage> {
    let mut where_clause = String::new();
    let mut args: Vec<Value> = Vec::new();
    if let Some(name) = query.name.as_deref().filter(|n| !n.is_empty()) {
        where_clause.push_str(" WHERE name LIKE ?");
        args.push(Value::Text(format!("%{}%", name)));
    }

    let total: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM oauth_clients{}", where_clause),
            params_from_iter(args.iter()),
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;

    let mut sql = format!(
        "SELECT id, name FROM oauth_clients{} ORDER BY name, id",
        where_clause
    );
    // SQLite needs a LIMIT before OFFSET; -1 means unbounded
    sql.push_str(" LIMIT ? OFFSET ?");
    args.push(Value::Integer(
        query.length.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX)),
    ));
    args.push(Value::Integer(i64::try_from(query.start).unwrap_or(i64::MAX)));

    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let clients = stmt
        .query_map(params_from_iter(args.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(from_rusqlite)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(from_rusqlite)?;

    let mut rows = Vec::with_capacity(clients.len());
    for (client_id, name) in clients {
        let redirect_uris = redirect_uris(conn, &client_id)?;
        rows.push(ApplicationSummary {
            client_id,
            name,
            redirect_uris,
        });
    }

    Ok(ApplicationPage {
        rows,
        total: usize::try_from(total).unwrap_or_default(),
    })
}
