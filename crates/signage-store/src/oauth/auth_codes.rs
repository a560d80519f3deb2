use chrono::Utc;
use rusqlite::{params, Connection};
use signage_core::errors::{ExResult, SignageError};
use signage_core::oauth::{generate_secure_key, redirect_with, AuthParams, AuthorizationServer};

use super::applications::get_application;
use crate::errors::from_rusqlite;

/// Length of an issued authorization code
pub const AUTH_CODE_LEN: usize = 40;

/// Lifetime of an issued authorization code
pub const AUTH_CODE_TTL_SECS: i64 = 600;

/// Authorization server issuing codes into the `oauth_*` tables
pub struct SqliteAuthCodeServer<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteAuthCodeServer<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl AuthorizationServer for SqliteAuthCodeServer<'_> {
    /// Creates a session and a short-lived code, then redirects with
    /// `code` (and `state` when the client sent one)
    fn new_authorize_request(
        &self,
        owner_type: &str,
        owner_id: i64,
        request: &AuthParams,
    ) -> ExResult<String> {
        let client = get_application(self.conn, &request.client_id)?.ok_or_else(|| {
            SignageError::ApplicationNotFound {
                client_id: request.client_id.clone(),
            }
        })?;
        if !client.redirect_uris.contains(&request.redirect_uri) {
            return Err(SignageError::RedirectUriMismatch {
                client_id: request.client_id.clone(),
                redirect_uri: request.redirect_uri.clone(),
            }
            .into());
        }

        self.conn
            .execute(
                "INSERT INTO oauth_sessions (owner_type, owner_id, client_id, client_redirect_uri)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    owner_type,
                    owner_id.to_string(),
                    request.client_id,
                    request.redirect_uri
                ],
            )
            .map_err(from_rusqlite)?;
        let session_id = self.conn.last_insert_rowid();

        let code = generate_secure_key(AUTH_CODE_LEN);
        let expire_time = Utc::now().timestamp() + AUTH_CODE_TTL_SECS;
        self.conn
            .execute(
                "INSERT INTO oauth_auth_codes (id, session_id, redirect_uri, expire_time)
                 VALUES (?1, ?2, ?3, ?4)",
                params![code, session_id, request.redirect_uri, expire_time],
            )
            .map_err(from_rusqlite)?;
        for scope in &request.scopes {
            self.conn
                .execute(
                    "INSERT INTO oauth_auth_code_scopes (auth_code, scope) VALUES (?1, ?2)",
                    params![code, scope],
                )
                .map_err(from_rusqlite)?;
        }

        tracing::info!(client_id = %request.client_id, session_id, "authorization code issued");

        let mut pairs = vec![("code", code.as_str())];
        if let Some(state) = request.state.as_deref() {
            pairs.push(("state", state));
        }
        redirect_with(&request.redirect_uri, &pairs).map_err(Into::into)
    }
}
