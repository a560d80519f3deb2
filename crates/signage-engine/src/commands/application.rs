//! OAuth application commands

use rusqlite::Connection;
use serde::Serialize;
use signage_core::oauth::{
    authorize, ApplicationPage, ApplicationQuery, AuthParams, AuthorizationDecision,
    ClientRegistration,
};
use signage_core_types::RequestContext;
use signage_store::errors::Result;
use signage_store::oauth;
use signage_store::SqliteAuthCodeServer;

use super::unit_of_work::in_transaction;
use super::with_context;

/// What a caller sees after registering an application
///
/// The secret is stored but never echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredApplication {
    pub client_id: String,
    pub name: String,
    pub message: String,
}

/// Register a client application with fresh credentials
///
/// # Errors
/// * `InvalidArgument` - empty name or unparseable redirect URI
/// * storage errors
pub fn register_application(
    conn: &mut Connection,
    ctx: &RequestContext,
    name: &str,
    redirect_uri: &str,
) -> Result<RegisteredApplication> {
    let _span = tracing::info_span!("application_add", request_id = %ctx.request_id).entered();

    let registration = with_context(
        ctx,
        ClientRegistration::generate(name, redirect_uri).map_err(Into::into),
    )?;
    with_context(
        ctx,
        in_transaction(conn, |tx| oauth::insert_application(tx, &registration)),
    )?;

    tracing::info!(client_id = registration.client_id(), "application registered");
    Ok(RegisteredApplication {
        client_id: registration.client_id().to_string(),
        name: registration.name().to_string(),
        message: registration.added_message(),
    })
}

/// One page of registered applications
///
/// # Errors
/// Storage errors only.
pub fn list_applications(
    conn: &Connection,
    ctx: &RequestContext,
    query: &ApplicationQuery,
) -> Result<ApplicationPage> {
    with_context(ctx, oauth::list_applications(conn, query))
}

/// Answer an authorization request on behalf of `user_id`
///
/// Returns the URI the user agent should be redirected to.
///
/// # Errors
/// * `NotFound` - unknown client on approval
/// * `InvalidArgument` - unregistered or unparseable redirect URI
/// * storage errors
pub fn authorize_request(
    conn: &mut Connection,
    ctx: &RequestContext,
    decision: AuthorizationDecision,
    user_id: i64,
    request: &AuthParams,
) -> Result<String> {
    let _span = tracing::info_span!(
        "application_authorize",
        request_id = %ctx.request_id,
        client_id = %request.client_id,
        user_id
    )
    .entered();

    with_context(
        ctx,
        in_transaction(conn, |tx| {
            let server = SqliteAuthCodeServer::new(tx);
            authorize(&server, decision, user_id, request)
        }),
    )
}
