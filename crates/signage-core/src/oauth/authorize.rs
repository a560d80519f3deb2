//! Authorization-code approval flow
//!
//! The user approves or denies an application's request. Approval is handed
//! to an [`AuthorizationServer`]; denial redirects straight back to the
//! client with an `access_denied` error.

use crate::errors::{ExResult, Result};
use crate::oauth::client::parse_redirect_uri;

/// Owner type recorded for sessions approved by a signed-in user
pub const OWNER_TYPE_USER: &str = "user";

/// Error code sent back to the client on denial
pub const ACCESS_DENIED: &str = "access_denied";

/// Message sent back to the client on denial
pub const ACCESS_DENIED_MESSAGE: &str =
    "The resource owner or authorization server denied the request.";

/// Validated parameters of an authorization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub client_id: String,
    pub redirect_uri: String,
    pub state: Option<String>,
    pub scopes: Vec<String>,
    pub response_type: String,
}

impl AuthParams {
    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            state: None,
            scopes: Vec::new(),
            response_type: "code".to_string(),
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

/// The user's answer on the authorization form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Approve,
    Deny,
}

impl AuthorizationDecision {
    /// `"Approve"` approves; anything else denies
    pub fn parse(value: &str) -> Self {
        if value == "Approve" {
            Self::Approve
        } else {
            Self::Deny
        }
    }
}

/// Issues authorization codes for approved requests
pub trait AuthorizationServer {
    /// Record the approval and return the URI to redirect the user to
    ///
    /// # Errors
    /// Implementation specific: unknown clients, unregistered redirect URIs,
    /// storage failures.
    fn new_authorize_request(
        &self,
        owner_type: &str,
        owner_id: i64,
        params: &AuthParams,
    ) -> ExResult<String>;
}

/// Turn the user's decision into the redirect URI
///
/// # Errors
/// * errors from the server on approval
/// * `InvalidArgument` - the redirect URI does not parse on denial
pub fn authorize(
    server: &dyn AuthorizationServer,
    decision: AuthorizationDecision,
    user_id: i64,
    params: &AuthParams,
) -> ExResult<String> {
    match decision {
        AuthorizationDecision::Approve => {
            server.new_authorize_request(OWNER_TYPE_USER, user_id, params)
        }
        AuthorizationDecision::Deny => {
            tracing::info!(client_id = %params.client_id, "authorization denied");
            redirect_with(
                &params.redirect_uri,
                &[("error", ACCESS_DENIED), ("message", ACCESS_DENIED_MESSAGE)],
            )
            .map_err(Into::into)
        }
    }
}

/// Append query parameters to a redirect URI
///
/// # Errors
/// * `InvalidRedirectUri` - the URI does not parse
pub fn redirect_with(redirect_uri: &str, pairs: &[(&str, &str)]) -> Result<String> {
    let mut url = parse_redirect_uri(redirect_uri)?;
    url.query_pairs_mut().extend_pairs(pairs);
    Ok(url.into())
}
