#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;

use signage_core::errors::{ExErrorKind, ExResult};
use signage_core::oauth::{
    authorize, AuthParams, AuthorizationDecision, AuthorizationServer, ClientRegistration,
};

/// Records approvals and answers with a fixed code
#[derive(Default)]
struct FakeServer {
    requests: RefCell<Vec<(String, i64, String)>>,
}

impl AuthorizationServer for FakeServer {
    fn new_authorize_request(
        &self,
        owner_type: &str,
        owner_id: i64,
        params: &AuthParams,
    ) -> ExResult<String> {
        self.requests.borrow_mut().push((
            owner_type.to_string(),
            owner_id,
            params.client_id.clone(),
        ));
        Ok(format!("{}?code=fixed", params.redirect_uri))
    }
}

#[test]
fn test_approve_delegates_to_server_as_user() {
    let server = FakeServer::default();
    let params = AuthParams::new("client-1", "https://app.example/cb");

    let uri = authorize(&server, AuthorizationDecision::Approve, 12, &params).unwrap();

    assert_eq!(uri, "https://app.example/cb?code=fixed");
    assert_eq!(
        server.requests.borrow().as_slice(),
        &[("user".to_string(), 12, "client-1".to_string())]
    );
}

#[test]
fn test_deny_redirects_with_access_denied() {
    let server = FakeServer::default();
    let params = AuthParams::new("client-1", "https://app.example/cb").with_state("xyz");

    let decision = AuthorizationDecision::parse("Deny");
    let uri = authorize(&server, decision, 12, &params).unwrap();

    let parsed = url::Url::parse(&uri).unwrap();
    let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("error".to_string(), "access_denied".to_string()),
            (
                "message".to_string(),
                "The resource owner or authorization server denied the request.".to_string()
            ),
        ]
    );
    assert!(server.requests.borrow().is_empty());
}

#[test]
fn test_deny_with_bad_redirect_is_invalid_argument() {
    let server = FakeServer::default();
    let params = AuthParams::new("client-1", "not a uri");

    let err = authorize(&server, AuthorizationDecision::Deny, 1, &params).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidArgument);
}

#[test]
fn test_registrations_get_unique_credentials() {
    let a = ClientRegistration::generate("Kiosk", "https://kiosk.example/cb").unwrap();
    let b = ClientRegistration::generate("Kiosk", "https://kiosk.example/cb").unwrap();

    assert_ne!(a.client_id(), b.client_id());
    assert_ne!(a.secret().expose(), b.secret().expose());
    assert_eq!(format!("{}", a.secret()), "***REDACTED***");
}
