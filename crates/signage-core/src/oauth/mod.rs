//! OAuth client applications and authorization-code approval

pub mod authorize;
pub mod client;

pub use authorize::{
    authorize, redirect_with, AuthParams, AuthorizationDecision, AuthorizationServer,
    ACCESS_DENIED, ACCESS_DENIED_MESSAGE, OWNER_TYPE_USER,
};
pub use client::{
    generate_secure_key, parse_redirect_uri, ApplicationPage, ApplicationQuery,
    ApplicationSummary, ClientRegistration, CLIENT_ID_LEN, CLIENT_SECRET_LEN,
};
