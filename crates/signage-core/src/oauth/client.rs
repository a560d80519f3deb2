//! Client application registration

use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use signage_core_types::Sensitive;
use url::Url;

use crate::errors::{Result, SignageError};

/// Length of a generated client id
pub const CLIENT_ID_LEN: usize = 40;

/// Length of a generated client secret
pub const CLIENT_SECRET_LEN: usize = 254;

/// Random alphanumeric key from the thread-local CSPRNG
pub fn generate_secure_key(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// A new client application ready to be stored
#[derive(Debug, Clone)]
pub struct ClientRegistration {
    client_id: String,
    secret: Sensitive<String>,
    name: String,
    redirect_uri: String,
}

impl ClientRegistration {
    /// Validate the input and generate fresh credentials
    ///
    /// # Errors
    /// * `InvalidApplicationName` - name is empty or whitespace
    /// * `InvalidRedirectUri` - redirect URI is not an absolute URL
    pub fn generate(name: &str, redirect_uri: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SignageError::InvalidApplicationName);
        }
        let redirect_uri = parse_redirect_uri(redirect_uri)?;

        Ok(Self {
            client_id: generate_secure_key(CLIENT_ID_LEN),
            secret: Sensitive::new(generate_secure_key(CLIENT_SECRET_LEN)),
            name: name.to_string(),
            redirect_uri: redirect_uri.into(),
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn secret(&self) -> &Sensitive<String> {
        &self.secret
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Confirmation shown after the application was stored
    pub fn added_message(&self) -> String {
        format!("Added {}", self.name)
    }
}

/// Parse a redirect URI, which must be absolute
///
/// # Errors
/// * `InvalidRedirectUri` - the value does not parse as an absolute URL
pub fn parse_redirect_uri(uri: &str) -> Result<Url> {
    Url::parse(uri).map_err(|e| SignageError::InvalidRedirectUri {
        uri: uri.to_string(),
        reason: e.to_string(),
    })
}

/// A registered application as shown in listings (the secret never leaves storage)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationSummary {
    pub client_id: String,
    pub name: String,
    pub redirect_uris: Vec<String>,
}

/// Grid query for applications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationQuery {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Offset of the first row
    pub start: usize,
    /// Page size; `None` returns every row
    pub length: Option<usize>,
}

impl Default for ApplicationQuery {
    fn default() -> Self {
        Self {
            name: None,
            start: 0,
            length: Some(10),
        }
    }
}

/// One page of applications plus the unpaged total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationPage {
    pub rows: Vec<ApplicationSummary>,
    pub total: usize,
}
