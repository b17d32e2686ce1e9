use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Login credentials for the token endpoint.
///
/// The secret is held in a [`SecretString`] so it never shows up in debug
/// output. It is exposed only when the token request body is built.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account identity, usually an email address.
    pub identity: String,
    /// Account password.
    pub secret: SecretString,
}

impl Credentials {
    /// Creates credentials from an identity and a plain-text secret.
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: SecretString::new(secret.into().into()),
        }
    }

    /// Builds the body for `POST /tokens`.
    #[must_use]
    pub fn token_request(&self) -> TokenRequest<'_> {
        TokenRequest {
            identity: &self.identity,
            password: self.secret.expose_secret(),
        }
    }
}

/// Body of `POST /tokens`.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub identity: &'a str,
    pub password: &'a str,
}

/// Successful response of `POST /tokens`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Expiry reported by the server. Informational only.
    #[serde(default)]
    pub expires: Option<String>,
}
