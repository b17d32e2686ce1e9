//! Error types for the client library.

use std::fmt;

use npmctl_common::InvalidProxyHost;
use thiserror::Error;

/// Resource operation a request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /nginx/proxy-hosts`
    ListHosts,
    /// `POST /nginx/proxy-hosts`
    CreateHost,
    /// `DELETE /nginx/proxy-hosts/{id}`
    DeleteHost,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ListHosts => "list proxy hosts",
            Self::CreateHost => "create proxy host",
            Self::DeleteHost => "delete proxy host",
        })
    }
}

/// Coarse classification of a failure.
///
/// Every error surfaced to a user falls into exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input missing or invalid; detected before any network call.
    Validation,
    /// The token exchange was refused or returned garbage.
    Auth,
    /// A resource call returned an unexpected status or body.
    Api,
    /// The request never completed: connection failure or timeout.
    Transport,
}

/// Errors that can occur when talking to the Nginx Proxy Manager API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The token endpoint answered with something other than 200.
    #[error("authentication failed with status: {status}")]
    AuthRejected {
        /// HTTP status returned by `POST /tokens`.
        status: u16,
    },

    /// The token endpoint answered 200 but the body had no usable token.
    #[error("failed to decode auth response: {0}")]
    InvalidTokenResponse(#[source] serde_json::Error),

    /// A resource call returned a status other than the expected one.
    #[error("failed to {operation}, status: {status}{}", body_suffix(.body))]
    UnexpectedStatus {
        operation: Operation,
        status: u16,
        /// Raw response body, kept where it helps diagnose the failure.
        body: Option<String>,
    },

    /// A resource call succeeded but its body could not be decoded.
    #[error("failed to decode response to {operation}: {source}")]
    InvalidResponse {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// The request is invalid and was not sent.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] InvalidProxyHost),

    /// A resource call was attempted before `authenticate` succeeded.
    #[error("client is not authenticated")]
    NotAuthenticated,

    /// Connection, DNS, TLS or malformed URL failure.
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// The round trip exceeded the configured timeout.
    #[error("Timeout error")]
    TimeoutError,

    /// The request body could not be encoded.
    #[error("Serialization error: {0}")]
    SerializationError(#[source] serde_json::Error),
}

#[allow(clippy::ref_option)]
fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map_or_else(String::new, |b| format!(", body: {b}"))
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError
        } else {
            Self::NetworkError(err)
        }
    }
}

impl ClientError {
    /// Classifies this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthRejected { .. } | Self::InvalidTokenResponse(_) | Self::NotAuthenticated => {
                ErrorKind::Auth
            }
            Self::UnexpectedStatus { .. }
            | Self::InvalidResponse { .. }
            | Self::SerializationError(_) => ErrorKind::Api,
            Self::InvalidRequest(_) => ErrorKind::Validation,
            Self::NetworkError(_) | Self::TimeoutError => ErrorKind::Transport,
        }
    }

    /// Check if this is an authentication error.
    pub const fn is_authentication_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Auth)
    }

    /// HTTP status carried by this error, if the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthRejected { status } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body carried by this error, if one was kept.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::UnexpectedStatus { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}
