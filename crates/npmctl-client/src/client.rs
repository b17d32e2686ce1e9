//! HTTP client for the Nginx Proxy Manager API.
//!
//! The client holds one connection configuration and, after a successful
//! [`NpmClient::authenticate`], one bearer token. Every resource call is a
//! single request/response round trip bounded by the configured timeout.
//! Nothing is retried and the token is never refreshed.
//!
//! # Examples
//!
//! ```no_run
//! use npmctl_client::NpmClient;
//! use npmctl_common::{ClientConfig, Credentials};
//!
//! # async fn example() -> Result<(), npmctl_client::ClientError> {
//! let mut client = NpmClient::new(ClientConfig::new("http://npm.local:81/api"))?;
//! client
//!     .authenticate(&Credentials::new("admin@example.com", "changeme"))
//!     .await?;
//!
//! for host in client.list_hosts().await? {
//!     println!("{} -> {}", host.id, host.forward_target());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! The token is stored as a [`SecretString`] and redacted from `Debug` output.

use std::time::Duration;

use log::{debug, error, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use npmctl_common::{ClientConfig, Credentials, ProxyHost, TokenResponse};

use crate::error::{ClientError, Operation};

const TOKENS_ENDPOINT: &str = "tokens";
const PROXY_HOSTS_ENDPOINT: &str = "nginx/proxy-hosts";

/// Client for the Nginx Proxy Manager REST API.
pub struct NpmClient {
    client: reqwest::Client,
    config: ClientConfig,
    token: Option<SecretString>,
}

// Custom Debug implementation to avoid exposing the token
impl std::fmt::Debug for NpmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NpmClient")
            .field("config", &self.config)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl NpmClient {
    /// Create a new client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            config,
            token: None,
        })
    }

    /// Get the client's configuration.
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a token has been obtained.
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Exchange credentials for a bearer token and keep it for later calls.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthRejected`] on any status other than 200,
    /// [`ClientError::InvalidTokenResponse`] if the body carries no token, and
    /// a transport error if the request does not complete.
    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), ClientError> {
        let url = self.config.endpoint(TOKENS_ENDPOINT);
        debug!("Requesting token for '{}' from {url}", credentials.identity);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(
                serde_json::to_string(&credentials.token_request())
                    .map_err(ClientError::SerializationError)?,
            )
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Token request failed with status {}", status.as_u16());
            return Err(ClientError::AuthRejected {
                status: status.as_u16(),
            });
        }

        let response_text = response.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&response_text).map_err(ClientError::InvalidTokenResponse)?;

        if let Some(expires) = &token.expires {
            debug!("Token expires at {expires}");
        }

        self.token = Some(SecretString::new(token.token.into()));
        Ok(())
    }

    /// List all proxy hosts, in the order the server returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is not authenticated, the server does
    /// not answer 200, or the body is not an array of proxy hosts.
    pub async fn list_hosts(&self) -> Result<Vec<ProxyHost>, ClientError> {
        let operation = Operation::ListHosts;
        let response = self
            .authorized(Method::GET, PROXY_HOSTS_ENDPOINT)?
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Self::unexpected_status(operation, response, false).await);
        }

        Self::decode(operation, response).await
    }

    /// Create a proxy host and return the record the server stored.
    ///
    /// Only the fields set on `host` matter; the identifier and timestamps
    /// are assigned by the server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] without sending anything if
    /// `host` breaks the creation invariants, and an
    /// [`ClientError::UnexpectedStatus`] carrying the raw body on any status
    /// other than 201.
    pub async fn create_host(&self, host: &ProxyHost) -> Result<ProxyHost, ClientError> {
        host.validate_for_create()?;

        let operation = Operation::CreateHost;
        let response = self
            .authorized(Method::POST, PROXY_HOSTS_ENDPOINT)?
            .body(serde_json::to_string(host).map_err(ClientError::SerializationError)?)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            return Err(Self::unexpected_status(operation, response, true).await);
        }

        Self::decode(operation, response).await
    }

    /// Delete the proxy host with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is not authenticated or the server
    /// answers anything other than 200 or 204.
    pub async fn delete_host(&self, id: u64) -> Result<(), ClientError> {
        let operation = Operation::DeleteHost;
        let response = self
            .authorized(Method::DELETE, &format!("{PROXY_HOSTS_ENDPOINT}/{id}"))?
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => {
                debug!("Deleted proxy host {id}");
                Ok(())
            }
            _ => Err(Self::unexpected_status(operation, response, false).await),
        }
    }

    fn authorized(&self, method: Method, endpoint: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_ref().ok_or(ClientError::NotAuthenticated)?;
        let url = self.config.endpoint(endpoint);
        debug!("{method} {url}");

        Ok(self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()))
            .header(CONTENT_TYPE, "application/json"))
    }

    async fn decode<T: DeserializeOwned>(
        operation: Operation,
        response: Response,
    ) -> Result<T, ClientError> {
        let response_text = response.text().await?;
        debug!("Raw API response: {response_text}");

        serde_json::from_str(&response_text)
            .map_err(|source| ClientError::InvalidResponse { operation, source })
    }

    async fn unexpected_status(
        operation: Operation,
        response: Response,
        keep_body: bool,
    ) -> ClientError {
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Failed to read error response body: {e}");
                None
            }
        };

        error!(
            "Request to {operation} failed with status {status}: {}",
            body.as_deref().unwrap_or_default()
        );

        ClientError::UnexpectedStatus {
            operation,
            status,
            body: if keep_body { body } else { None },
        }
    }
}
