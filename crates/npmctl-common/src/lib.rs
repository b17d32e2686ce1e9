//! # npmctl-common
//!
//! Common types for talking to the Nginx Proxy Manager REST API.
//!
//! This crate provides the data model shared by the client library and the CLI:
//! - Proxy host records as the API serves and accepts them
//! - Login credentials and the token exchange wire types
//! - Client connection configuration
//!
//! ## Example
//!
//! ```
//! use npmctl_common::{ForwardScheme, ProxyHost};
//!
//! let host = ProxyHost::builder()
//!     .domain_names(vec!["example.com".to_string()])
//!     .forward_host("192.168.1.100")
//!     .forward_port(8080)
//!     .forward_scheme(ForwardScheme::Http)
//!     .enabled(true)
//!     .block_exploits(true)
//!     .build();
//!
//! assert_eq!(host.forward_target(), "http://192.168.1.100:8080");
//! assert!(host.validate_for_create().is_ok());
//! ```

/// Credentials and the token exchange wire types.
pub mod auth;
/// Client connection configuration.
pub mod client;
/// Proxy host records and forwarding schemes.
pub mod proxy_host;

pub use auth::{Credentials, TokenRequest, TokenResponse};
pub use client::{ClientConfig, DEFAULT_TIMEOUT_SECONDS};
pub use proxy_host::{ForwardScheme, InvalidProxyHost, ParseSchemeError, ProxyHost};
