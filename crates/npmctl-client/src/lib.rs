//! # npmctl-client
//!
//! Client library for the Nginx Proxy Manager REST API.
//!
//! The API is session based: credentials are exchanged once for a bearer
//! token, and that token is attached to every resource call. This crate
//! exposes the exchange and the proxy host resource operations:
//! - `POST /tokens` via [`NpmClient::authenticate`]
//! - `GET /nginx/proxy-hosts` via [`NpmClient::list_hosts`]
//! - `POST /nginx/proxy-hosts` via [`NpmClient::create_host`]
//! - `DELETE /nginx/proxy-hosts/{id}` via [`NpmClient::delete_host`]
//!
//! Failures are reported as [`ClientError`], classified by
//! [`ClientError::kind`] into authentication, API and transport failures.

pub mod client;
pub mod error;

pub use client::NpmClient;
pub use error::{ClientError, ErrorKind, Operation};
