use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use typed_builder::TypedBuilder;

/// Scheme used to reach the forward target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForwardScheme {
    /// Plain HTTP to the backend.
    #[default]
    Http,
    /// TLS to the backend.
    Https,
}

impl ForwardScheme {
    /// Returns the lowercase wire name of the scheme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for ForwardScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known forward scheme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid forward scheme '{0}' (expected http or https)")]
pub struct ParseSchemeError(pub String);

impl FromStr for ForwardScheme {
    type Err = ParseSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            _ => Err(ParseSchemeError(s.to_string())),
        }
    }
}

/// Reasons a proxy host cannot be submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidProxyHost {
    /// No domain names were given.
    #[error("at least one domain name is required")]
    NoDomainNames,

    /// One of the domain names is blank.
    #[error("domain names must not be empty")]
    EmptyDomainName,

    /// The forward host is blank.
    #[error("forward host must not be empty")]
    EmptyForwardHost,

    /// The forward port is zero.
    #[error("forward port must be greater than zero")]
    ZeroForwardPort,
}

/// A proxy host as served by `GET /nginx/proxy-hosts` and accepted by
/// `POST /nginx/proxy-hosts`.
///
/// The identifier and the timestamps are assigned by the server. They are left
/// out of request bodies while unset, so a freshly built host serializes to
/// only the fields the caller chose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct ProxyHost {
    /// Server-assigned identifier, `0` until the host has been created.
    #[serde(default, skip_serializing_if = "is_unassigned")]
    #[builder(default)]
    pub id: u64,

    /// Public domain names routed by this host, in order.
    #[serde(default)]
    pub domain_names: Vec<String>,

    /// Scheme used to reach the backend.
    #[serde(default)]
    #[builder(default)]
    pub forward_scheme: ForwardScheme,

    /// Backend host name or address.
    #[serde(default)]
    #[builder(setter(into))]
    pub forward_host: String,

    /// Backend port.
    #[serde(default)]
    pub forward_port: u16,

    /// Access list applied to this host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub access_list_id: Option<u64>,

    /// Certificate served for this host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub certificate_id: Option<u64>,

    /// Redirect plain HTTP requests to HTTPS.
    #[serde(default)]
    #[builder(default)]
    pub ssl_forced: bool,

    /// Cache static assets at the proxy.
    #[serde(default)]
    #[builder(default)]
    pub caching_enabled: bool,

    /// Reject requests matching common exploit patterns.
    #[serde(default)]
    #[builder(default)]
    pub block_exploits: bool,

    /// Raw nginx directives appended to the generated server block.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub advanced_config: String,

    /// Whether the host is active.
    #[serde(default)]
    #[builder(default)]
    pub enabled: bool,

    /// Creation timestamp, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub created_on: Option<String>,

    /// Last modification timestamp, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub modified_on: Option<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_unassigned(id: &u64) -> bool {
    *id == 0
}

impl ProxyHost {
    /// Renders the forward target as `scheme://host:port`.
    #[must_use]
    pub fn forward_target(&self) -> String {
        format!(
            "{}://{}:{}",
            self.forward_scheme, self.forward_host, self.forward_port
        )
    }

    /// Checks the invariants the server requires of a new host.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain list is empty or holds a blank entry,
    /// the forward host is blank, or the forward port is zero.
    pub fn validate_for_create(&self) -> Result<(), InvalidProxyHost> {
        if self.domain_names.is_empty() {
            return Err(InvalidProxyHost::NoDomainNames);
        }
        if self.domain_names.iter().any(|d| d.trim().is_empty()) {
            return Err(InvalidProxyHost::EmptyDomainName);
        }
        if self.forward_host.trim().is_empty() {
            return Err(InvalidProxyHost::EmptyForwardHost);
        }
        if self.forward_port == 0 {
            return Err(InvalidProxyHost::ZeroForwardPort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    fn sample_host() -> ProxyHost {
        ProxyHost::builder()
            .domain_names(vec!["example.com".to_string()])
            .forward_host("192.168.1.100")
            .forward_port(8080)
            .enabled(true)
            .block_exploits(true)
            .build()
    }

    #[test]
    fn test_new_host_body_omits_server_fields() {
        let value = serde_json::to_value(sample_host()).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("created_on"));
        assert!(!obj.contains_key("modified_on"));
        assert!(!obj.contains_key("access_list_id"));
        assert!(!obj.contains_key("certificate_id"));
        assert_eq!(value["domain_names"], serde_json::json!(["example.com"]));
        assert_eq!(value["forward_scheme"], "http");
        assert_eq!(value["forward_host"], "192.168.1.100");
        assert_eq!(value["forward_port"], 8080);
        assert_eq!(value["enabled"], true);
        assert_eq!(value["block_exploits"], true);
        assert_eq!(value["ssl_forced"], false);
    }

    #[test]
    fn test_deserialize_server_record() {
        let raw = serde_json::json!({
            "id": 7,
            "created_on": "2024-01-02 03:04:05",
            "modified_on": "2024-01-03 03:04:05",
            "owner_user_id": 1,
            "domain_names": ["a.example.com", "b.example.com"],
            "forward_scheme": "https",
            "forward_host": "backend",
            "forward_port": 443,
            "access_list_id": 0,
            "certificate_id": 3,
            "ssl_forced": true,
            "caching_enabled": false,
            "block_exploits": true,
            "advanced_config": "",
            "enabled": true,
            "meta": {"nginx_online": true}
        });

        let host: ProxyHost = serde_json::from_value(raw).unwrap();
        assert_eq!(host.id, 7);
        assert_eq!(host.domain_names, vec!["a.example.com", "b.example.com"]);
        assert_eq!(host.forward_scheme, ForwardScheme::Https);
        assert_eq!(host.certificate_id, Some(3));
        assert_eq!(host.created_on.as_deref(), Some("2024-01-02 03:04:05"));
        assert_eq!(host.forward_target(), "https://backend:443");
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let host: ProxyHost = serde_json::from_str(r#"{"id": 2}"#).unwrap();
        assert_eq!(host.id, 2);
        assert!(host.domain_names.is_empty());
        assert_eq!(host.forward_scheme, ForwardScheme::Http);
        assert!(!host.enabled);
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("http".parse::<ForwardScheme>(), Ok(ForwardScheme::Http));
        assert_eq!("HTTPS".parse::<ForwardScheme>(), Ok(ForwardScheme::Https));
        assert_eq!(
            "ftp".parse::<ForwardScheme>(),
            Err(ParseSchemeError("ftp".to_string()))
        );
        assert_eq!(ForwardScheme::Https.to_string(), "https");
    }

    #[test]
    fn test_validate_for_create() {
        assert_eq!(sample_host().validate_for_create(), Ok(()));

        let mut host = sample_host();
        host.domain_names.clear();
        assert_eq!(
            host.validate_for_create(),
            Err(InvalidProxyHost::NoDomainNames)
        );

        let mut host = sample_host();
        host.domain_names.push("  ".to_string());
        assert_eq!(
            host.validate_for_create(),
            Err(InvalidProxyHost::EmptyDomainName)
        );

        let mut host = sample_host();
        host.forward_host = String::new();
        assert_eq!(
            host.validate_for_create(),
            Err(InvalidProxyHost::EmptyForwardHost)
        );

        let mut host = sample_host();
        host.forward_port = 0;
        assert_eq!(
            host.validate_for_create(),
            Err(InvalidProxyHost::ZeroForwardPort)
        );
    }
}
