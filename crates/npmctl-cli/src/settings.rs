//! Effective connection settings for one invocation.
//!
//! Values come from, in order of precedence: command-line flags, the
//! `NPM_API_URL` / `NPM_USERNAME` / `NPM_PASSWORD` environment variables, an
//! optional TOML settings file, and built-in defaults.
//!
//! ## Example Settings File
//!
//! ```toml
//! api_url = "http://npm.local:81/api"
//! username = "admin@example.com"
//! timeout_seconds = 10
//! ```
//!
//! The file never holds a password.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use npmctl_common::{ClientConfig, Credentials, DEFAULT_TIMEOUT_SECONDS};

use crate::args::GlobalArgs;

/// API URL used when neither a flag, the environment nor a file sets one.
pub const DEFAULT_API_URL: &str = "http://dockernuc:81/api";

pub const API_URL_ENV: &str = "NPM_API_URL";
pub const USERNAME_ENV: &str = "NPM_USERNAME";
pub const PASSWORD_ENV: &str = "NPM_PASSWORD";

/// Errors loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An explicitly requested file does not exist.
    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Optional settings read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub api_url: Option<String>,
    pub username: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl FileSettings {
    /// Returns the default settings file path, `<config_dir>/npmctl/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("npmctl").join("config.toml"))
    }

    /// Loads settings from `explicit`, or from the default path if none is given.
    ///
    /// A missing default file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or if any file that
    /// exists cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        match explicit {
            Some(path) if !path.exists() => Err(SettingsError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_path(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn from_path(path: &Path) -> Result<Self, SettingsError> {
        debug!("Loading settings from {}", path.display());

        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved settings, built once per invocation and shared read-only.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub username: String,
    pub password: SecretString,
    pub timeout_seconds: u64,
}

impl Settings {
    /// Resolves settings against the process environment.
    pub fn from_env(flags: &GlobalArgs, file: &FileSettings) -> Self {
        Self::resolve(flags, file, |key| std::env::var(key).ok())
    }

    /// Resolves settings with `lookup` standing in for the environment.
    ///
    /// A flag wins when it differs from its default (the built-in URL, or
    /// empty for the credentials). Otherwise a non-empty environment value
    /// is used, then the file, then the default.
    pub fn resolve<F>(flags: &GlobalArgs, file: &FileSettings, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| non_empty(lookup(key));

        let api_url = Some(flags.api_url.clone())
            .filter(|url| url != DEFAULT_API_URL)
            .and_then(|url| non_empty(Some(url)))
            .or_else(|| env(API_URL_ENV))
            .or_else(|| non_empty(file.api_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let username = non_empty(flags.username.clone())
            .or_else(|| env(USERNAME_ENV))
            .or_else(|| non_empty(file.username.clone()))
            .unwrap_or_default();

        let password = non_empty(flags.password.clone())
            .or_else(|| env(PASSWORD_ENV))
            .unwrap_or_default();

        let timeout_seconds = file
            .timeout_seconds
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Self {
            api_url,
            username,
            password: SecretString::new(password.into()),
            timeout_seconds,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout(self.timeout_seconds)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            identity: self.username.clone(),
            secret: self.password.clone(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
