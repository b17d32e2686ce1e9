//! Error types for the CLI.

use std::fmt;

use npmctl_client::{ClientError, ErrorKind};
use thiserror::Error;

/// Step of a command that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connect,
    Authenticate,
    ListHosts,
    CreateHost,
    DeleteHost,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connect => "failed to initialize client",
            Self::Authenticate => "authentication failed",
            Self::ListHosts => "failed to list proxy hosts",
            Self::CreateHost => "failed to create proxy host",
            Self::DeleteHost => "failed to delete proxy host",
        })
    }
}

/// Errors a command can return to the entry point.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid command input, detected before any request.
    #[error("{0}")]
    Validation(String),

    /// A client call failed during `stage`.
    #[error("{stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: ClientError,
    },
}

impl CliError {
    pub const fn at(stage: Stage, source: ClientError) -> Self {
        Self::Stage { stage, source }
    }

    /// Classifies this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Stage { source, .. } => source.kind(),
        }
    }

    /// Stage label for client failures.
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Validation(_) => None,
            Self::Stage { stage, .. } => Some(*stage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_prefixes_client_message() {
        let err = CliError::at(Stage::Authenticate, ClientError::AuthRejected { status: 401 });

        assert_eq!(
            err.to_string(),
            "authentication failed: authentication failed with status: 401"
        );
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.stage(), Some(Stage::Authenticate));
    }

    #[test]
    fn test_validation_kind() {
        let err = CliError::Validation("id is required".to_string());
        assert_eq!(err.to_string(), "id is required");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.stage(), None);
    }
}
