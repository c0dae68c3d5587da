//! Error types for release asset publishing.
//!
//! Intermediate host failures are absorbed by the publisher and drive its
//! retry state machine. Only invalid input and budget exhaustion reach the
//! caller as a [`PublishError`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publishing operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Result type alias for release host calls
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Main error type surfaced to callers of the publisher and the CLI
#[derive(Error, Debug)]
pub enum PublishError {
    /// The upload request failed validation before any network call
    #[error("Invalid upload request: {reason}")]
    InvalidRequest {
        /// Reason for the error
        reason: String,
    },

    /// Missing or malformed configuration (credentials, endpoints)
    #[error("Configuration error: {reason}")]
    Config {
        /// Reason for the error
        reason: String,
    },

    /// Every upload attempt failed and the retry budget is spent
    #[error("Failed to upload '{asset}' after {attempts} attempt(s): {source}")]
    BudgetExhausted {
        /// Asset name that could not be uploaded
        asset: String,
        /// Total number of upload calls made
        attempts: u32,
        /// Error returned by the last upload attempt
        #[source]
        source: HostError,
    },

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),
}

/// Failures reported by a release host.
///
/// Upload failures are retried, deletion failures are logged and swallowed.
#[derive(Error, Debug)]
pub enum HostError {
    /// Transport-level failure (connect, TLS, body decoding)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("GitHub API returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error message
        message: String,
    },

    /// The artifact could not be read from disk
    #[error("Failed to read artifact {}: {source}", path.display())]
    Io {
        /// Artifact path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl HostError {
    /// GitHub answers 422 when an asset with the same name is already attached.
    pub fn is_name_conflict(&self) -> bool {
        matches!(
            self,
            HostError::Api { status: 422, message } if message.contains("already_exists")
        )
    }
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

impl PublishError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PublishError::Config { .. }
            | PublishError::Cli(CliError::MissingArgument { .. }) => vec![
                "Set ELECTRON_GITHUB_TOKEN in the environment or a .env file".to_string(),
                "Or pass the token explicitly with --token".to_string(),
            ],
            PublishError::InvalidRequest { .. } => vec![
                "Check that the artifact path exists and points to a regular file".to_string(),
                "Usage: upload-to-github <FILE_PATH> <FILE_NAME> <RELEASE_ID> <RELEASE_VERSION>"
                    .to_string(),
            ],
            PublishError::BudgetExhausted { source, .. } => match source {
                HostError::Api { status: 401, .. } | HostError::Api { status: 403, .. } => vec![
                    "Verify the token is valid and has write access to the repository"
                        .to_string(),
                ],
                HostError::Api { status: 404, .. } => vec![
                    "Check the release id and that the version selects the right repository"
                        .to_string(),
                ],
                _ => vec![
                    "Check network connectivity to GitHub and rerun the upload".to_string(),
                    "Increase the retry budget with --retries or UPLOAD_RETRIES".to_string(),
                ],
            },
        }
    }
}
