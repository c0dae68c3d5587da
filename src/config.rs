//! Explicit configuration for the publisher and the GitHub client.
//!
//! Credentials and retry limits are resolved once at startup and passed in
//! at construction; nothing below reads process-wide state on its own.

use crate::error::{PublishError, Result};

/// Organization owning both release repositories
pub const DEFAULT_OWNER: &str = "electron";
/// Repository holding stable releases
pub const DEFAULT_STABLE_REPO: &str = "electron";
/// Repository holding nightly releases
pub const DEFAULT_NIGHTLY_REPO: &str = "nightlies";
/// REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Upload API base URL
pub const DEFAULT_UPLOADS_URL: &str = "https://uploads.github.com";

/// Retries beyond the first upload attempt
pub const DEFAULT_UPLOAD_RETRIES: u32 = 4;
const MAX_UPLOAD_RETRIES: u32 = 20;

/// GitHub endpoint and credential configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Repository owner
    pub owner: String,
    /// Repository receiving stable releases
    pub stable_repo: String,
    /// Repository receiving nightly releases
    pub nightly_repo: String,
    /// Token sent as a bearer credential
    pub token: String,
    /// REST API base URL (no trailing slash)
    pub api_url: String,
    /// Upload API base URL (no trailing slash)
    pub uploads_url: String,
    /// User-Agent header value
    pub user_agent: String,
}

impl GitHubConfig {
    /// Configuration targeting github.com with the default repositories
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            stable_repo: DEFAULT_STABLE_REPO.to_string(),
            nightly_repo: DEFAULT_NIGHTLY_REPO.to_string(),
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            uploads_url: DEFAULT_UPLOADS_URL.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }

    /// Check required fields and normalize base URLs
    pub fn validate(mut self) -> Result<Self> {
        if self.token.trim().is_empty() {
            return Err(PublishError::Config {
                reason: "GitHub token not provided. Set ELECTRON_GITHUB_TOKEN or use --token"
                    .to_string(),
            });
        }
        for (field, value) in [
            ("owner", &self.owner),
            ("stable repository", &self.stable_repo),
            ("nightly repository", &self.nightly_repo),
        ] {
            if value.trim().is_empty() {
                return Err(PublishError::Config {
                    reason: format!("GitHub {} must not be empty", field),
                });
            }
        }
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        self.uploads_url = self.uploads_url.trim_end_matches('/').to_string();
        Ok(self)
    }
}

/// Retry limits for network operations
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Max retries for file uploads after the first attempt
    pub file_uploads: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            file_uploads: DEFAULT_UPLOAD_RETRIES,
        }
    }
}

impl RetryConfig {
    /// Parse retry count from an environment variable, clamped to `max`
    fn parse_retry_env(var_name: &str, default: u32, max: u32) -> u32 {
        std::env::var(var_name)
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map(|v| v.min(max))
            .unwrap_or(default)
    }

    /// Create config from `UPLOAD_RETRIES` with fallback to the default
    pub fn from_env() -> Self {
        Self {
            file_uploads: Self::parse_retry_env(
                "UPLOAD_RETRIES",
                DEFAULT_UPLOAD_RETRIES,
                MAX_UPLOAD_RETRIES,
            ),
        }
    }

    /// Use an explicit retry count
    pub fn with_uploads(file_uploads: u32) -> Self {
        Self { file_uploads }
    }

    /// Validate retry counts are reasonable
    pub fn validate(&self) -> Result<()> {
        if self.file_uploads > MAX_UPLOAD_RETRIES {
            return Err(PublishError::Config {
                reason: format!(
                    "file_uploads retry count too high: {} (max: {})",
                    self.file_uploads, MAX_UPLOAD_RETRIES
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_rejected() {
        let err = GitHubConfig::new("  ").validate().unwrap_err();
        assert!(matches!(err, PublishError::Config { .. }));
    }

    #[test]
    fn test_trailing_slashes_trimmed() {
        let mut config = GitHubConfig::new("token");
        config.api_url = "http://localhost:8080/".to_string();
        let config = config.validate().unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.uploads_url, DEFAULT_UPLOADS_URL);
    }

    #[test]
    fn test_retry_defaults_and_limits() {
        assert_eq!(RetryConfig::default().file_uploads, 4);
        assert!(RetryConfig::with_uploads(20).validate().is_ok());
        assert!(RetryConfig::with_uploads(21).validate().is_err());
    }
}
