//! Command line argument parsing and validation.

use crate::config::{
    DEFAULT_API_URL, DEFAULT_NIGHTLY_REPO, DEFAULT_OWNER, DEFAULT_STABLE_REPO,
    DEFAULT_UPLOADS_URL, GitHubConfig, RetryConfig,
};
use crate::error::{CliError, Result};
use crate::github::ReleaseId;
use crate::publish::{Progress, UploadRequest};
use clap::Parser;
use std::path::PathBuf;

/// One-line usage shown when positional arguments are missing
pub const USAGE: &str =
    "Usage: upload-to-github <FILE_PATH> <FILE_NAME> <RELEASE_ID> <RELEASE_VERSION>";

/// Upload a build artifact to a GitHub release
#[derive(Parser, Debug)]
#[command(
    name = "upload-to-github",
    version,
    about = "Upload a build artifact to a GitHub release",
    long_about = "Upload a build artifact to a GitHub release.

Versions containing \"nightly\" are published to the nightly repository,
everything else to the stable one. A failed upload is retried; when an asset
with the same name is already attached it is deleted before the retry.

Usage:
  upload-to-github out/dist.zip electron-v3.0.0-linux-x64.zip 12345678 3.0.0"
)]
pub struct Args {
    /// Local path of the artifact
    #[arg(index = 1, value_name = "FILE_PATH")]
    pub file_path: PathBuf,

    /// Asset name on the release
    #[arg(index = 2, value_name = "FILE_NAME")]
    pub file_name: String,

    /// Numeric id of the target release
    #[arg(index = 3, value_name = "RELEASE_ID")]
    pub release_id: ReleaseId,

    /// Release version; selects the nightly or stable repository
    #[arg(index = 4, value_name = "RELEASE_VERSION")]
    pub release_version: String,

    /// GitHub token
    #[arg(long, env = "ELECTRON_GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Owner of the release repositories
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Repository for stable releases
    #[arg(long, default_value = DEFAULT_STABLE_REPO)]
    pub stable_repo: String,

    /// Repository for nightly releases
    #[arg(long, default_value = DEFAULT_NIGHTLY_REPO)]
    pub nightly_repo: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// GitHub upload API base URL
    #[arg(long, env = "GITHUB_UPLOADS_URL", default_value = DEFAULT_UPLOADS_URL)]
    pub uploads_url: String,

    /// Retries after the first failed upload (default 4, or UPLOAD_RETRIES)
    #[arg(long)]
    pub retries: Option<u32>,

    /// Show extra progress detail
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output (errors are still shown)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments without exiting the process
    pub fn try_parse_args() -> std::result::Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.file_path.as_os_str().is_empty() {
            return Err("File path is required".to_string());
        }
        if self.file_name.trim().is_empty() {
            return Err("File name is required".to_string());
        }
        if self.release_version.trim().is_empty() {
            return Err("Release version is required".to_string());
        }
        Ok(())
    }

    /// Upload request described by the positional arguments
    pub fn upload_request(&self) -> UploadRequest {
        UploadRequest::new(
            self.file_path.clone(),
            self.file_name.clone(),
            self.release_id,
            self.release_version.clone(),
        )
    }

    /// GitHub configuration; the token must be present
    pub fn github_config(&self) -> Result<GitHubConfig> {
        let token = self
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CliError::MissingArgument {
                argument: "--token (or ELECTRON_GITHUB_TOKEN)".to_string(),
            })?;

        let mut config = GitHubConfig::new(token);
        config.owner = self.owner.clone();
        config.stable_repo = self.stable_repo.clone();
        config.nightly_repo = self.nightly_repo.clone();
        config.api_url = self.api_url.clone();
        config.uploads_url = self.uploads_url.clone();
        config.validate()
    }

    /// Retry configuration, flag first, then environment
    pub fn retry_config(&self) -> RetryConfig {
        match self.retries {
            Some(retries) => RetryConfig::with_uploads(retries),
            None => RetryConfig::from_env(),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }

    /// Check if progress output is suppressed
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }
}

impl Progress for RuntimeConfig {
    fn step(&self, message: &str) {
        self.println(message);
    }

    fn detail(&self, message: &str) {
        self.verbose_println(message);
    }

    fn warn(&self, message: &str) {
        self.warning_println(message);
    }

    fn error(&self, message: &str) {
        self.error_println(message);
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PublishError;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("upload-to-github").chain(args.iter().copied()))
    }

    #[test]
    fn test_positional_arguments() {
        let args = parse(&["build.zip", "app.zip", "42", "3.0.0", "--token", "t"]).unwrap();
        assert_eq!(args.file_path, PathBuf::from("build.zip"));
        assert_eq!(args.release_id, ReleaseId(42));
        assert!(args.validate().is_ok());

        let request = args.upload_request();
        assert_eq!(request.asset_name, "app.zip");
        assert_eq!(request.release_version, "3.0.0");
    }

    #[test]
    fn test_missing_positional_is_an_error() {
        assert!(parse(&["build.zip", "app.zip", "42"]).is_err());
    }

    #[test]
    fn test_non_numeric_release_id_rejected() {
        assert!(parse(&["build.zip", "app.zip", "latest", "3.0.0"]).is_err());
    }

    #[test]
    fn test_github_config_requires_token() {
        let mut args = parse(&["build.zip", "app.zip", "1", "3.0.0", "--token", "t"]).unwrap();
        args.token = None;
        assert!(matches!(args.github_config(), Err(PublishError::Cli(_))));

        args.token = Some("secret".to_string());
        args.nightly_repo = "my-nightlies".to_string();
        let config = args.github_config().unwrap();
        assert_eq!(config.token, "secret");
        assert_eq!(config.nightly_repo, "my-nightlies");
    }

    #[test]
    fn test_retries_flag_overrides_env() {
        let args = parse(&["a", "b", "1", "3.0.0", "--retries", "2"]).unwrap();
        assert_eq!(args.retry_config().file_uploads, 2);
    }
}
