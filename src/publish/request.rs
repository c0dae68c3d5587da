//! Upload requests and release collection selection

use crate::config::GitHubConfig;
use crate::error::{PublishError, Result};
use crate::github::{ReleaseId, ReleaseRef};
use std::fmt;
use std::path::PathBuf;

/// Which repository a release lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseCollection {
    /// Regular releases
    Stable,
    /// Nightly builds
    Nightly,
}

impl ReleaseCollection {
    /// Plain substring test on the version string, no semver parsing
    pub fn for_version(release_version: &str) -> Self {
        if release_version.contains("nightly") {
            ReleaseCollection::Nightly
        } else {
            ReleaseCollection::Stable
        }
    }

    /// Repository name configured for this collection
    pub fn repo<'a>(&self, config: &'a GitHubConfig) -> &'a str {
        match self {
            ReleaseCollection::Stable => &config.stable_repo,
            ReleaseCollection::Nightly => &config.nightly_repo,
        }
    }
}

impl fmt::Display for ReleaseCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseCollection::Stable => write!(f, "stable"),
            ReleaseCollection::Nightly => write!(f, "nightly"),
        }
    }
}

/// A single artifact to publish
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Local artifact path
    pub artifact_path: PathBuf,
    /// Name the asset is stored under
    pub asset_name: String,
    /// Target release
    pub release_id: ReleaseId,
    /// Version string, only used to pick the collection
    pub release_version: String,
}

impl UploadRequest {
    /// Build a request
    pub fn new(
        artifact_path: impl Into<PathBuf>,
        asset_name: impl Into<String>,
        release_id: ReleaseId,
        release_version: impl Into<String>,
    ) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            asset_name: asset_name.into(),
            release_id,
            release_version: release_version.into(),
        }
    }

    /// Collection selected by the release version
    pub fn collection(&self) -> ReleaseCollection {
        ReleaseCollection::for_version(&self.release_version)
    }

    /// Address of the target release under `config`
    pub fn release_ref(&self, config: &GitHubConfig) -> ReleaseRef {
        ReleaseRef {
            owner: config.owner.clone(),
            repo: self.collection().repo(config).to_string(),
            release_id: self.release_id,
        }
    }

    /// Reject requests that cannot possibly upload
    pub fn validate(&self) -> Result<()> {
        if self.asset_name.trim().is_empty() {
            return Err(PublishError::InvalidRequest {
                reason: "asset name must not be empty".to_string(),
            });
        }
        if self.release_version.trim().is_empty() {
            return Err(PublishError::InvalidRequest {
                reason: "release version must not be empty".to_string(),
            });
        }
        match std::fs::metadata(&self.artifact_path) {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(PublishError::InvalidRequest {
                reason: format!("{} is not a regular file", self.artifact_path.display()),
            }),
            Err(e) => Err(PublishError::InvalidRequest {
                reason: format!(
                    "{} does not exist or is unreadable: {}",
                    self.artifact_path.display(),
                    e
                ),
            }),
        }
    }
}
