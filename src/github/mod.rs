//! GitHub integration for release asset uploads.
//!
//! The publisher only talks to a [`ReleaseHost`]; [`GitHubClient`] is the
//! production implementation over the GitHub REST API.

mod client;

pub use client::GitHubClient;

use crate::error::HostResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Opaque identifier of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseId(pub u64);

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReleaseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ReleaseId)
            .map_err(|e| format!("invalid release id '{}': {}", s, e))
    }
}

/// Opaque identifier of an asset attached to a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u64);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully resolved address of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRef {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Release id within the repository
    pub release_id: ReleaseId,
}

impl fmt::Display for ReleaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.release_id)
    }
}

/// An asset already attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAsset {
    /// Asset id
    pub id: AssetId,
    /// Asset file name
    pub name: String,
}

/// The parts of a release the publisher cares about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Release {
    /// Tag name, when the service reports it
    #[serde(default)]
    pub tag_name: Option<String>,
    /// Attached assets
    #[serde(default)]
    pub assets: Vec<RemoteAsset>,
}

impl Release {
    /// First asset whose name matches exactly
    pub fn find_asset(&self, name: &str) -> Option<&RemoteAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

/// Asset record returned after a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    /// Asset id
    pub id: AssetId,
    /// Stored asset name
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Public download URL
    #[serde(default)]
    pub browser_download_url: String,
}

/// Capability interface of a release-hosting service.
///
/// Each call is awaited before the next one is issued.
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    /// Upload the file at `path` as `name` to `release`
    async fn upload_asset(
        &self,
        release: &ReleaseRef,
        path: &Path,
        name: &str,
    ) -> HostResult<UploadedAsset>;

    /// Fetch the release with its current asset list
    async fn get_release(&self, release: &ReleaseRef) -> HostResult<Release>;

    /// Delete one asset from `release`
    async fn delete_asset(&self, release: &ReleaseRef, asset_id: AssetId) -> HostResult<()>;
}
