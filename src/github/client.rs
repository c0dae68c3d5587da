//! reqwest-backed GitHub REST client for release assets

use super::{AssetId, Release, ReleaseHost, ReleaseRef, UploadedAsset};
use crate::config::GitHubConfig;
use crate::error::{HostError, HostResult, PublishError, Result};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::path::Path;
use tokio_util::io::ReaderStream;

const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub release host
pub struct GitHubClient {
    http: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create an authenticated client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let config = config.validate()?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token.trim()))
            .map_err(|e| PublishError::Config {
                reason: format!("GitHub token is not a valid header value: {}", e),
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| PublishError::Config {
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, config })
    }

    fn api_url(&self, release: &ReleaseRef, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/releases/{}",
            self.config.api_url, release.owner, release.repo, tail
        )
    }

    /// Turn a non-success response into `HostError::Api`
    async fn check(response: reqwest::Response) -> HostResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(HostError::Api {
            status: status.as_u16(),
            message: message.trim().to_string(),
        })
    }
}

#[async_trait]
impl ReleaseHost for GitHubClient {
    async fn upload_asset(
        &self,
        release: &ReleaseRef,
        path: &Path,
        name: &str,
    ) -> HostResult<UploadedAsset> {
        let io_err = |source| HostError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = tokio::fs::File::open(path).await.map_err(io_err)?;
        let len = file.metadata().await.map_err(io_err)?.len();

        let url = format!(
            "{}/repos/{}/{}/releases/{}/assets",
            self.config.uploads_url, release.owner, release.repo, release.release_id
        );
        log::debug!("POST {} ({} bytes)", url, len);

        let response = self
            .http
            .post(&url)
            .query(&[("name", name)])
            .header(header::CONTENT_TYPE, content_type_for(name))
            .header(header::CONTENT_LENGTH, len)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await?;

        Ok(Self::check(response).await?.json::<UploadedAsset>().await?)
    }

    async fn get_release(&self, release: &ReleaseRef) -> HostResult<Release> {
        let url = self.api_url(release, &release.release_id.to_string());
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        Ok(Self::check(response).await?.json::<Release>().await?)
    }

    async fn delete_asset(&self, release: &ReleaseRef, asset_id: AssetId) -> HostResult<()> {
        let url = self.api_url(release, &format!("assets/{}", asset_id));
        log::debug!("DELETE {}", url);

        let response = self.http.delete(&url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// MIME type for an asset, from its file extension
fn content_type_for(name: &str) -> &'static str {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some("zip") => "application/zip",
        Some("gz") | Some("tgz") => "application/gzip",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("deb") => "application/vnd.debian.binary-package",
        Some("rpm") => "application/x-rpm",
        Some("exe") => "application/x-msdownload",
        Some("dmg") => "application/x-apple-diskimage",
        _ => "application/octet-stream",
    }
}
