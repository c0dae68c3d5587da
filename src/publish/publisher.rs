//! Conflict-aware upload of one artifact to one release.
//!
//! A failed upload either retries directly or, when an asset with the same
//! name is already attached, deletes that asset first. The loop stops at the
//! first success or when the retry budget is spent.

use super::progress::Progress;
use super::request::{ReleaseCollection, UploadRequest};
use super::state::{RetryState, UploadState};
use crate::config::{GitHubConfig, RetryConfig};
use crate::error::{PublishError, Result};
use crate::github::{ReleaseHost, ReleaseRef, UploadedAsset};

/// Successful publish result
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Asset record returned by the host
    pub asset: UploadedAsset,
    /// Upload calls made, including the successful one
    pub attempts: u32,
    /// Collection the release belongs to
    pub collection: ReleaseCollection,
}

/// Per-invocation context threaded through the state machine
struct PublishRun<'a> {
    request: &'a UploadRequest,
    release: ReleaseRef,
    retry: RetryState,
}

/// Publishes artifacts through a [`ReleaseHost`]
pub struct Publisher<H> {
    host: H,
    github: GitHubConfig,
    retry: RetryConfig,
}

impl<H: ReleaseHost> Publisher<H> {
    /// Create a publisher over `host`
    pub fn new(host: H, github: GitHubConfig, retry: RetryConfig) -> Self {
        Self {
            host,
            github,
            retry,
        }
    }

    /// Borrow the underlying host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Upload `request` until it succeeds or the retry budget runs out
    pub async fn publish(
        &self,
        request: &UploadRequest,
        progress: &dyn Progress,
    ) -> Result<PublishOutcome> {
        request.validate()?;
        self.retry.validate()?;

        let collection = request.collection();
        let mut run = PublishRun {
            request,
            release: request.release_ref(&self.github),
            retry: RetryState::new(self.retry.file_uploads),
        };
        log::info!(
            "Publishing {} to {} ({} collection)",
            request.asset_name,
            run.release,
            collection
        );
        progress.detail(&format!(
            "Uploading {} to {} ({})",
            request.asset_name, run.release, collection
        ));

        let mut state = UploadState::Uploading;
        loop {
            state = match state {
                UploadState::Succeeded(asset) => {
                    return Ok(PublishOutcome {
                        asset,
                        attempts: run.retry.uploads(),
                        collection,
                    });
                }
                UploadState::Failed(last) => {
                    return Err(PublishError::BudgetExhausted {
                        asset: request.asset_name.clone(),
                        attempts: run.retry.uploads(),
                        source: last,
                    });
                }
                current => {
                    let from = current.name();
                    let next = self.step(current, &mut run, progress).await;
                    log::debug!("{} -> {}", from, next.name());
                    next
                }
            };
        }
    }

    /// Run the effect of one non-terminal state and return the next state
    async fn step(
        &self,
        state: UploadState,
        run: &mut PublishRun<'_>,
        progress: &dyn Progress,
    ) -> UploadState {
        let request = run.request;
        let name = request.asset_name.as_str();
        match state {
            UploadState::Uploading => {
                run.retry.record_upload();
                match self
                    .host
                    .upload_asset(&run.release, &request.artifact_path, name)
                    .await
                {
                    Ok(asset) => UploadState::Succeeded(asset),
                    Err(e) => {
                        if run.retry.try_consume() {
                            if e.is_name_conflict() {
                                log::info!("{} rejected as a duplicate name", name);
                            }
                            progress.warn(&format!(
                                "Error uploading {} to GitHub, will retry ({} retries left). Error was: {}",
                                name,
                                run.retry.attempts_remaining(),
                                e
                            ));
                            UploadState::CheckingExisting
                        } else {
                            progress.error(&format!(
                                "Error retrying uploading {} to GitHub: {}",
                                name, e
                            ));
                            UploadState::Failed(e)
                        }
                    }
                }
            }
            UploadState::CheckingExisting => match self.host.get_release(&run.release).await {
                Ok(release) => {
                    progress.detail(&format!(
                        "There are {} existing assets on {} ({})",
                        release.assets.len(),
                        run.release,
                        release.tag_name.as_deref().unwrap_or("untagged")
                    ));
                    match serde_json::to_string(&release.assets) {
                        Ok(json) => log::debug!("Existing assets: {}", json),
                        Err(e) => log::debug!("Could not serialize asset list: {}", e),
                    }
                    match release.find_asset(name) {
                        Some(asset) => {
                            progress.step(&format!(
                                "{} already exists; will delete before retrying upload.",
                                name
                            ));
                            UploadState::Deleting(asset.clone())
                        }
                        None => UploadState::Uploading,
                    }
                }
                Err(e) => {
                    // Treated as "no conflict": the next upload attempt decides.
                    log::warn!("Failed to list assets on {}: {}", run.release, e);
                    progress.warn(&format!(
                        "Could not list existing assets on {}: {}",
                        run.release, e
                    ));
                    UploadState::Uploading
                }
            },
            UploadState::Deleting(asset) => {
                match self.host.delete_asset(&run.release, asset.id).await {
                    Ok(()) => {
                        log::info!("Deleted stale asset {} ({})", asset.name, asset.id);
                    }
                    Err(e) => {
                        log::warn!(
                            "Failed to delete asset {} ({}): {}",
                            asset.name,
                            asset.id,
                            e
                        );
                        progress.warn(&format!(
                            "Could not delete existing {}, retrying upload anyway: {}",
                            asset.name, e
                        ));
                    }
                }
                UploadState::Uploading
            }
            terminal => terminal,
        }
    }
}
