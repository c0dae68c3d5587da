//! Retry budget and upload state machine states

use crate::error::HostError;
use crate::github::{RemoteAsset, UploadedAsset};

/// Retry budget owned by one publish operation.
///
/// The first upload is free; the budget only gates attempts after a failure.
#[derive(Debug, Clone)]
pub struct RetryState {
    attempts_remaining: u32,
    uploads: u32,
}

impl RetryState {
    /// Fresh budget of `retries` additional attempts
    pub fn new(retries: u32) -> Self {
        Self {
            attempts_remaining: retries,
            uploads: 0,
        }
    }

    /// Spend one retry. Returns false when the budget is exhausted.
    pub fn try_consume(&mut self) -> bool {
        if self.attempts_remaining == 0 {
            return false;
        }
        self.attempts_remaining -= 1;
        true
    }

    /// Count an upload call
    pub fn record_upload(&mut self) {
        self.uploads += 1;
    }

    /// Retries left
    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    /// Upload calls made so far
    pub fn uploads(&self) -> u32 {
        self.uploads
    }
}

/// States of a single publish operation
#[derive(Debug)]
pub enum UploadState {
    /// Sending the artifact
    Uploading,
    /// Upload failed with budget left; looking for a same-named asset
    CheckingExisting,
    /// Removing a stale same-named asset
    Deleting(RemoteAsset),
    /// Terminal: the asset is stored
    Succeeded(UploadedAsset),
    /// Terminal: budget spent, carries the last upload error
    Failed(HostError),
}

impl UploadState {
    /// Short state name for logs
    pub fn name(&self) -> &'static str {
        match self {
            UploadState::Uploading => "uploading",
            UploadState::CheckingExisting => "checking-existing",
            UploadState::Deleting(_) => "deleting",
            UploadState::Succeeded(_) => "succeeded",
            UploadState::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_allows_exactly_n_retries() {
        let mut retry = RetryState::new(4);
        for remaining in (0..4).rev() {
            assert!(retry.try_consume());
            assert_eq!(retry.attempts_remaining(), remaining);
        }
        assert!(!retry.try_consume());
        assert_eq!(retry.attempts_remaining(), 0);
    }

    #[test]
    fn test_zero_budget_never_retries() {
        let mut retry = RetryState::new(0);
        assert!(!retry.try_consume());
    }

    #[test]
    fn test_state_names() {
        assert_eq!(UploadState::Uploading.name(), "uploading");
        assert_eq!(UploadState::CheckingExisting.name(), "checking-existing");
        let failed = UploadState::Failed(HostError::Api {
            status: 500,
            message: String::new(),
        });
        assert_eq!(failed.name(), "failed");
    }
}
