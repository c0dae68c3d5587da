//! Release asset publishing.
//!
//! Uploads one artifact to one release with a bounded, conflict-aware retry
//! loop driven by an explicit state machine.

mod progress;
mod publisher;
mod request;
mod state;

pub use progress::{Progress, Silent};
pub use publisher::{PublishOutcome, Publisher};
pub use request::{ReleaseCollection, UploadRequest};
pub use state::{RetryState, UploadState};
