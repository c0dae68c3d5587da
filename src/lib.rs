//! # Release Asset Publisher
//!
//! Uploads build artifacts to GitHub releases.
//!
//! A failed upload is retried a bounded number of times. Before each retry the
//! release's asset list is checked, and an asset already stored under the same
//! name is deleted so the next attempt does not collide with it.
//!
//! ## Features
//!
//! - **Collection Routing**: versions containing `nightly` go to the nightly repository
//! - **Conflict Recovery**: stale same-named assets are removed before retrying
//! - **Bounded Retries**: one initial attempt plus a fixed retry budget (4 by default)
//! - **Pluggable Host**: the GitHub API sits behind the [`ReleaseHost`] trait
//!
//! ## Usage
//!
//! ```bash
//! upload-to-github out/dist.zip electron-v3.0.0-linux-x64.zip 12345678 3.0.0
//! upload-to-github out/dist.zip electron-v3.0.0-nightly.20230101-linux-x64.zip 12345679 3.0.0-nightly.20230101
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod publish;

pub use cli::Args;
pub use config::{GitHubConfig, RetryConfig};
pub use error::{CliError, HostError, PublishError, Result};
pub use github::{GitHubClient, ReleaseHost};
pub use publish::{PublishOutcome, Publisher, ReleaseCollection, UploadRequest};
