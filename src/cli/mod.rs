//! Command line interface for upload-to-github.
//!
//! Parses arguments, builds the explicit configuration and runs one publish.

mod args;
pub mod commands;
mod output;

pub use args::{Args, RuntimeConfig, USAGE};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;
use clap::error::ErrorKind;

/// Main CLI entry point, returns the process exit code
pub async fn run() -> Result<i32> {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return Ok(0);
        }
        Err(e) => {
            let output = OutputManager::new(false, false);
            output.error(USAGE);
            let _ = e.print();
            return Ok(1);
        }
    };
    execute_command(args).await
}
