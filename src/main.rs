//! upload-to-github - upload a build artifact to a GitHub release.

use release_asset_publisher::cli;
use release_asset_publisher::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    // Local runs keep credentials in .env; CI provides them directly.
    // Loaded before the logger so RUST_LOG may come from .env too.
    let dotenv = if std::env::var_os("CI").is_none() {
        Some(dotenvy::dotenv())
    } else {
        None
    };

    env_logger::init();

    match dotenv {
        Some(Ok(path)) => log::debug!("Loaded environment from {}", path.display()),
        Some(Err(e)) if !e.not_found() => log::warn!("Failed to load .env: {}", e),
        _ => {}
    }

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}
