//! Upload command execution.

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;
use crate::github::GitHubClient;
use crate::publish::Publisher;

/// Execute the upload described by `args` and map the outcome to an exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        output.error(super::USAGE);
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);
    let request = args.upload_request();

    match execute_upload(&args, &request, &config).await {
        Ok(()) => Ok(0),
        Err(e) => {
            config.error_println(&format!("Upload of {} failed: {}", request.asset_name, e));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() && !config.is_quiet() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.indent(&format!("• {}", suggestion));
                }
            }

            Ok(1)
        }
    }
}

async fn execute_upload(
    args: &Args,
    request: &crate::publish::UploadRequest,
    config: &RuntimeConfig,
) -> Result<()> {
    // Fail on bad input before any credentials or network are involved
    request.validate()?;

    let github = args.github_config()?;
    let retry = args.retry_config();
    retry.validate()?;

    let client = GitHubClient::new(github.clone())?;
    let publisher = Publisher::new(client, github, retry);

    let outcome = publisher.publish(request, config).await?;

    config.success_println(&format!(
        "Successfully uploaded {} to GitHub.",
        outcome.asset.name
    ));
    if outcome.attempts > 1 {
        config.indent(&format!("Succeeded after {} attempts", outcome.attempts));
    }
    if !outcome.asset.browser_download_url.is_empty() {
        config.indent(&outcome.asset.browser_download_url);
    }
    log::info!(
        "Uploaded {} ({} bytes) to the {} collection",
        outcome.asset.name,
        outcome.asset.size,
        outcome.collection
    );

    Ok(())
}
