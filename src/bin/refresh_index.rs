//! Rebuilds the search index once from the source container and exits.

use anyhow::Context;

use docspeak::application::services::RefreshError;
use docspeak::infrastructure::observability::{TracingConfig, init_tracing};
use docspeak::presentation::{AppState, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (environment, settings) = load_settings().context("Failed to load configuration")?;

    init_tracing(
        &TracingConfig::new(environment.as_str(), settings.logging.json),
        "refresh-index",
    );

    let state = AppState::from_settings(&settings).context("Failed to initialise services")?;

    match state.refresh_service.refresh().await {
        Ok(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Err(RefreshError::PartialUpload { report, .. }) => {
            for failure in report.failures() {
                eprintln!(
                    "rejected {}: {} {}",
                    failure.key,
                    failure.status_code,
                    failure.error_message.as_deref().unwrap_or_default()
                );
            }
            anyhow::bail!("Index update failed.")
        }
        Err(e) => Err(anyhow::Error::new(e).context("Index update failed.")),
    }
}
