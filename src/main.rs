use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use docspeak::infrastructure::observability::{TracingConfig, init_tracing};
use docspeak::presentation::{AppState, create_router, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (environment, settings) = load_settings().context("Failed to load configuration")?;

    init_tracing(
        &TracingConfig::new(environment.as_str(), settings.logging.json),
        "server",
    );

    let state = AppState::from_settings(&settings).context("Failed to initialise services")?;
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(%addr, index = %settings.search.index_name, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
