use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bookshelf_api::{settings::Settings, start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (_, server) = start_server(&settings).await?;

    server
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(err) => {
            error!("Unable to listen for Ctrl-C, running until killed: {}", err);
            std::future::pending::<()>().await
        }
    }
}
