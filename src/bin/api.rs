use anyhow::{Context, Result};
use studyenglish::core::config::AppConfig;
use studyenglish::{AppState, build_app};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    studyenglish::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        anyhow::anyhow!(e)
    })?;
    let state = AppState::from_config(&config).context("failed to initialize vendor clients")?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        addr = %config.bind_addr,
        aigc_model = %config.aigc.model,
        cet6_model = %config.cet6.model,
        "StudyEnglish API listening"
    );

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    info!("StudyEnglish API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
