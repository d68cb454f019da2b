use std::sync::Arc;

use laudos_completion::client::CompletionClient;
use laudos_completion::retry::Retrying;
use laudos_report::assist::Assistant;
use laudos_report::orchestrator::ReportGenerator;
use laudos_server::config::ServerConfig;
use laudos_server::state::{AppState, SharedService};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    if config.system_prompt.is_none() {
        tracing::warn!("RADIOLOGY_SYSTEM_PROMPT is not set; report generation will fail");
    }

    let client = CompletionClient::new(config.client_config())?;
    let service: SharedService = Arc::new(Retrying::new(client, config.retry_policy()));

    let state = AppState::new(
        ReportGenerator::new(service.clone(), config.report_settings()),
        Assistant::new(service, config.assist_model.clone()),
    );

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        report_model = %config.report_model,
        assist_model = %config.assist_model,
        max_retries = config.max_retries,
        "laudos server listening"
    );

    axum::serve(listener, laudos_server::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
    }
}
