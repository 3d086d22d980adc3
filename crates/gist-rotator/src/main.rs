//! Gist rotator service entry point

use gist_api::GistClient;
use gist_rotator::{start_server, Config, Result, RotationCache, ServerState, SharedState};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("gist_rotator=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting gist rotator...");
    info!("Port: {}", config.port);
    info!("Gist API: {}", config.api_url);
    info!("Expected file type: {}", config.expected_content_type);

    let client = GistClient::with_options(
        &config.api_url,
        &config.user_agent,
        Duration::from_secs(30),
    );
    let cache =
        RotationCache::new(Arc::new(client)).with_expected_type(config.expected_content_type);

    let state: SharedState = Arc::new(ServerState::new(cache));

    // Start HTTP server (blocking)
    start_server(state, config.port).await?;

    Ok(())
}
