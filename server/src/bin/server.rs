//! Server binary.
//!
//! Loads configuration, starts the axum web server and waits for Ctrl+C.

use tracing_subscriber::EnvFilter;

use vinoveo_server::app::SharedState;
use vinoveo_server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting VinoVeo label server");

    let config = vinoveo_server::init_foundation()?;
    let state = SharedState::new(config);

    tracing::info!(
        port = state.server_port(),
        "Server running. Press Ctrl+C to stop."
    );

    server::run_until(state, tokio::signal::ctrl_c()).await
}
