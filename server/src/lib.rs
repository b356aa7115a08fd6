//! HTTP service in front of the nutrition calculator and the QR generator.

pub mod app;
pub mod config;
pub mod server;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load .env and the runtime config.
pub fn init_foundation() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();

    let config = AppConfig::from_env()?;
    tracing::info!(
        base_url = %config.public_base_url,
        port = config.server_port,
        "Settings loaded"
    );
    Ok(config)
}
