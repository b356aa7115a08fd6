use std::sync::Arc;

use label_qr::QrGenerator;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    /// QR generator bound to the configured public base URL
    qr: QrGenerator,
    /// Cancelled on Ctrl+C to stop the server
    shutdown_token: CancellationToken,
}

impl SharedState {
    /// Create shared state from a loaded config.
    pub fn new(config: AppConfig) -> Self {
        let qr = QrGenerator::new(config.public_base_url.clone());

        Self {
            inner: Arc::new(SharedStateInner {
                config,
                qr,
                shutdown_token: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn qr(&self) -> &QrGenerator {
        &self.inner.qr
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }
}
