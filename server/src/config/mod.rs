//! Configuration management: loading from environment, validation.

pub mod app_config;
pub mod validation;

pub use app_config::AppConfig;

/// Errors raised while loading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key}: {message}")]
    Invalid { key: &'static str, message: String },
}
