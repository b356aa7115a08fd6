//! Runtime application configuration loaded from the environment.

use super::ConfigError;
use super::validation::{validate_base_url, validate_port};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Runtime configuration, fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Origin of the public label pages encoded into QR codes.
    pub public_base_url: String,
    pub server_port: u16,
    pub bind_address: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:3000".into(),
            server_port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|key| std::env::var(key).ok())
    }

    /// Load configuration through a key lookup.
    ///
    /// `VINOVEO_PUBLIC_BASE_URL` is required; `SERVER_PORT` and `BIND_ADDRESS`
    /// fall back to their defaults when unset or blank.
    pub fn load<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> Option<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let public_base_url =
            g("VINOVEO_PUBLIC_BASE_URL").ok_or(ConfigError::Missing("VINOVEO_PUBLIC_BASE_URL"))?;
        validate_base_url(&public_base_url).map_err(|message| ConfigError::Invalid {
            key: "VINOVEO_PUBLIC_BASE_URL",
            message,
        })?;

        let server_port = match g("SERVER_PORT") {
            Some(v) => validate_port(&v).map_err(|message| ConfigError::Invalid {
                key: "SERVER_PORT",
                message,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            public_base_url,
            server_port,
            bind_address: g("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into()),
        })
    }

    /// Socket address string the HTTP server binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.server_port)
    }
}
