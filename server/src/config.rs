//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl ServerConfig {
    /// Build typed config from environment variables (after `.env` loading).
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `LOG_LEVEL`: default `info,tower_http=debug`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] when `PORT` is not a `u16`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(std::env::var("PORT").ok().as_deref(), std::env::var("LOG_LEVEL").ok().as_deref())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] when `port` is not a `u16`.
    pub fn from_values(port: Option<&str>, log_filter: Option<&str>) -> Result<Self, ConfigError> {
        let port = match port.map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw.to_owned()))?,
            None => DEFAULT_PORT,
        };
        let log_filter = log_filter
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER)
            .to_owned();
        Ok(Self { port, log_filter })
    }
}
