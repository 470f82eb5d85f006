//! Application configuration
//!
//! Loaded from a TOML file. Every field has a default, so a missing file or a
//! partial file is valid.

use crate::error::{AppError, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "SIGNAL_RELAY_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub delivery: DeliveryConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// Dashboard API listener
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("webhooks.db"),
        }
    }
}

/// Outbound signal delivery
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub timeout_secs: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// Active webhook list cache
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 60 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the path in `SIGNAL_RELAY_CONFIG`, or `config.toml`.
    ///
    /// Falls back to defaults when the file does not exist.
    pub fn load_default() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let path = Path::new(&path);

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Load and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse and validate config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(AppError::Config("server.host cannot be empty".into()));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(AppError::Config("database.path cannot be empty".into()));
        }
        if self.delivery.timeout_secs == 0 {
            return Err(AppError::Config(
                "delivery.timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Socket address for the dashboard API. `host` may be an IP literal or
    /// a hostname such as `localhost`; the first resolved address is used.
    pub async fn server_addr(&self) -> Result<SocketAddr> {
        let target = format!("{}:{}", self.server.host, self.server.port);

        let addr = tokio::net::lookup_host(target.as_str())
            .await
            .map_err(|e| AppError::Config(format!("Invalid address {}: {}", target, e)))?
            .next()
            .ok_or_else(|| AppError::Config(format!("No address found for {}", target)));
        addr
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }
}
