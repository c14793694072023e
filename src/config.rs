//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Storage configuration
    pub storage: StorageConfig,
    /// Stats cache configuration
    pub stats: StatsConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the JSON file holding the item catalog
    pub data_path: String,
}

/// Stats cache configuration
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// How often the background watcher polls the data file for changes
    pub watch_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3001),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            storage: StorageConfig {
                data_path: env::var("DATA_PATH").unwrap_or_else(|_| "data/items.json".to_string()),
            },
            stats: StatsConfig {
                watch_interval: Duration::from_millis(
                    env::var("STATS_WATCH_INTERVAL_MS")
                        .ok()
                        .and_then(|t| t.parse().ok())
                        .unwrap_or(500),
                ),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
