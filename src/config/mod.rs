//! Configuration loading and validation.
//!
//! Tunables come from an optional TOML file; the database connection
//! string comes from the `DATABASE_URL` environment variable and its
//! absence is a startup-time fatal error.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::calculate::{PoolPolicy, WaBaseTable};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Comma-separated CORS whitelist; "*" allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Connection pool tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Longest wait for a pooled connection before the request fails.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,

    /// Recycle idle connections so they are not dropped under us.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    15
}

fn default_idle_timeout() -> u64 {
    300
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            acquire_timeout_seconds: default_acquire_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

/// Ranking defaults; request parameters can tighten them per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub policy: PoolPolicy,

    #[serde(default = "default_age_window")]
    pub age_window: i32,

    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[serde(default = "default_window")]
    pub window: usize,
}

fn default_age_window() -> i32 {
    2
}

fn default_top_k() -> usize {
    10
}

fn default_window() -> usize {
    2
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            policy: PoolPolicy::default(),
            age_window: default_age_window(),
            top_k: default_top_k(),
            window: default_window(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    /// World Aquatics base times, gender → event → seconds.
    #[serde(default)]
    pub wa_bases: WaBaseTable,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            pool: PoolConfig::default(),
            ranking: RankingConfig::default(),
            wa_bases: WaBaseTable::default(),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file; a missing file falls back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// The data store connection string, from the process environment.
    pub fn database_url() -> Result<String, ConfigError> {
        std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.pool.max_connections, 5);
        assert_eq!(cfg.ranking.policy, PoolPolicy::SharedEvent);
        assert_eq!(cfg.ranking.top_k, 10);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let cfg = AppConfig::load(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn test_parse_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
log_level = "debug"

[server]
port = 9090
cors_origins = "https://example.com,https://other.example"

[pool]
max_connections = 2

[ranking]
policy = "co-occurrence"
age_window = 3

[wa_bases.F]
"50 meter freestyle" = 23.61
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.pool.max_connections, 2);
        assert_eq!(cfg.ranking.policy, PoolPolicy::CoOccurrence);
        assert_eq!(cfg.ranking.age_window, 3);
        assert_eq!(cfg.wa_bases.base("F", "50 meter freestyle"), Some(23.61));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid [ toml").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }
}
