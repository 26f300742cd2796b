//! # API Configuration
//!
//! Environment-based configuration for the catalog service.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// PostgreSQL configuration
    pub database: DatabaseConfig,

    /// Listing cache configuration
    pub cache: CacheSettings,

    /// Logging level
    pub log_level: String,

    /// CORS allowed origins
    pub cors_origins: Vec<String>,

    /// Origins accepted by the CSRF check besides the request's own host
    pub csrf_trusted_origins: Vec<String>,
}

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `None` runs the service on the in-memory store
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

/// Listing cache configuration
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// `None` keeps the cache in process
    pub redis_url: Option<String>,
    pub enabled: bool,
    pub ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server_addr: parse_var("SERVER_ADDR", "0.0.0.0:8080".parse().ok())?,

            database: DatabaseConfig {
                url: non_empty_var("DATABASE_URL"),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", Some(10))?,
                run_migrations: flag_var("RUN_MIGRATIONS", true)?,
            },

            cache: CacheSettings {
                redis_url: non_empty_var("REDIS_URL"),
                enabled: flag_var("CACHE_ENABLED", true)?,
                ttl: Duration::from_secs(parse_var("CACHE_TTL_SECS", Some(300))?),
            },

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            cors_origins: list_var("CORS_ORIGINS").unwrap_or_else(|| vec!["*".to_string()]),

            csrf_trusted_origins: list_var("CSRF_TRUSTED_ORIGINS").unwrap_or_default(),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn flag_var(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match non_empty_var(name) {
        Some(value) => parse_flag(name, &value),
        None => Ok(default),
    }
}

/// Case-insensitive boolean; anything unrecognised is an error.
fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

fn list_var(name: &str) -> Option<Vec<String>> {
    non_empty_var(name).map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    })
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match non_empty_var(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => default.ok_or(ConfigError::Invalid {
            name,
            value: String::new(),
        }),
    }
}
