//! Configuration loader for the `biolink-water` backend service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Handlers and adapters receive a [`Config`] value
//! instead of reading `env::var` on their own.
//!
use std::{env, time::Duration};

use anyhow::{anyhow, Result};

/// Parse an optional numeric environment variable with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// PostgreSQL connection string.
    pub db_url: String,

    /// Maximum number of database connections in the pool.
    pub db_pool_max: u32,

    /// URL of the telemetry document holding the latest sensor reading.
    pub api_url: String,

    /// Per-request timeout for the telemetry fetch.
    pub telemetry_timeout_secs: u64,

    /// Port the HTTP server binds on.
    pub http_port: u16,

    /// History window used when a request does not name one.
    pub history_default_hours: u32,

    /// Trailing window fed to the trend analyzer.
    pub analytics_window_days: u32,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `DATABASE_URL` – PostgreSQL connection string
/// - `SENSOR_API_URL` – URL of the latest-reading JSON document
///
/// Optional:
/// - `DB_POOL_MAX` – max DB connections (default: 5)
/// - `TELEMETRY_TIMEOUT_SECS` – telemetry request timeout (default: 10)
/// - `HTTP_PORT` – listen port (default: 5001)
/// - `HISTORY_DEFAULT_HOURS` – history window (default: 24)
/// - `ANALYTICS_WINDOW_DAYS` – analytics window (default: 7)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let db_url = require_env!("DATABASE_URL");
    let api_url = require_env!("SENSOR_API_URL");
    let db_pool_max = parse_env!("DB_POOL_MAX", u32, 5);
    let telemetry_timeout_secs = parse_env!("TELEMETRY_TIMEOUT_SECS", u64, 10);
    let http_port = parse_env!("HTTP_PORT", u16, 5001);
    let history_default_hours = parse_env!("HISTORY_DEFAULT_HOURS", u32, 24);
    let analytics_window_days = parse_env!("ANALYTICS_WINDOW_DAYS", u32, 7);

    Ok(Config {
        db_url,
        db_pool_max,
        api_url,
        telemetry_timeout_secs,
        http_port,
        history_default_hours,
        analytics_window_days,
    })
}

impl Config {
    pub fn telemetry_timeout(&self) -> Duration {
        Duration::from_secs(self.telemetry_timeout_secs)
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the database password while showing all other values.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  DATABASE_URL           : {}", mask_db_url(&self.db_url));
        tracing::info!("  SENSOR_API_URL         : {}", self.api_url);
        tracing::info!("  DB_POOL_MAX            : {}", self.db_pool_max);
        tracing::info!("  TELEMETRY_TIMEOUT_SECS : {}", self.telemetry_timeout_secs);
        tracing::info!("  HTTP_PORT              : {}", self.http_port);
        tracing::info!("  HISTORY_DEFAULT_HOURS  : {}", self.history_default_hours);
        tracing::info!("  ANALYTICS_WINDOW_DAYS  : {}", self.analytics_window_days);
    }
}

/// Replace the password portion of a connection string with `****`.
pub fn mask_db_url(db_url: &str) -> String {
    // ---
    let Some(at_pos) = db_url.rfind('@') else {
        return db_url.to_string();
    };
    match db_url[..at_pos].rfind(':') {
        // `postgres://host@...` has only the scheme colon before '@'
        Some(colon_pos) if !db_url[colon_pos..].starts_with("://") => {
            format!("{}:****{}", &db_url[..colon_pos], &db_url[at_pos..])
        }
        _ => db_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_mask_db_url_hides_password() {
        // ---
        assert_eq!(
            mask_db_url("postgres://water:s3cret@db:5432/biolink"),
            "postgres://water:****@db:5432/biolink"
        );
    }

    #[test]
    fn test_mask_db_url_without_credentials() {
        // ---
        assert_eq!(
            mask_db_url("postgres://db:5432/biolink"),
            "postgres://db:5432/biolink"
        );
        assert_eq!(
            mask_db_url("postgres://water@db/biolink"),
            "postgres://water@db/biolink"
        );
    }
}
