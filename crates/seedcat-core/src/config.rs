use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::{AppConfig, Environment, DEFAULT_PLACEHOLDER_IMAGE_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = lookup("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());
    let env = parse_environment(&or_default("SEEDCAT_ENV", "development"))?;
    let log_level = or_default("SEEDCAT_LOG_LEVEL", "info");
    let source_path = PathBuf::from(or_default("SEEDCAT_SOURCE_PATH", "./assets/products.xlsx"));

    let db_max_connections = parse_u32("SEEDCAT_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("SEEDCAT_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("SEEDCAT_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "SEEDCAT_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "{db_min_connections} exceeds SEEDCAT_DB_MAX_CONNECTIONS ({db_max_connections})"
            ),
        });
    }

    let upsert_max_retries = parse_u32("SEEDCAT_UPSERT_MAX_RETRIES", "2")?;
    let upsert_retry_backoff_ms = parse_u64("SEEDCAT_UPSERT_RETRY_BACKOFF_MS", "250")?;
    let placeholder_image_url = or_default(
        "SEEDCAT_PLACEHOLDER_IMAGE_URL",
        DEFAULT_PLACEHOLDER_IMAGE_URL,
    );

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        source_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        upsert_max_retries,
        upsert_retry_backoff_ms,
        placeholder_image_url,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SEEDCAT_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
