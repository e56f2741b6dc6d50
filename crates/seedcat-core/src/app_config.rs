use std::path::PathBuf;

use crate::ConfigError;

/// Placeholder photo attached to every ingested product until real images
/// are uploaded.
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1594498653385-d5172c532c00?q=80&w=2000&auto=format&fit=crop";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// `None` is allowed so that store-free commands (`ingest --dry-run`)
    /// work without a database configured.
    pub database_url: Option<String>,
    pub env: Environment,
    pub log_level: String,
    pub source_path: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub upsert_max_retries: u32,
    pub upsert_retry_backoff_ms: u64,
    pub placeholder_image_url: String,
}

impl AppConfig {
    /// Returns the database URL or the error a store-backed command reports
    /// when it is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `DATABASE_URL` was not provided.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("source_path", &self.source_path)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("upsert_max_retries", &self.upsert_max_retries)
            .field("upsert_retry_backoff_ms", &self.upsert_retry_backoff_ms)
            .field("placeholder_image_url", &self.placeholder_image_url)
            .finish()
    }
}
