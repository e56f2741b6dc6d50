pub mod app_config;
pub mod config;
pub mod products;
pub mod summary;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, DEFAULT_PLACEHOLDER_IMAGE_URL};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use products::{
    slugify, Category, ProductImage, ProductRecord, Season, SeoMetadata, DEFAULT_CROP_NAME,
    DEFAULT_DIFFICULTY_LEVEL, DEFAULT_MATURITY_TIME, DEFAULT_YIELD_EXPECTATION,
};
pub use summary::{IngestSummary, UpsertOutcome};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown season: {0}")]
    UnknownSeason(String),
}
