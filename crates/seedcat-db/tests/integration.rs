//! Offline tests for seedcat-db configuration and row conversion.
//! These tests do not require a live database connection.

use std::path::PathBuf;

use chrono::Utc;
use seedcat_core::{AppConfig, Category, Environment, ProductImage, Season, SeoMetadata};
use seedcat_db::{DbError, PoolConfig, ProductRow, RetryPolicy};
use sqlx::types::Json;
use uuid::Uuid;

fn app_config() -> AppConfig {
    AppConfig {
        database_url: Some("postgres://example".to_string()),
        env: Environment::Test,
        log_level: "info".to_string(),
        source_path: PathBuf::from("./assets/products.xlsx"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        upsert_max_retries: 4,
        upsert_retry_backoff_ms: 100,
        placeholder_image_url: "https://cdn.example/p.jpg".to_string(),
    }
}

fn product_row() -> ProductRow {
    ProductRow {
        id: 1,
        public_id: Uuid::new_v4(),
        name: "Savaj 111 BG II".to_string(),
        slug: "savaj-111-bg-ii".to_string(),
        category: "Cotton".to_string(),
        crop_name: "BT Cotton".to_string(),
        description: "Big bolls".to_string(),
        long_description: "Savaj 111 BG II is a premium quality seed.".to_string(),
        seed_color: "Black".to_string(),
        morphological_characters: Some("Big bolls".to_string()),
        flower_color: String::new(),
        plant_height: "150".to_string(),
        fruit_shape: String::new(),
        seasonality: vec!["Monsoon".to_string(), "Winter".to_string()],
        maturity_time: "160-170".to_string(),
        yield_expectation: "High".to_string(),
        difficulty_level: "Intermediate".to_string(),
        images: Json(vec![ProductImage {
            url: "https://cdn.example/p.jpg".to_string(),
            alt_text: "Savaj 111 BG II seeds".to_string(),
            is_primary: true,
        }]),
        planting_instructions: String::new(),
        care_instructions: String::new(),
        harvesting_tips: String::new(),
        storage_guidance: String::new(),
        availability: true,
        featured: false,
        seo_metadata: Json(SeoMetadata {
            title: "Savaj 111 BG II".to_string(),
            description: "Big bolls".to_string(),
            keywords: vec!["Savaj 111 BG II".to_string(), "Cotton".to_string()],
        }),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn retry_policy_from_app_config_uses_core_values() {
    let policy = RetryPolicy::from_app_config(&app_config());
    assert_eq!(policy.max_retries, 4);
    assert_eq!(policy.backoff_base_ms, 100);
}

#[test]
fn product_row_converts_to_stored_product() {
    let row = product_row();
    let public_id = row.public_id;

    let stored = row.into_stored().unwrap();

    assert_eq!(stored.public_id, public_id);
    assert_eq!(stored.record.category, Category::Cotton);
    assert_eq!(
        stored.record.seasonality,
        vec![Season::Monsoon, Season::Winter]
    );
    assert_eq!(stored.record.images.len(), 1);
    assert_eq!(stored.record.seo_metadata.keywords.len(), 2);
}

#[test]
fn product_row_with_unknown_category_is_rejected() {
    let mut row = product_row();
    row.category = "Tobacco".to_string();

    let err = row.into_stored().unwrap_err();
    assert!(
        matches!(err, DbError::InvalidStoredValue { field: "category", .. }),
        "{err:?}"
    );
}

#[test]
fn product_row_with_unknown_season_is_rejected() {
    let mut row = product_row();
    row.seasonality = vec!["Spring".to_string()];

    let err = row.into_stored().unwrap_err();
    assert!(
        matches!(err, DbError::InvalidStoredValue { field: "seasonality", .. }),
        "{err:?}"
    );
}

#[test]
fn stored_product_serializes_flat_camel_case() {
    let stored = product_row().into_stored().unwrap();
    let json = serde_json::to_value(&stored).unwrap();

    assert!(json.get("publicId").is_some());
    assert_eq!(json["name"], "Savaj 111 BG II");
    assert_eq!(json["cropName"], "BT Cotton");
    assert_eq!(json["category"], "Cotton");
    assert_eq!(json["seasonality"][0], "Monsoon");
    assert_eq!(json["images"][0]["isPrimary"], true);
    assert!(json.get("record").is_none());
}
