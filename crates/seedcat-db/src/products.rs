//! Database operations for the `products` catalog.

use chrono::{DateTime, Utc};
use seedcat_core::{Category, ProductImage, ProductRecord, Season, SeoMetadata, UpsertOutcome};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

const PRODUCT_COLUMNS: &str = "id, public_id, name, slug, category, crop_name, description, \
     long_description, seed_color, morphological_characters, flower_color, plant_height, \
     fruit_shape, seasonality, maturity_time, yield_expectation, difficulty_level, images, \
     planting_instructions, care_instructions, harvesting_tips, storage_guidance, availability, \
     featured, seo_metadata, created_at, updated_at";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `products` table.
///
/// `category` and `seasonality` are stored as their display labels and
/// parsed back by [`ProductRow::into_stored`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub public_id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub crop_name: String,
    pub description: String,
    pub long_description: String,
    pub seed_color: String,
    pub morphological_characters: Option<String>,
    pub flower_color: String,
    pub plant_height: String,
    pub fruit_shape: String,
    pub seasonality: Vec<String>,
    pub maturity_time: String,
    pub yield_expectation: String,
    pub difficulty_level: String,
    pub images: Json<Vec<ProductImage>>,
    pub planting_instructions: String,
    pub care_instructions: String,
    pub harvesting_tips: String,
    pub storage_guidance: String,
    pub availability: bool,
    pub featured: bool,
    pub seo_metadata: Json<SeoMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted product: the canonical record plus its storage identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProduct {
    pub public_id: Uuid,
    #[serde(flatten)]
    pub record: ProductRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    /// Converts the row back into a [`StoredProduct`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidStoredValue`] if the stored category or a
    /// season label is not one the catalog recognizes.
    pub fn into_stored(self) -> Result<StoredProduct, DbError> {
        let category: Category =
            self.category
                .parse()
                .map_err(|e: seedcat_core::CoreError| DbError::InvalidStoredValue {
                    name: self.name.clone(),
                    field: "category",
                    reason: e.to_string(),
                })?;

        let seasonality = self
            .seasonality
            .iter()
            .map(|label| label.parse::<Season>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::InvalidStoredValue {
                name: self.name.clone(),
                field: "seasonality",
                reason: e.to_string(),
            })?;

        Ok(StoredProduct {
            public_id: self.public_id,
            record: ProductRecord {
                name: self.name,
                slug: self.slug,
                category,
                crop_name: self.crop_name,
                description: self.description,
                long_description: self.long_description,
                seed_color: self.seed_color,
                morphological_characters: self.morphological_characters,
                flower_color: self.flower_color,
                plant_height: self.plant_height,
                fruit_shape: self.fruit_shape,
                seasonality,
                maturity_time: self.maturity_time,
                yield_expectation: self.yield_expectation,
                difficulty_level: self.difficulty_level,
                images: self.images.0,
                planting_instructions: self.planting_instructions,
                care_instructions: self.care_instructions,
                harvesting_tips: self.harvesting_tips,
                storage_guidance: self.storage_guidance,
                availability: self.availability,
                featured: self.featured,
                seo_metadata: self.seo_metadata.0,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Optional filters for [`list_products`]. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against name, crop name, and
    /// description.
    pub keyword: Option<String>,
    pub category: Option<Category>,
    pub featured: Option<bool>,
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Upserts a product keyed by `name`.
///
/// An existing row is replaced in full: every catalog column takes the
/// incoming value, including fields the spreadsheet never carries such as
/// `featured` and `images`. `id`, `public_id`, and `created_at` are kept;
/// `updated_at` is bumped.
///
/// Returns whether the row was created or replaced, read from the system
/// column `xmax` (zero only for a freshly inserted tuple).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails, including constraint
/// violations such as a blank name.
pub async fn upsert_product(
    pool: &PgPool,
    record: &ProductRecord,
) -> Result<UpsertOutcome, DbError> {
    let seasonality: Vec<&str> = record.seasonality.iter().map(|s| s.as_str()).collect();

    let inserted: bool = sqlx::query_scalar::<_, bool>(
        "INSERT INTO products \
             (public_id, name, slug, category, crop_name, description, long_description, \
              seed_color, morphological_characters, flower_color, plant_height, fruit_shape, \
              seasonality, maturity_time, yield_expectation, difficulty_level, images, \
              planting_instructions, care_instructions, harvesting_tips, storage_guidance, \
              availability, featured, seo_metadata) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, \
                 $8, $9, $10, $11, $12, \
                 $13, $14, $15, $16, $17, \
                 $18, $19, $20, $21, \
                 $22, $23, $24) \
         ON CONFLICT (name) DO UPDATE SET \
             slug                     = EXCLUDED.slug, \
             category                 = EXCLUDED.category, \
             crop_name                = EXCLUDED.crop_name, \
             description              = EXCLUDED.description, \
             long_description         = EXCLUDED.long_description, \
             seed_color               = EXCLUDED.seed_color, \
             morphological_characters = EXCLUDED.morphological_characters, \
             flower_color             = EXCLUDED.flower_color, \
             plant_height             = EXCLUDED.plant_height, \
             fruit_shape              = EXCLUDED.fruit_shape, \
             seasonality              = EXCLUDED.seasonality, \
             maturity_time            = EXCLUDED.maturity_time, \
             yield_expectation        = EXCLUDED.yield_expectation, \
             difficulty_level         = EXCLUDED.difficulty_level, \
             images                   = EXCLUDED.images, \
             planting_instructions    = EXCLUDED.planting_instructions, \
             care_instructions        = EXCLUDED.care_instructions, \
             harvesting_tips          = EXCLUDED.harvesting_tips, \
             storage_guidance         = EXCLUDED.storage_guidance, \
             availability             = EXCLUDED.availability, \
             featured                 = EXCLUDED.featured, \
             seo_metadata             = EXCLUDED.seo_metadata, \
             updated_at               = NOW() \
         RETURNING (xmax = 0)",
    )
    .bind(Uuid::new_v4())
    .bind(&record.name)
    .bind(&record.slug)
    .bind(record.category.as_str())
    .bind(&record.crop_name)
    .bind(&record.description)
    .bind(&record.long_description)
    .bind(&record.seed_color)
    .bind(&record.morphological_characters)
    .bind(&record.flower_color)
    .bind(&record.plant_height)
    .bind(&record.fruit_shape)
    .bind(&seasonality)
    .bind(&record.maturity_time)
    .bind(&record.yield_expectation)
    .bind(&record.difficulty_level)
    .bind(Json(&record.images))
    .bind(&record.planting_instructions)
    .bind(&record.care_instructions)
    .bind(&record.harvesting_tips)
    .bind(&record.storage_guidance)
    .bind(record.availability)
    .bind(record.featured)
    .bind(Json(&record.seo_metadata))
    .fetch_one(pool)
    .await?;

    Ok(if inserted {
        UpsertOutcome::Created
    } else {
        UpsertOutcome::Replaced
    })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Returns the product with exactly this name, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure or
/// [`DbError::InvalidStoredValue`] if the stored row cannot be decoded.
pub async fn get_product_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<StoredProduct>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE name = $1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;

    row.map(ProductRow::into_stored).transpose()
}

/// Looks a product up by slug, falling back to its public id when `key`
/// parses as a UUID.
///
/// Slugs are not unique; when several products share one, the oldest row
/// wins.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if nothing matches, [`DbError::Sqlx`] on
/// query failure, or [`DbError::InvalidStoredValue`] if the stored row cannot
/// be decoded.
pub async fn get_product_by_slug_or_public_id(
    pool: &PgPool,
    key: &str,
) -> Result<StoredProduct, DbError> {
    let by_slug = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1 ORDER BY id LIMIT 1"
    ))
    .bind(key)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = by_slug {
        return row.into_stored();
    }

    let Ok(public_id) = Uuid::parse_str(key) else {
        return Err(DbError::NotFound);
    };

    sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE public_id = $1"
    ))
    .bind(public_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?
    .into_stored()
}

/// Lists products matching `filter`, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure or
/// [`DbError::InvalidStoredValue`] if a stored row cannot be decoded.
pub async fn list_products(
    pool: &PgPool,
    filter: &ProductFilter,
) -> Result<Vec<StoredProduct>, DbError> {
    let keyword = filter
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());

    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products \
         WHERE ($1::text IS NULL \
                OR strpos(lower(name), lower($1)) > 0 \
                OR strpos(lower(crop_name), lower($1)) > 0 \
                OR strpos(lower(description), lower($1)) > 0) \
           AND ($2::text IS NULL OR category = $2) \
           AND ($3::boolean IS NULL OR featured = $3) \
         ORDER BY name \
         LIMIT $4"
    ))
    .bind(keyword)
    .bind(filter.category.map(Category::as_str))
    .bind(filter.featured)
    .bind(filter.limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ProductRow::into_stored).collect()
}

/// Returns the total number of stored products.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_products(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
