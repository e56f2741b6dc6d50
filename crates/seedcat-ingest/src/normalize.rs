//! Normalization from raw spreadsheet rows to [`seedcat_core::ProductRecord`].
//!
//! Classification lives in [`crate::classify`] and fabricated copy in
//! [`crate::content`]; this module resolves columns and assembles the record.

use seedcat_core::{
    slugify, ProductRecord, DEFAULT_CROP_NAME, DEFAULT_DIFFICULTY_LEVEL, DEFAULT_MATURITY_TIME,
    DEFAULT_PLACEHOLDER_IMAGE_URL, DEFAULT_YIELD_EXPECTATION,
};

use crate::classify::{classify_category, classify_seasonality};
use crate::content;
use crate::error::RowRejection;
use crate::row::RawRow;

const PRODUCT_NAME_LABELS: &[&str] = &["Product Name", "Name"];
const CROP_NAME_LABELS: &[&str] = &["Crop Name", "Crop"];
const SEASON_LABELS: &[&str] = &["Season", "Seasons"];
const MORPHOLOGICAL_LABELS: &[&str] = &["Morphological Characters"];
const LONG_DESCRIPTION_LABELS: &[&str] = &["Long Description"];

const SEED_COLOR_FRAGMENTS: &[&str] = &["seed color", "fruit color"];
const FLOWER_COLOR_FRAGMENTS: &[&str] = &["flower color"];
const HEIGHT_FRAGMENTS: &[&str] = &["height"];
const FRUIT_SHAPE_FRAGMENTS: &[&str] = &["fruit shape"];
const MATURITY_FRAGMENTS: &[&str] = &["maturity days", "maturity"];
const YIELD_FRAGMENTS: &[&str] = &["yield"];

/// Turns raw rows into canonical records. Holds the few settings that are
/// configurable rather than fixed.
#[derive(Debug, Clone)]
pub struct Normalizer {
    placeholder_image_url: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_IMAGE_URL)
    }
}

/// Output of [`Normalizer::normalize_all`]: accepted records in row order
/// plus the rejections.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub seen: usize,
    pub records: Vec<ProductRecord>,
    pub rejections: Vec<RowRejection>,
}

impl Normalizer {
    #[must_use]
    pub fn new(placeholder_image_url: impl Into<String>) -> Self {
        Self {
            placeholder_image_url: placeholder_image_url.into(),
        }
    }

    /// Normalizes a single row.
    ///
    /// # Errors
    ///
    /// Returns [`RowRejection::MissingProductName`] when the product-name
    /// column is absent or blank after trimming.
    pub fn normalize(&self, row: &RawRow) -> Result<ProductRecord, RowRejection> {
        let name = row
            .field(PRODUCT_NAME_LABELS)
            .ok_or(RowRejection::MissingProductName {
                row: row.row_number(),
            })?;

        let crop_label = row.field(CROP_NAME_LABELS);
        let category = classify_category(crop_label.as_deref().unwrap_or_default(), &name);
        let seasonality = classify_seasonality(row.field(SEASON_LABELS).as_deref());

        let morphological = row.field(MORPHOLOGICAL_LABELS);
        let seed_color = row.fuzzy_any(SEED_COLOR_FRAGMENTS).unwrap_or_default();
        let flower_color = row.fuzzy_any(FLOWER_COLOR_FRAGMENTS).unwrap_or_default();
        let plant_height = row.fuzzy_any(HEIGHT_FRAGMENTS).unwrap_or_default();
        let fruit_shape = row.fuzzy_any(FRUIT_SHAPE_FRAGMENTS).unwrap_or_default();
        let maturity_time = row
            .fuzzy_any(MATURITY_FRAGMENTS)
            .unwrap_or_else(|| DEFAULT_MATURITY_TIME.to_string());
        let yield_expectation = row
            .fuzzy_any(YIELD_FRAGMENTS)
            .unwrap_or_else(|| DEFAULT_YIELD_EXPECTATION.to_string());

        let description = content::short_description(&name, morphological.as_deref());
        let long_description = row.field(LONG_DESCRIPTION_LABELS).unwrap_or_else(|| {
            content::long_description(&name, morphological.as_deref(), &seed_color)
        });
        let seo_metadata = content::seo_metadata(
            &name,
            category,
            crop_label.as_deref().unwrap_or_default(),
            morphological.as_deref(),
        );
        let images = vec![content::placeholder_image(
            &self.placeholder_image_url,
            &name,
        )];

        Ok(ProductRecord {
            slug: slugify(&name),
            category,
            crop_name: crop_label.unwrap_or_else(|| DEFAULT_CROP_NAME.to_string()),
            description,
            long_description,
            seed_color,
            morphological_characters: morphological,
            flower_color,
            plant_height,
            fruit_shape,
            seasonality,
            maturity_time,
            yield_expectation,
            difficulty_level: DEFAULT_DIFFICULTY_LEVEL.to_string(),
            images,
            planting_instructions: content::PLANTING_INSTRUCTIONS.to_string(),
            care_instructions: content::CARE_INSTRUCTIONS.to_string(),
            harvesting_tips: content::HARVESTING_TIPS.to_string(),
            storage_guidance: content::STORAGE_GUIDANCE.to_string(),
            availability: true,
            featured: false,
            seo_metadata,
            name,
        })
    }

    /// Normalizes every row, collecting rejections instead of stopping.
    pub fn normalize_all<'a, I>(&self, rows: I) -> NormalizedBatch
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let mut batch = NormalizedBatch::default();

        for row in rows {
            batch.seen += 1;
            match self.normalize(row) {
                Ok(record) => {
                    tracing::debug!(
                        row = row.row_number(),
                        name = %record.name,
                        category = %record.category,
                        "row normalized"
                    );
                    batch.records.push(record);
                }
                Err(rejection) => {
                    tracing::warn!(
                        row = rejection.row(),
                        reason = %rejection,
                        "skipping row"
                    );
                    batch.rejections.push(rejection);
                }
            }
        }

        batch
    }
}

/// Normalizes a row with default settings.
///
/// # Errors
///
/// See [`Normalizer::normalize`].
pub fn normalize_row(row: &RawRow) -> Result<ProductRecord, RowRejection> {
    Normalizer::default().normalize(row)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
