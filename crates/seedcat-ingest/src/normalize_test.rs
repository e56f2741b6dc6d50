use seedcat_core::{Category, Season};

use super::*;
use crate::row::CellValue;

fn full_row() -> RawRow {
    RawRow::from_pairs(
        2,
        [
            ("Sr No", CellValue::Number(1.0)),
            ("Product Name", CellValue::from("Savaj 111 BG II")),
            ("Crop Name", CellValue::from(" BT Cotton ")),
            ("Season", CellValue::from("Kharif")),
            (
                "Morphological Characters",
                CellValue::from("Big boll size, semi-erect plant"),
            ),
            ("Seed Color", CellValue::from("Black")),
            ("Flower Colour", CellValue::from("Cream")),
            ("Plant Height (cm)", CellValue::Number(150.0)),
            ("Maturity Days", CellValue::from("160-170")),
            ("Yield (q/acre)", CellValue::from("18-22")),
        ],
    )
}

// -----------------------------------------------------------------------
// normalize
// -----------------------------------------------------------------------

#[test]
fn normalize_full_row() {
    let record = normalize_row(&full_row()).unwrap();
    assert_eq!(record.name, "Savaj 111 BG II");
    assert_eq!(record.slug, "savaj-111-bg-ii");
    assert_eq!(record.category, Category::Cotton);
    assert_eq!(record.crop_name, "BT Cotton");
    assert_eq!(record.seasonality, vec![Season::Monsoon]);
    assert_eq!(record.seed_color, "Black");
    assert_eq!(record.flower_color, "Cream");
    assert_eq!(record.plant_height, "150");
    assert_eq!(record.fruit_shape, "");
    assert_eq!(record.maturity_time, "160-170");
    assert_eq!(record.yield_expectation, "18-22");
    assert_eq!(record.description, "Big boll size, semi-erect plant");
    assert_eq!(
        record.morphological_characters.as_deref(),
        Some("Big boll size, semi-erect plant")
    );
    assert_eq!(record.difficulty_level, "Intermediate");
}

#[test]
fn normalize_sets_ingestion_defaults() {
    let record = normalize_row(&full_row()).unwrap();
    assert!(record.availability);
    assert!(!record.featured);
    assert_eq!(record.images.len(), 1);
    let image = record.primary_image().expect("placeholder image");
    assert_eq!(image.url, DEFAULT_PLACEHOLDER_IMAGE_URL);
    assert_eq!(image.alt_text, "Savaj 111 BG II seeds");
    assert_eq!(record.planting_instructions, content::PLANTING_INSTRUCTIONS);
    assert_eq!(record.care_instructions, content::CARE_INSTRUCTIONS);
    assert_eq!(record.harvesting_tips, content::HARVESTING_TIPS);
    assert_eq!(record.storage_guidance, content::STORAGE_GUIDANCE);
}

#[test]
fn normalize_uses_configured_placeholder_url() {
    let normalizer = Normalizer::new("https://cdn.example/placeholder.png");
    let record = normalizer.normalize(&full_row()).unwrap();
    assert_eq!(record.images[0].url, "https://cdn.example/placeholder.png");
}

#[test]
fn normalize_trims_product_name() {
    let row = RawRow::from_pairs(3, [("Product Name", "  Okra Green 11  ")]);
    let record = normalize_row(&row).unwrap();
    assert_eq!(record.name, "Okra Green 11");
    assert_eq!(record.slug, "okra-green-11");
}

#[test]
fn normalize_accepts_name_alias() {
    let row = RawRow::from_pairs(3, [("NAME", "Bottle Gourd Long")]);
    let record = normalize_row(&row).unwrap();
    assert_eq!(record.name, "Bottle Gourd Long");
    assert_eq!(record.category, Category::Vegetable);
}

#[test]
fn normalize_rejects_missing_name() {
    let row = RawRow::from_pairs(7, [("Crop Name", "Wheat")]);
    assert_eq!(
        normalize_row(&row).unwrap_err(),
        RowRejection::MissingProductName { row: 7 }
    );
}

#[test]
fn normalize_rejects_whitespace_name() {
    let row = RawRow::from_pairs(9, [("Product Name", "   "), ("Crop Name", "Wheat")]);
    assert_eq!(
        normalize_row(&row).unwrap_err(),
        RowRejection::MissingProductName { row: 9 }
    );
}

#[test]
fn normalize_category_precedence() {
    let row = RawRow::from_pairs(
        2,
        [("Product Name", "Tomato Seed"), ("Crop Name", "Cotton Hybrid")],
    );
    assert_eq!(normalize_row(&row).unwrap().category, Category::Cotton);
}

#[test]
fn normalize_missing_crop_defaults_to_other() {
    let row = RawRow::from_pairs(2, [("Product Name", "Savaj Sun 9")]);
    let record = normalize_row(&row).unwrap();
    assert_eq!(record.crop_name, "Other");
    assert_eq!(record.category, Category::Other);
    assert_eq!(record.seo_metadata.keywords, vec!["Savaj Sun 9", "Other"]);
}

#[test]
fn normalize_multi_label_seasonality() {
    let row = RawRow::from_pairs(
        2,
        [("Product Name", "Gram 5"), ("Season", "Kharif and Rabi")],
    );
    assert_eq!(
        normalize_row(&row).unwrap().seasonality,
        vec![Season::Monsoon, Season::Winter]
    );
}

#[test]
fn normalize_empty_season_is_all_season() {
    let row = RawRow::from_pairs(2, [("Product Name", "Gram 5"), ("Season", "")]);
    assert_eq!(
        normalize_row(&row).unwrap().seasonality,
        vec![Season::AllSeason]
    );
}

#[test]
fn normalize_seed_color_falls_back_to_fruit_colour() {
    let row = RawRow::from_pairs(
        2,
        [("Product Name", "Chilli Teja"), ("Fruit Colour", "Dark red")],
    );
    assert_eq!(normalize_row(&row).unwrap().seed_color, "Dark red");
}

#[test]
fn normalize_seed_color_preferred_over_fruit_color() {
    let row = RawRow::from_pairs(
        2,
        [
            ("Product Name", "Chilli Teja"),
            ("Fruit Color", "Red"),
            ("Seed Color", "Yellow"),
        ],
    );
    assert_eq!(normalize_row(&row).unwrap().seed_color, "Yellow");
}

#[test]
fn normalize_maturity_and_yield_fallbacks() {
    let row = RawRow::from_pairs(2, [("Product Name", "Maize 9")]);
    let record = normalize_row(&row).unwrap();
    assert_eq!(record.maturity_time, "Medium");
    assert_eq!(record.yield_expectation, "High");
    assert_eq!(record.seed_color, "");
    assert_eq!(record.flower_color, "");
    assert_eq!(record.plant_height, "");
}

#[test]
fn normalize_maturity_days_preferred_over_other_maturity_column() {
    let row = RawRow::from_pairs(
        2,
        [
            ("Product Name", "Maize 9"),
            ("Maturity Group", "Early"),
            ("Maturity Days", "95"),
        ],
    );
    assert_eq!(normalize_row(&row).unwrap().maturity_time, "95");
}

#[test]
fn normalize_fabricates_descriptions_without_morphology() {
    let row = RawRow::from_pairs(2, [("Product Name", "Cumin 4"), ("Seed Color", "Grey")]);
    let record = normalize_row(&row).unwrap();
    assert_eq!(record.description, "Premium Cumin 4 seeds.");
    assert_eq!(
        record.long_description,
        "Cumin 4 is a premium quality seed.\n\nSeed/Fruit Color: Grey"
    );
    assert!(record.morphological_characters.is_none());
    assert_eq!(record.seo_metadata.description, "");
}

#[test]
fn normalize_keeps_source_long_description() {
    let row = RawRow::from_pairs(
        2,
        [
            ("Product Name", "Cumin 4"),
            ("Long Description", "Bold aromatic seed for rabi sowing."),
        ],
    );
    assert_eq!(
        normalize_row(&row).unwrap().long_description,
        "Bold aromatic seed for rabi sowing."
    );
}

#[test]
fn normalize_is_deterministic() {
    let row = full_row();
    assert_eq!(normalize_row(&row).unwrap(), normalize_row(&row).unwrap());
}

// -----------------------------------------------------------------------
// normalize_all
// -----------------------------------------------------------------------

#[test]
fn normalize_all_continues_past_rejections() {
    let rows = vec![
        RawRow::from_pairs(2, [("Product Name", "Wheat 1"), ("Crop Name", "Wheat")]),
        RawRow::from_pairs(3, [("Product Name", " "), ("Crop Name", "Wheat")]),
        RawRow::from_pairs(4, [("Product Name", "Wheat 2"), ("Crop Name", "Wheat")]),
    ];
    let batch = Normalizer::default().normalize_all(&rows);
    assert_eq!(batch.seen, 3);
    assert_eq!(batch.rejections, vec![RowRejection::MissingProductName { row: 3 }]);
    let names: Vec<&str> = batch.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Wheat 1", "Wheat 2"]);
}

#[test]
fn normalize_all_keeps_duplicate_names_in_order() {
    let rows = vec![
        RawRow::from_pairs(2, [("Product Name", "Okra 1"), ("Season", "Summer")]),
        RawRow::from_pairs(3, [("Product Name", "Okra 1"), ("Season", "Rabi")]),
    ];
    let batch = Normalizer::default().normalize_all(&rows);
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[1].seasonality, vec![Season::Winter]);
}
