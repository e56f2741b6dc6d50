//! Fabricated catalog copy for fields the spreadsheet never carries.

use seedcat_core::{Category, ProductImage, SeoMetadata};

pub const PLANTING_INSTRUCTIONS: &str =
    "Sow at recommended depth and spacing. Ensure adequate moisture.";
pub const CARE_INSTRUCTIONS: &str =
    "Regular weeding and irrigation recommended. Monitor for pests.";
pub const HARVESTING_TIPS: &str = "Harvest when crop reaches physiological maturity.";
pub const STORAGE_GUIDANCE: &str = "Store in cool, dry, and hygienic place.";

/// Short description: the morphological characters when the sheet has
/// them, otherwise a one-line generic blurb.
#[must_use]
pub fn short_description(name: &str, morphological: Option<&str>) -> String {
    morphological.map_or_else(|| format!("Premium {name} seeds."), str::to_string)
}

/// Long-form description synthesized from the resolved attributes.
///
/// Attribute lines are only emitted for values that resolved.
#[must_use]
pub fn long_description(name: &str, morphological: Option<&str>, seed_color: &str) -> String {
    let mut text = format!("{name} is a premium quality seed.");

    let mut details = Vec::new();
    if let Some(morph) = morphological {
        details.push(format!("Morphological Characters: {morph}"));
    }
    if !seed_color.is_empty() {
        details.push(format!("Seed/Fruit Color: {seed_color}"));
    }

    if !details.is_empty() {
        text.push_str("\n\n");
        text.push_str(&details.join("\n"));
    }

    text
}

#[must_use]
pub fn placeholder_image(url: &str, name: &str) -> ProductImage {
    ProductImage {
        url: url.to_string(),
        alt_text: format!("{name} seeds"),
        is_primary: true,
    }
}

/// SEO metadata: keywords are the name, the category label, and the
/// lower-cased crop label, skipping blanks.
#[must_use]
pub fn seo_metadata(
    name: &str,
    category: Category,
    crop_label: &str,
    morphological: Option<&str>,
) -> SeoMetadata {
    let crop_lower = crop_label.trim().to_lowercase();
    let keywords = [name.to_string(), category.to_string(), crop_lower]
        .into_iter()
        .filter(|k| !k.is_empty())
        .collect();

    SeoMetadata {
        title: name.to_string(),
        description: morphological.unwrap_or_default().to_string(),
        keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_description_prefers_morphological_text() {
        assert_eq!(
            short_description("Savaj 7", Some("Tall, bushy")),
            "Tall, bushy"
        );
        assert_eq!(short_description("Savaj 7", None), "Premium Savaj 7 seeds.");
    }

    #[test]
    fn long_description_with_all_attributes() {
        assert_eq!(
            long_description("Savaj 7", Some("Tall"), "Brown"),
            "Savaj 7 is a premium quality seed.\n\nMorphological Characters: Tall\nSeed/Fruit Color: Brown"
        );
    }

    #[test]
    fn long_description_without_attributes_is_one_line() {
        assert_eq!(
            long_description("Savaj 7", None, ""),
            "Savaj 7 is a premium quality seed."
        );
    }

    #[test]
    fn seo_keywords_skip_blank_crop() {
        let seo = seo_metadata("Okra 11", Category::Vegetable, "  ", None);
        assert_eq!(seo.keywords, vec!["Okra 11", "Vegetable"]);
        assert_eq!(seo.description, "");
    }

    #[test]
    fn seo_keywords_lowercase_crop() {
        let seo = seo_metadata("Savaj 111", Category::Cotton, "BT Cotton", Some("Big bolls"));
        assert_eq!(seo.keywords, vec!["Savaj 111", "Cotton", "bt cotton"]);
        assert_eq!(seo.title, "Savaj 111");
        assert_eq!(seo.description, "Big bolls");
    }

    #[test]
    fn placeholder_image_is_primary() {
        let image = placeholder_image("https://cdn.example/seed.jpg", "Okra 11");
        assert!(image.is_primary);
        assert_eq!(image.alt_text, "Okra 11 seeds");
    }
}
