use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Crop label stored when the source row has no crop column or it is blank.
pub const DEFAULT_CROP_NAME: &str = "Other";
pub const DEFAULT_MATURITY_TIME: &str = "Medium";
pub const DEFAULT_YIELD_EXPECTATION: &str = "High";
pub const DEFAULT_DIFFICULTY_LEVEL: &str = "Intermediate";

/// Closed set of catalog categories a product can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Cotton,
    Wheat,
    Groundnut,
    Cumin,
    Sesame,
    Castor,
    Maize,
    Gram,
    #[serde(rename = "Pigeon Pea")]
    PigeonPea,
    Millet,
    Coriander,
    Vegetable,
    Other,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Cotton,
        Category::Wheat,
        Category::Groundnut,
        Category::Cumin,
        Category::Sesame,
        Category::Castor,
        Category::Maize,
        Category::Gram,
        Category::PigeonPea,
        Category::Millet,
        Category::Coriander,
        Category::Vegetable,
        Category::Other,
    ];

    /// Display label, also the value persisted in the `products.category` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cotton => "Cotton",
            Category::Wheat => "Wheat",
            Category::Groundnut => "Groundnut",
            Category::Cumin => "Cumin",
            Category::Sesame => "Sesame",
            Category::Castor => "Castor",
            Category::Maize => "Maize",
            Category::Gram => "Gram",
            Category::PigeonPea => "Pigeon Pea",
            Category::Millet => "Millet",
            Category::Coriander => "Coriander",
            Category::Vegetable => "Vegetable",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Parses a category label case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// Growing season label. A product carries one or more of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Monsoon,
    Winter,
    Summer,
    #[serde(rename = "All-Season")]
    AllSeason,
}

impl Season {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Monsoon => "Monsoon",
            Season::Winter => "Winter",
            Season::Summer => "Summer",
            Season::AllSeason => "All-Season",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Monsoon" => Ok(Season::Monsoon),
            "Winter" => Ok(Season::Winter),
            "Summer" => Ok(Season::Summer),
            "All-Season" => Ok(Season::AllSeason),
            other => Err(CoreError::UnknownSeason(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    pub alt_text: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

/// A canonical catalog entry built from one spreadsheet row.
///
/// `name` is the natural key: the store holds at most one record per name
/// and a later record with the same name replaces every field of the
/// earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,
    /// Always `slugify(&name)`. Distinct names may share a slug.
    pub slug: String,
    pub category: Category,
    pub crop_name: String,
    pub description: String,
    pub long_description: String,
    pub seed_color: String,
    pub morphological_characters: Option<String>,
    pub flower_color: String,
    pub plant_height: String,
    pub fruit_shape: String,
    /// Never empty; `[AllSeason]` when nothing in the source matched.
    pub seasonality: Vec<Season>,
    pub maturity_time: String,
    pub yield_expectation: String,
    pub difficulty_level: String,
    pub images: Vec<ProductImage>,
    pub planting_instructions: String,
    pub care_instructions: String,
    pub harvesting_tips: String,
    pub storage_guidance: String,
    pub availability: bool,
    pub featured: bool,
    pub seo_metadata: SeoMetadata,
}

impl ProductRecord {
    /// Returns the primary image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images.iter().find(|i| i.is_primary)
    }
}

/// Derives the URL slug for a product name.
///
/// Lower-cases the name, collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, and strips leading and trailing dashes.
/// Non-ASCII letters count as separators.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_simple_name() {
        assert_eq!(slugify("Savaj 111 BG II"), "savaj-111-bg-ii");
    }

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("Okra -- (Hybrid) #7"), "okra-hybrid-7");
    }

    #[test]
    fn slugify_strips_leading_and_trailing_separators() {
        assert_eq!(slugify("  ...Tomato Seed!! "), "tomato-seed");
    }

    #[test]
    fn slugify_treats_non_ascii_as_separator() {
        assert_eq!(slugify("Señorita Chilli"), "se-orita-chilli");
    }

    #[test]
    fn slugify_all_punctuation_is_empty() {
        assert_eq!(slugify("--- ***"), "");
    }

    #[test]
    fn slugify_output_alphabet_is_restricted() {
        let names = [
            "Cotton Hybrid",
            "  Bottle Gourd / Long ",
            "WHEAT_lok-1",
            "Pigeon Pea (Tur) 2024",
            "Ça va — Ridge Gourd",
        ];
        for name in names {
            let slug = slugify(name);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "unexpected character in {slug:?}"
            );
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug:?}");
            assert!(!slug.contains("--"), "{slug:?}");
            assert_eq!(slugify(name), slug, "slug must be stable for {name:?}");
        }
    }

    #[test]
    fn category_display_and_parse_agree() {
        for category in Category::ALL {
            let parsed: Category = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!("pigeon pea".parse::<Category>().unwrap(), Category::PigeonPea);
        assert!(matches!(
            "Soybean".parse::<Category>(),
            Err(CoreError::UnknownCategory(ref s)) if s == "Soybean"
        ));
    }

    #[test]
    fn season_serializes_with_hyphenated_label() {
        let json = serde_json::to_string(&vec![Season::Monsoon, Season::AllSeason]).unwrap();
        assert_eq!(json, r#"["Monsoon","All-Season"]"#);
    }

    #[test]
    fn season_parse_rejects_unknown_label() {
        assert_eq!("Winter".parse::<Season>().unwrap(), Season::Winter);
        assert!("Spring".parse::<Season>().is_err());
    }

    #[test]
    fn product_image_serializes_camel_case() {
        let image = ProductImage {
            url: "https://example.com/a.jpg".to_string(),
            alt_text: "A seeds".to_string(),
            is_primary: true,
        };
        let value = serde_json::to_value(&image).unwrap();
        assert_eq!(value["altText"], "A seeds");
        assert_eq!(value["isPrimary"], true);
    }
}
