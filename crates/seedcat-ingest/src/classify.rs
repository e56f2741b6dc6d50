//! Category and seasonality rule tables.
//!
//! Both classifiers are ordered decision lists. For categories the first
//! matching rule wins, so table order is the tie-break when a crop label
//! contains more than one fragment. Season rules are independent and each
//! one that matches contributes its label.

use seedcat_core::{Category, Season};

/// Crop-name rules, evaluated in order against the lower-cased, trimmed
/// crop label.
const CROP_RULES: &[(&[&str], Category)] = &[
    (&["cotton"], Category::Cotton),
    (&["wheat"], Category::Wheat),
    (&["groundnut"], Category::Groundnut),
    (&["cumin"], Category::Cumin),
    (&["sesa"], Category::Sesame),
    (&["castor"], Category::Castor),
    (&["maize"], Category::Maize),
    (&["gram"], Category::Gram),
    (&["pigeon"], Category::PigeonPea),
    (&["millet", "bajra"], Category::Millet),
    (&["cori"], Category::Coriander),
];

/// Product-name keywords that mark a vegetable when no crop rule matched.
const VEGETABLE_KEYWORDS: &[&str] = &[
    "okra", "bottle", "bitter", "sponge", "ridge", "chilli", "tomato", "cucumber", "bean",
];

const SEASON_RULES: &[(&[&str], Season)] = &[
    (&["kharif", "monsoon"], Season::Monsoon),
    (&["rabi", "winter"], Season::Winter),
    (&["summer"], Season::Summer),
    (&["all season", "all-season"], Season::AllSeason),
];

/// Classifies a product into exactly one [`Category`].
///
/// Crop-name rules take strict precedence over the vegetable keyword scan of
/// the product name; [`Category::Other`] when nothing matches.
#[must_use]
pub fn classify_category(crop_name: &str, product_name: &str) -> Category {
    let crop = crop_name.trim().to_lowercase();

    if let Some((_, category)) = CROP_RULES
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| crop.contains(f)))
    {
        return *category;
    }

    let product = product_name.to_lowercase();
    if VEGETABLE_KEYWORDS.iter().any(|k| product.contains(k)) {
        return Category::Vegetable;
    }

    Category::Other
}

/// Maps a free-form season string to one or more [`Season`] labels.
///
/// Returns `[AllSeason]` when the input is absent, blank, or matches no rule.
/// Labels appear in rule-table order and never repeat.
#[must_use]
pub fn classify_seasonality(season: Option<&str>) -> Vec<Season> {
    let lower = season.map(str::to_lowercase).unwrap_or_default();

    let mut seasons: Vec<Season> = SEASON_RULES
        .iter()
        .filter(|(fragments, _)| fragments.iter().any(|f| lower.contains(f)))
        .map(|(_, season)| *season)
        .collect();

    if seasons.is_empty() {
        seasons.push(Season::AllSeason);
    }

    seasons
}
