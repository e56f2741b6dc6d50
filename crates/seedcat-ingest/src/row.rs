//! Untyped spreadsheet rows and the column lookups the normalizer runs over
//! them.
//!
//! Exports label the same field many ways (`Seed Color`, `seed colour`,
//! `Seed/Fruit Colour`), so lookups compare *normalized* labels: lower-case,
//! punctuation runs folded to one space, `colour` read as `color`.

use std::sync::LazyLock;

use regex::Regex;

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// A scalar cell value as read from the source sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Returns the trimmed textual form of the cell, or `None` when the cell
    /// is empty or whitespace-only.
    ///
    /// Integral numbers render without a fractional part (`120.0` → `"120"`).
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(n) => Some(format_number(*n)),
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.as_text().is_none()
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Normalizes a column label (or a lookup fragment) for comparison.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    let lower = label.to_lowercase();
    let spaced = NON_ALNUM_RE.replace_all(&lower, " ");
    spaced.trim().replace("colour", "color")
}

/// One data row: column label → value, in the sheet's column order.
///
/// Labels are unique within a row (the sheet reader disambiguates duplicate
/// headers). `row_number` is the 1-based row in the source sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    row_number: usize,
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    #[must_use]
    pub fn new(row_number: usize, cells: Vec<(String, CellValue)>) -> Self {
        Self { row_number, cells }
    }

    /// Convenience constructor for building rows from literal pairs.
    pub fn from_pairs<I, K, V>(row_number: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        Self::new(
            row_number,
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub fn row_number(&self) -> usize {
        self.row_number
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(label, _)| label.as_str())
    }

    /// Exact-label access, no normalization.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, value)| value)
    }

    /// `true` when every cell in the row is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_blank())
    }

    /// Resolves a fixed field by normalized-label equality.
    ///
    /// `aliases` are tried in order; for each alias the row's columns are
    /// scanned in order and the first non-blank match wins.
    #[must_use]
    pub fn field(&self, aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|alias| {
            let wanted = normalize_label(alias);
            self.first_non_blank(|label| label == wanted)
        })
    }

    /// Resolves a field by case-insensitive substring match of `fragment`
    /// against every column label. The first column in row order whose label
    /// contains the fragment and whose cell is non-blank wins.
    #[must_use]
    pub fn fuzzy(&self, fragment: &str) -> Option<String> {
        let wanted = normalize_label(fragment);
        self.first_non_blank(|label| label.contains(&wanted))
    }

    /// Like [`RawRow::fuzzy`] but tries each fragment in turn.
    #[must_use]
    pub fn fuzzy_any(&self, fragments: &[&str]) -> Option<String> {
        fragments.iter().find_map(|fragment| self.fuzzy(fragment))
    }

    fn first_non_blank<P>(&self, matches: P) -> Option<String>
    where
        P: Fn(&str) -> bool,
    {
        self.cells
            .iter()
            .filter(|(label, _)| matches(&normalize_label(label)))
            .find_map(|(_, value)| value.as_text())
    }
}
