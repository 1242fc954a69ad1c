//! Resolved column roles for a raw table.

use derive_more::Display;
use pricewise_primitives::{
    CANONICAL_COMMODITIES, CANONICAL_REGIONS, RawTable, SINGLE_SERIES_COMMODITY,
    UNKNOWN_COMMODITY, labels_match,
};
use serde::Serialize;

use crate::DateBinding;

/// A one-hot region flag column and the label it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFlag {
    /// Flag column name.
    pub column: String,
    /// Region label derived from the column suffix.
    pub label: String,
}

impl RegionFlag {
    /// Build a flag from a column name and the prefix it matched.
    ///
    /// The suffix has underscores turned into spaces and each word
    /// capitalized; a case-insensitive hit on a canonical region is replaced
    /// by the canonical spelling.
    #[must_use]
    pub fn from_column(column: &str, prefix: &str) -> Self {
        let suffix = column.get(prefix.len()..).unwrap_or_default().trim().replace('_', " ");
        let label = suffix.split_whitespace().map(capitalize).collect::<Vec<_>>().join(" ");
        let label = CANONICAL_REGIONS
            .iter()
            .find(|canon| labels_match(canon, &label))
            .map_or(label, |canon| (*canon).to_string());
        Self { column: column.to_string(), label }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Where the region of a row comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionBinding {
    /// An explicit categorical column.
    Column(String),
    /// One-hot flags scanned in order; the first active flag wins.
    Flags(Vec<RegionFlag>),
}

impl RegionBinding {
    /// Region of `row`, `None` when blank or when no flag is active.
    #[must_use]
    pub fn region_at(&self, table: &RawTable, row: usize) -> Option<String> {
        match self {
            Self::Column(name) => table
                .column(name)?
                .get(row)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            Self::Flags(flags) => flags
                .iter()
                .find(|flag| table.column(&flag.column).is_some_and(|c| c.is_active(row)))
                .map(|flag| flag.label.clone()),
        }
    }

    /// Human-readable description for reports.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Column(name) => name.clone(),
            Self::Flags(flags) => format!("synthesized from {} flag columns", flags.len()),
        }
    }
}

/// Friendly commodity label for a one-hot flag suffix.
///
/// The three canonical commodities are recognized regardless of case,
/// spacing, punctuation and word order; anything else is kept verbatim.
#[must_use]
pub fn friendly_commodity(suffix: &str) -> String {
    let key: String =
        suffix.chars().filter(char::is_ascii_alphanumeric).map(|c| c.to_ascii_lowercase()).collect();
    let canonical = match key.as_str() {
        "fishbonga" | "bongafish" | "bonga" => Some(CANONICAL_COMMODITIES[0]),
        "riceimported" | "importedrice" => Some(CANONICAL_COMMODITIES[1]),
        "oilpalm" | "palmoil" => Some(CANONICAL_COMMODITIES[2]),
        _ => None,
    };
    canonical.map_or_else(|| suffix.trim().to_string(), str::to_string)
}

/// Ordered map from friendly commodity label to its one-hot flag column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideCommodityMap {
    entries: Vec<(String, String)>,
}

impl WideCommodityMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a label.
    ///
    /// A label already present keeps its position but takes the new column.
    pub fn insert(&mut self, label: impl Into<String>, column: impl Into<String>) {
        let label = label.into();
        let column = column.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = column,
            None => self.entries.push((label, column)),
        }
    }

    /// Flag column for a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, c)| c.as_str())
    }

    /// Labels in map order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// `(label, column)` pairs in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(l, c)| (l.as_str(), c.as_str()))
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label of the first active flag of `row`.
    #[must_use]
    pub fn active_label(&self, table: &RawTable, row: usize) -> Option<&str> {
        self.iter()
            .find(|(_, column)| table.column(column).is_some_and(|c| c.is_active(row)))
            .map(|(label, _)| label)
    }
}

/// How commodities are encoded in the raw table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommodityBinding {
    /// One categorical commodity column.
    Tidy(String),
    /// One-hot flag columns.
    Wide(WideCommodityMap),
    /// No commodity information: the table is a single series.
    Single,
}

/// Commodity encoding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Long form with a commodity column.
    #[display("tidy")]
    Tidy,
    /// One-hot commodity flags.
    #[display("wide")]
    Wide,
    /// Price only.
    #[display("single")]
    Single,
}

impl CommodityBinding {
    /// Encoding mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Tidy(_) => Mode::Tidy,
            Self::Wide(_) => Mode::Wide,
            Self::Single => Mode::Single,
        }
    }

    /// Commodity of `row`.
    ///
    /// Tidy rows with a blank commodity yield `None`. Wide rows with no active
    /// flag get [`UNKNOWN_COMMODITY`]; single-series rows always get
    /// [`SINGLE_SERIES_COMMODITY`].
    #[must_use]
    pub fn commodity_at(&self, table: &RawTable, row: usize) -> Option<String> {
        match self {
            Self::Tidy(name) => table
                .column(name)?
                .get(row)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            Self::Wide(map) => {
                Some(map.active_label(table, row).unwrap_or(UNKNOWN_COMMODITY).to_string())
            }
            Self::Single => Some(SINGLE_SERIES_COMMODITY.to_string()),
        }
    }
}

/// Column roles resolved for one raw table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaBinding {
    /// Observation month source.
    pub date: DateBinding,
    /// Price column.
    pub price: String,
    /// Region source.
    pub region: RegionBinding,
    /// Commodity encoding.
    pub commodity: CommodityBinding,
}

impl SchemaBinding {
    /// Commodity encoding mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.commodity.mode()
    }

    /// Numeric price of `row`.
    #[must_use]
    pub fn price_at(&self, table: &RawTable, row: usize) -> Option<f64> {
        table.column(&self.price)?.number(row)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("region_Northern", "region_", "Northern")]
    #[case("region_north_western", "region_", "North Western")]
    #[case("region_WESTERN AREA", "region_", "Western Area")]
    #[case("market_freetown central", "market_", "Freetown Central")]
    fn region_flag_labels(#[case] column: &str, #[case] prefix: &str, #[case] label: &str) {
        assert_eq!(RegionFlag::from_column(column, prefix).label, label);
    }

    #[rstest]
    #[case("Rice (imported)", "Rice (imported)")]
    #[case("rice(imported)", "Rice (imported)")]
    #[case(" RICE _ IMPORTED ", "Rice (imported)")]
    #[case("imported rice", "Rice (imported)")]
    #[case("Bonga", "Fish (bonga)")]
    #[case("palm oil", "Oil (palm)")]
    #[case("Cassava ", "Cassava")]
    fn friendly_commodity_labels(#[case] suffix: &str, #[case] label: &str) {
        assert_eq!(friendly_commodity(suffix), label);
    }

    #[test]
    fn wide_map_duplicate_takes_last_column() {
        let mut map = WideCommodityMap::new();
        map.insert("Rice (imported)", "commodity_rice (imported)");
        map.insert("Fish (bonga)", "commodity_bonga");
        map.insert("Rice (imported)", "commodity_imported rice");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Rice (imported)"), Some("commodity_imported rice"));
        assert_eq!(map.labels().collect::<Vec<_>>(), vec!["Rice (imported)", "Fish (bonga)"]);
    }

    #[test]
    fn first_active_flag_wins() {
        let table = RawTable::from_rows(
            vec!["region_a".into(), "region_b".into()],
            vec![
                vec![Some("0".into()), Some("1".into())],
                vec![Some("yes".into()), Some("1".into())],
                vec![Some("0".into()), Some("0".into())],
            ],
        );
        let binding = RegionBinding::Flags(vec![
            RegionFlag::from_column("region_a", "region_"),
            RegionFlag::from_column("region_b", "region_"),
        ]);
        assert_eq!(binding.region_at(&table, 0).as_deref(), Some("B"));
        assert_eq!(binding.region_at(&table, 1).as_deref(), Some("A"));
        assert_eq!(binding.region_at(&table, 2), None);
    }

    #[test]
    fn mode_display_and_serialize() {
        assert_eq!(Mode::Wide.to_string(), "wide");
        assert_eq!(serde_json::to_string(&Mode::Single).unwrap(), "\"single\"");
    }
}
