//! Immutable dataset value and its query surface.

use std::path::Path;

use pricewise_ingest::SmartLoader;
use pricewise_primitives::{
    CANONICAL_COMMODITIES, CANONICAL_REGIONS, Month, NormalizedRow, RawTable, canonical_order,
    labels_match, normalize_label,
};
use serde::Serialize;

use crate::{CommodityBinding, DatasetError, Mode, Normalizer, SchemaBinding, SchemaResolver};

/// Commodity value meaning "no commodity filter".
const ANY_COMMODITY: &str = "price";
/// Region value meaning "no region filter".
const ANY_REGION: &str = "All";

/// A commodity/region/window query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Commodity label; blank or `price` selects every commodity.
    pub commodity: Option<String>,
    /// Region label; blank or `All` selects every region.
    pub region: Option<String>,
    /// Keep only the last `months` matching rows.
    pub months: Option<usize>,
}

impl Selection {
    /// Select everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a commodity.
    #[must_use]
    pub fn commodity(mut self, commodity: impl Into<String>) -> Self {
        self.commodity = Some(commodity.into());
        self
    }

    /// Restrict to a region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Keep the last `months` rows.
    #[must_use]
    pub const fn months(mut self, months: usize) -> Self {
        self.months = Some(months);
        self
    }

    fn commodity_filter(&self) -> Option<&str> {
        self.commodity
            .as_deref()
            .filter(|c| !c.trim().is_empty() && normalize_label(c) != ANY_COMMODITY)
    }

    fn region_filter(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.trim().is_empty() && !labels_match(r, ANY_REGION))
    }
}

/// One point of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Observation month.
    pub date: Month,
    /// Price.
    pub price: f64,
}

/// Description of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Normalized row count.
    pub rows: usize,
    /// Resolved date source.
    pub date_column: String,
    /// Resolved price column.
    pub price_column: String,
    /// Resolved region source.
    pub region_column: String,
    /// Commodity encoding mode.
    pub mode: Mode,
    /// Distinct regions, sorted.
    pub regions: Vec<String>,
    /// Commodity vocabulary.
    pub commodities: Vec<String>,
}

/// Vocabularies offered for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    /// Commodity vocabulary.
    pub commodities: Vec<String>,
    /// `All` followed by the canonically ordered regions.
    pub regions: Vec<String>,
}

/// A loaded, resolved and normalized dataset.
///
/// Built once and then only read; a data or schema change means building a
/// new value.
#[derive(Debug, Clone)]
pub struct Dataset {
    table: RawTable,
    binding: SchemaBinding,
    rows: Vec<NormalizedRow>,
    regions: Vec<String>,
    commodities: Vec<String>,
}

impl Dataset {
    /// Load `path` with the default loader, serving resolver and nominal prices.
    ///
    /// # Errors
    /// Returns `DatasetError` if the file is unreadable or the schema cannot be resolved.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Self::load(&SmartLoader::new(), path, &SchemaResolver::new(), &Normalizer::new())
    }

    /// Load `path` with explicit components.
    ///
    /// # Errors
    /// Returns `DatasetError` if the file is unreadable or the schema cannot be resolved.
    pub fn load(
        loader: &SmartLoader,
        path: impl AsRef<Path>,
        resolver: &SchemaResolver,
        normalizer: &Normalizer,
    ) -> Result<Self, DatasetError> {
        let table = loader.load(path)?;
        Self::from_table(table, resolver, normalizer)
    }

    /// Build from an already loaded table.
    ///
    /// # Errors
    /// Returns `DatasetError::Schema` if a mandatory role cannot be resolved.
    pub fn from_table(
        table: RawTable,
        resolver: &SchemaResolver,
        normalizer: &Normalizer,
    ) -> Result<Self, DatasetError> {
        let binding = resolver.resolve(&table)?;
        let rows = normalizer.normalize(&table, &binding);

        let regions = canonical_order(rows.iter().map(|r| r.market.as_str()), &CANONICAL_REGIONS);
        let commodities = match &binding.commodity {
            CommodityBinding::Tidy(_) => {
                canonical_order(rows.iter().map(|r| r.commodity.as_str()), &CANONICAL_COMMODITIES)
            }
            CommodityBinding::Wide(map) => canonical_order(map.labels(), &CANONICAL_COMMODITIES),
            CommodityBinding::Single => vec![ANY_COMMODITY.to_string()],
        };

        Ok(Self { table, binding, rows, regions, commodities })
    }

    /// Raw table the dataset was built from.
    #[must_use]
    pub const fn table(&self) -> &RawTable {
        &self.table
    }

    /// Resolved schema.
    #[must_use]
    pub const fn binding(&self) -> &SchemaBinding {
        &self.binding
    }

    /// Normalized rows, sorted by month.
    #[must_use]
    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    /// Regions, canonical ones first then in encounter order.
    #[must_use]
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Commodity vocabulary, canonical ones first then in encounter order.
    ///
    /// A single-series dataset offers only `price`.
    #[must_use]
    pub fn commodities(&self) -> &[String] {
        &self.commodities
    }

    /// Dataset description.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut regions = self.regions.clone();
        regions.sort();
        Summary {
            rows: self.rows.len(),
            date_column: self.binding.date.describe(),
            price_column: self.binding.price.clone(),
            region_column: self.binding.region.describe(),
            mode: self.binding.mode(),
            regions,
            commodities: self.commodities.clone(),
        }
    }

    /// Selection vocabularies.
    #[must_use]
    pub fn options(&self) -> Options {
        let mut regions = Vec::with_capacity(self.regions.len() + 1);
        regions.push(ANY_REGION.to_string());
        regions.extend(self.regions.iter().cloned());
        Options { commodities: self.commodities.clone(), regions }
    }

    /// Rows matching `selection`, in month order.
    ///
    /// Commodity filtering is a no-op for single-series data. An empty result
    /// is a valid answer.
    #[must_use]
    pub fn select(&self, selection: &Selection) -> Vec<&NormalizedRow> {
        let commodity =
            selection.commodity_filter().filter(|_| self.binding.mode() != Mode::Single);
        let region = selection.region_filter();

        let mut out: Vec<&NormalizedRow> = self
            .rows
            .iter()
            .filter(|r| commodity.is_none_or(|c| labels_match(&r.commodity, c)))
            .filter(|r| region.is_none_or(|g| labels_match(&r.market, g)))
            .collect();

        if let Some(months) = selection.months.filter(|&m| m > 0) {
            let skip = out.len().saturating_sub(months);
            out.drain(..skip);
        }
        out
    }

    /// `(date, price)` points of the selection.
    #[must_use]
    pub fn series(&self, selection: &Selection) -> Vec<SeriesPoint> {
        self.select(selection)
            .into_iter()
            .map(|r| SeriesPoint { date: r.date, price: r.price })
            .collect()
    }

    /// Most recent row of the selection.
    ///
    /// # Errors
    /// Returns `DatasetError::NoDataForSelection` when nothing matches.
    pub fn latest(&self, selection: &Selection) -> Result<&NormalizedRow, DatasetError> {
        self.select(selection).pop().ok_or_else(|| DatasetError::NoDataForSelection {
            commodity: selection.commodity.clone().unwrap_or_default(),
            region: selection.region.clone().unwrap_or_default(),
        })
    }
}
