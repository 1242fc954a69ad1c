//! Row normalization: raw table plus binding to canonical rows.

use std::collections::HashSet;

use pricewise_math::Deflator;
use pricewise_primitives::{NormalizedRow, RawTable};
use tracing::{debug, info, warn};

use crate::{NormalizeConfig, SchemaBinding};

/// Counts of rows dropped during normalization, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounts {
    /// Date missing or unparseable.
    pub date: usize,
    /// Price missing, non-numeric, or without a usable CPI value.
    pub price: usize,
    /// No region value and no active region flag.
    pub region: usize,
    /// Blank tidy commodity.
    pub commodity: usize,
    /// Exact duplicates of an earlier row.
    pub duplicate: usize,
}

impl DropCounts {
    /// Total rows dropped.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.date + self.price + self.region + self.commodity + self.duplicate
    }
}

/// Converts raw rows into [`NormalizedRow`]s.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    /// Create a normalizer with nominal prices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer from a configuration.
    #[must_use]
    pub const fn with_config(config: NormalizeConfig) -> Self {
        Self { config }
    }

    /// Normalize every row of `table`.
    ///
    /// Rows missing a date, price or region (or a tidy commodity) are dropped,
    /// exact duplicates keep their first occurrence, and the result is
    /// stably sorted by month.
    pub fn normalize(&self, table: &RawTable, binding: &SchemaBinding) -> Vec<NormalizedRow> {
        self.normalize_with_counts(table, binding).0
    }

    /// Like [`normalize`](Self::normalize), also reporting drop counts.
    pub fn normalize_with_counts(
        &self,
        table: &RawTable,
        binding: &SchemaBinding,
    ) -> (Vec<NormalizedRow>, DropCounts) {
        let cpi = self.cpi_column(table);
        let deflator = cpi.map(|name| {
            let column = table.column(name);
            let deflator =
                Deflator::fit((0..table.height()).map(|row| column.and_then(|c| c.number(row))));
            info!(column = name, base = ?deflator.base(), "deflating prices by CPI");
            (name, deflator)
        });

        let mut drops = DropCounts::default();
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(table.height());

        for row in 0..table.height() {
            let Some(date) = binding.date.month_at(table, row) else {
                drops.date += 1;
                continue;
            };
            let price = binding.price_at(table, row).and_then(|price| match &deflator {
                Some((name, d)) => table.column(name)?.number(row).and_then(|c| d.deflate(price, c)),
                None => Some(price),
            });
            let Some(price) = price else {
                drops.price += 1;
                continue;
            };
            let Some(market) = binding.region.region_at(table, row) else {
                drops.region += 1;
                continue;
            };
            let Some(commodity) = binding.commodity.commodity_at(table, row) else {
                drops.commodity += 1;
                continue;
            };

            let key = (date, commodity.clone(), market.clone(), price.to_bits());
            if !seen.insert(key) {
                drops.duplicate += 1;
                continue;
            }
            rows.push(NormalizedRow::new(date, commodity, market, price));
        }

        rows.sort_by_key(|r| r.date);

        debug!(?drops, "normalization drops");
        info!(rows = rows.len(), dropped = drops.total(), "normalized rows");
        (rows, drops)
    }

    fn cpi_column<'t>(&self, table: &'t RawTable) -> Option<&'t str> {
        let name = self.config.cpi_column.as_deref()?;
        let column = table.column_ignore_case(name);
        if column.is_none() {
            warn!(column = name, "CPI column not found, using nominal prices");
        }
        column.map(|c| c.name())
    }
}
