//! Heuristic schema resolution.

use std::sync::LazyLock;

use pricewise_primitives::{RawColumn, RawTable};
use regex::Regex;
use tracing::{debug, info};

use crate::{
    CommodityBinding, DateBinding, RegionBinding, RegionFlag, ResolverConfig, Role,
    SchemaBinding, SchemaError, WideCommodityMap,
    date::{COMPACT_MAX, COMPACT_MIN, compact_month, parse_month},
    friendly_commodity,
};

static YEAR_MONTH_TEXT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d{4}[-/]\d{1,2}$").ok());

/// Discovers which raw columns serve as date, price, region and commodity.
///
/// Resolution only walks ordered candidate lists and the table's column
/// order, so the same table always yields the same binding.
#[derive(Debug, Clone, Default)]
pub struct SchemaResolver {
    config: ResolverConfig,
}

impl SchemaResolver {
    /// Create a resolver with the serving profile.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::serving())
    }

    /// Create a resolver from a configuration.
    #[must_use]
    pub const fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the schema of `table`.
    ///
    /// # Errors
    /// Returns `SchemaError::Undetected` naming the first mandatory role
    /// (date, price, region) that could not be resolved.
    pub fn resolve(&self, table: &RawTable) -> Result<SchemaBinding, SchemaError> {
        let date = self.resolve_date(table).ok_or(SchemaError::Undetected(Role::Date))?;
        let price = self.resolve_price(table).ok_or(SchemaError::Undetected(Role::Price))?;

        let mut bound: Vec<&str> = date.columns();
        bound.push(&price);
        let region =
            self.resolve_region(table, &bound).ok_or(SchemaError::Undetected(Role::Region))?;
        let commodity = self.resolve_commodity(table);

        let binding = SchemaBinding { date, price, region, commodity };
        info!(
            date = %binding.date.describe(),
            price = %binding.price,
            region = %binding.region.describe(),
            mode = %binding.mode(),
            "resolved schema"
        );
        Ok(binding)
    }

    fn find<'t>(&self, table: &'t RawTable, names: &[String]) -> Option<&'t RawColumn> {
        names.iter().find_map(|name| table.column_ignore_case(name))
    }

    fn resolve_date(&self, table: &RawTable) -> Option<DateBinding> {
        let parses_any = |column: &RawColumn| column.iter().flatten().any(|v| parse_month(v).is_some());

        for name in &self.config.date_names {
            if let Some(column) = table.column_ignore_case(name) {
                if parses_any(column) {
                    return Some(DateBinding::Named(column.name().to_string()));
                }
                debug!(column = column.name(), "date candidate holds no parseable values");
            }
        }

        if let Some(pattern) = YEAR_MONTH_TEXT.as_ref() {
            let probe = self.config.probe_rows;
            let hit = table.columns().iter().filter(|c| c.is_textual()).find(|c| {
                c.iter().take(probe).flatten().any(|v| pattern.is_match(v.trim())) && parses_any(c)
            });
            if let Some(column) = hit {
                return Some(DateBinding::YearMonthText(column.name().to_string()));
            }
        }

        let year = self.find(table, &self.config.year_names);
        let month = self.find(table, &self.config.month_names);
        if let (Some(year), Some(month)) = (year, month) {
            let binding = DateBinding::YearAndMonth {
                year: year.name().to_string(),
                month: month.name().to_string(),
            };
            if (0..table.height()).any(|row| binding.month_at(table, row).is_some()) {
                return Some(binding);
            }
        }

        table
            .columns()
            .iter()
            .find(|c| {
                (0..c.len()).filter_map(|row| c.number(row)).any(|v| {
                    (COMPACT_MIN..=COMPACT_MAX).contains(&v) && compact_month(v).is_some()
                })
            })
            .map(|c| DateBinding::Compact(c.name().to_string()))
    }

    fn resolve_price(&self, table: &RawTable) -> Option<String> {
        if let Some(column) = self.find(table, &self.config.price_names) {
            return Some(column.name().to_string());
        }
        table
            .names()
            .find(|name| {
                let lower = name.to_lowercase();
                lower.contains("price")
                    && !self.config.price_exclusions.iter().any(|ex| lower.contains(ex.as_str()))
            })
            .map(str::to_string)
    }

    fn resolve_region(&self, table: &RawTable, bound: &[&str]) -> Option<RegionBinding> {
        if let Some(column) = self.find(table, &self.config.region_names) {
            return Some(RegionBinding::Column(column.name().to_string()));
        }

        let flags: Vec<RegionFlag> = table
            .names()
            .filter(|name| !bound.contains(name))
            .filter_map(|name| {
                let lower = name.to_lowercase();
                self.config
                    .region_flag_prefixes
                    .iter()
                    .find(|prefix| lower.starts_with(prefix.as_str()))
                    .map(|prefix| RegionFlag::from_column(name, prefix))
            })
            .collect();
        (!flags.is_empty()).then_some(RegionBinding::Flags(flags))
    }

    fn resolve_commodity(&self, table: &RawTable) -> CommodityBinding {
        if let Some(column) = self.find(table, &self.config.commodity_names) {
            return CommodityBinding::Tidy(column.name().to_string());
        }

        let prefix = self.config.commodity_flag_prefix.as_str();
        let mut map = WideCommodityMap::new();
        for name in table.names() {
            if name.to_lowercase().starts_with(prefix) {
                let suffix = name.get(prefix.len()..).unwrap_or_default();
                map.insert(friendly_commodity(suffix), name);
            }
        }

        if map.is_empty() { CommodityBinding::Single } else { CommodityBinding::Wide(map) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::from_rows(
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter().map(|r| r.iter().map(|c| Some((*c).to_string())).collect()).collect(),
        )
    }

    #[test]
    fn tidy_explicit_columns() {
        let t = table(
            &["Date", "Market", "Commodity", "price_sll"],
            &[&["2020-01-01", "Bo", "Rice (imported)", "10"]],
        );
        let binding = SchemaResolver::new().resolve(&t).unwrap();
        assert_eq!(binding.date, DateBinding::Named("Date".into()));
        assert_eq!(binding.price, "price_sll");
        assert_eq!(binding.region, RegionBinding::Column("Market".into()));
        assert_eq!(binding.commodity, CommodityBinding::Tidy("Commodity".into()));
    }

    #[test]
    fn region_synthesized_from_flags() {
        let t = table(
            &["date", "price", "region_Northern", "region_Southern"],
            &[&["2020-01", "10", "1", "0"], &["2020-02", "11", "0", "1"]],
        );
        let binding = SchemaResolver::new().resolve(&t).unwrap();
        assert_eq!(binding.region.region_at(&t, 0).as_deref(), Some("Northern"));
        assert_eq!(binding.region.region_at(&t, 1).as_deref(), Some("Southern"));
        assert_eq!(binding.mode(), crate::Mode::Single);
    }

    #[test]
    fn wide_commodity_map() {
        let t = table(
            &["date", "market", "price", "commodity_Rice (imported)", "commodity_palm_oil"],
            &[&["2020-01", "Bo", "10", "1", "0"]],
        );
        let binding = SchemaResolver::new().resolve(&t).unwrap();
        let CommodityBinding::Wide(map) = &binding.commodity else {
            panic!("expected wide mode, got {:?}", binding.commodity);
        };
        assert_eq!(map.labels().collect::<Vec<_>>(), vec!["Rice (imported)", "Oil (palm)"]);
        assert_eq!(map.get("Rice (imported)"), Some("commodity_Rice (imported)"));
    }

    #[test]
    fn date_fallback_strategies() {
        let text = table(&["obs", "price", "market"], &[&["2020/3", "1", "Bo"]]);
        assert_eq!(
            SchemaResolver::new().resolve(&text).unwrap().date,
            DateBinding::YearMonthText("obs".into())
        );

        let split = table(&["Year", "Month", "price", "market"], &[&["2020", "3", "1", "Bo"]]);
        assert_eq!(
            SchemaResolver::new().resolve(&split).unwrap().date,
            DateBinding::YearAndMonth { year: "Year".into(), month: "Month".into() }
        );

        let compact = table(&["ym", "price", "market"], &[&["202003", "1", "Bo"]]);
        assert_eq!(
            SchemaResolver::new().resolve(&compact).unwrap().date,
            DateBinding::Compact("ym".into())
        );
    }

    #[test]
    fn price_substring_fallback_respects_exclusions() {
        let t = table(&["date", "market", "unit_price_lag1", "unit_price"], &[&["2020-01", "Bo", "1", "2"]]);
        assert_eq!(SchemaResolver::new().resolve(&t).unwrap().price, "unit_price_lag1");
        let features = SchemaResolver::with_config(ResolverConfig::features());
        assert_eq!(features.resolve(&t).unwrap().price, "unit_price");
    }

    #[test]
    fn feature_profile_accepts_market_flags() {
        let t = table(&["date", "price", "market_Kenema"], &[&["2020-01", "1", "1"]]);
        assert_eq!(
            SchemaResolver::new().resolve(&t).unwrap_err(),
            SchemaError::Undetected(Role::Region)
        );
        let binding = SchemaResolver::with_config(ResolverConfig::features()).resolve(&t).unwrap();
        assert_eq!(binding.region.region_at(&t, 0).as_deref(), Some("Kenema"));
    }

    #[test]
    fn missing_roles_are_named() {
        let no_date = table(&["price", "market"], &[&["1", "Bo"]]);
        assert_eq!(SchemaResolver::new().resolve(&no_date).unwrap_err(), SchemaError::Undetected(Role::Date));

        let no_price = table(&["date", "market"], &[&["2020-01", "Bo"]]);
        assert_eq!(SchemaResolver::new().resolve(&no_price).unwrap_err(), SchemaError::Undetected(Role::Price));
    }

    #[test]
    fn resolution_is_deterministic() {
        let t = table(
            &["period", "region_b", "region_a", "cost_price", "commodity_x", "commodity_y"],
            &[&["2020-01", "1", "0", "5", "1", "0"]],
        );
        let resolver = SchemaResolver::with_config(ResolverConfig::features());
        let first = resolver.resolve(&t).unwrap();
        for _ in 0..10 {
            assert_eq!(resolver.resolve(&t).unwrap(), first);
        }
    }
}
