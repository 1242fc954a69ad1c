//! Candidate-name configuration for schema resolution.

/// Column-name candidates and probing limits used by [`SchemaResolver`](crate::SchemaResolver).
///
/// Every name list is matched case-insensitively and in order; the first
/// present candidate wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Names of a column holding full dates or months.
    pub date_names: Vec<String>,
    /// Names of a numeric year column.
    pub year_names: Vec<String>,
    /// Names of a numeric month column.
    pub month_names: Vec<String>,
    /// Exact price column names.
    pub price_names: Vec<String>,
    /// Substrings that disqualify a column from the "contains price" fallback.
    pub price_exclusions: Vec<String>,
    /// Explicit region or market column names.
    pub region_names: Vec<String>,
    /// Prefixes of one-hot region flag columns.
    pub region_flag_prefixes: Vec<String>,
    /// Tidy commodity column names.
    pub commodity_names: Vec<String>,
    /// Prefix of one-hot commodity flag columns.
    pub commodity_flag_prefix: String,
    /// Leading cells inspected when probing a column's text pattern.
    pub probe_rows: usize,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl ResolverConfig {
    /// Profile used for the serving path.
    #[must_use]
    pub fn serving() -> Self {
        Self {
            date_names: names(&["date", "month", "period", "obs_date", "month_year", "time", "dt"]),
            year_names: names(&["year", "yr", "yyyy"]),
            month_names: names(&["month", "mn", "mm"]),
            price_names: names(&["price_sll", "retail_price_sll", "price_slll", "price"]),
            price_exclusions: Vec::new(),
            region_names: names(&[
                "market",
                "region",
                "pop_region",
                "district",
                "area",
                "market_name",
                "select market",
                "location",
                "city",
                "region_name",
            ]),
            region_flag_prefixes: names(&["region_"]),
            commodity_names: names(&["commodity", "item", "product", "commodity_name"]),
            commodity_flag_prefix: "commodity_".to_string(),
            probe_rows: 20,
        }
    }

    /// Profile used when preparing features.
    ///
    /// Also accepts `market_` and `district_` flags, and ignores derived
    /// `_lag`/`_roll` columns when falling back to any "price" column.
    #[must_use]
    pub fn features() -> Self {
        Self {
            price_exclusions: names(&["_lag", "_roll"]),
            region_flag_prefixes: names(&["region_", "market_", "district_"]),
            ..Self::serving()
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::serving()
    }
}

/// Options for [`Normalizer`](crate::Normalizer).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// CPI column used to deflate nominal prices into real prices.
    pub cpi_column: Option<String>,
}

impl NormalizeConfig {
    /// Deflate prices by the named CPI column.
    #[must_use]
    pub fn with_cpi(column: impl Into<String>) -> Self {
        Self { cpi_column: Some(column.into()) }
    }
}
