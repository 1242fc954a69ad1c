//! Column names of the engineered feature table.

/// Observation month (polars `Date`, first day of the month).
pub const DATE: &str = "date";
/// Commodity label.
pub const COMMODITY: &str = "commodity";
/// Market label.
pub const MARKET: &str = "market";
/// Price, real when CPI deflation was applied.
pub const PRICE: &str = "price";
/// Calendar month number, 1 through 12.
pub const MONTH: &str = "month";
/// Diagnostic winsorized price path.
pub const PRICE_SMOOTHED: &str = "price_smoothed";
/// Continuous month index, internal to the engine.
pub(crate) const PERIOD: &str = "__period";

/// Partition key of every group-wise transform.
pub const PARTITION: [&str; 2] = [COMMODITY, MARKET];

/// Identifier columns excluded from the manifest.
pub const IDENTIFIERS: [&str; 4] = [DATE, COMMODITY, MARKET, PRICE];

/// Prefix of forward target columns.
pub const TARGET_PREFIX: &str = "target_";
/// Prefix of seasonal dummy columns.
pub const SEASONAL_PREFIX: &str = "m_";
/// Prefix of spatial dummy columns.
pub const SPATIAL_PREFIX: &str = "region_";

/// Lag column for `k` months back.
#[must_use]
pub fn lag(k: usize) -> String {
    format!("lag{k}")
}

/// Rolling mean column over the previous `window` months.
#[must_use]
pub fn rolling_mean(window: usize) -> String {
    format!("roll{window}_mean")
}

/// Target column `h` months ahead.
#[must_use]
pub fn target(h: usize) -> String {
    format!("{TARGET_PREFIX}{h}m")
}

/// Whether a column is a drop-first dummy.
#[must_use]
pub fn is_dummy(name: &str) -> bool {
    let seasonal = name
        .strip_prefix(SEASONAL_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()));
    seasonal || name.starts_with(SPATIAL_PREFIX)
}
