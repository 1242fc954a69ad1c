//! Conversion between normalized rows and polars frames.

use polars::prelude::*;
use pricewise_primitives::NormalizedRow;

use crate::{
    FeatureError,
    columns::{COMMODITY, DATE, MARKET, MONTH, PERIOD, PRICE},
};

/// Build the base frame `date, commodity, market, price, month` plus the
/// internal period index.
///
/// # Errors
/// Returns `FeatureError::Polars` if the frame cannot be assembled.
pub fn rows_to_frame(rows: &[NormalizedRow]) -> Result<DataFrame, FeatureError> {
    let dates: Vec<i32> = rows.iter().map(|r| r.date.epoch_days()).collect();
    let commodities: Vec<&str> = rows.iter().map(|r| r.commodity.as_str()).collect();
    let markets: Vec<&str> = rows.iter().map(|r| r.market.as_str()).collect();
    let prices: Vec<f64> = rows.iter().map(|r| r.price).collect();
    let months: Vec<i32> = rows.iter().map(|r| r.date.number() as i32).collect();
    let periods: Vec<i32> = rows.iter().map(|r| r.date.period()).collect();

    let df = df! {
        DATE => dates,
        COMMODITY => commodities,
        MARKET => markets,
        PRICE => prices,
        MONTH => months,
        PERIOD => periods,
    }?;

    Ok(df.lazy().with_column(col(DATE).cast(DataType::Date)).collect()?)
}
