//! Seasonal and spatial drop-first dummy encoders.

use std::collections::BTreeSet;

use polars::prelude::*;
use pricewise_traits::{CategoryEncoder, TransformError};

use crate::columns::{MARKET, MONTH, SEASONAL_PREFIX, SPATIAL_PREFIX};

fn source<'f>(frame: &'f DataFrame, name: &str) -> Result<&'f Column, TransformError> {
    frame.column(name).map_err(|_| TransformError::MissingColumn(name.to_string()))
}

/// Calendar-month dummies `m_<k>`; the earliest month present is the baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalEncoder;

impl CategoryEncoder for SeasonalEncoder {
    fn name(&self) -> &str {
        "seasonal"
    }

    fn source_column(&self) -> &str {
        MONTH
    }

    fn levels(&self, frame: &DataFrame) -> Result<Vec<String>, TransformError> {
        let months: BTreeSet<i32> = source(frame, MONTH)?.i32()?.into_iter().flatten().collect();
        Ok(months.into_iter().map(|m| m.to_string()).collect())
    }

    fn dummy_name(&self, level: &str) -> String {
        format!("{SEASONAL_PREFIX}{level}")
    }

    fn matches(&self, level: &str) -> Expr {
        level.parse::<i32>().map_or_else(|_| lit(false), |m| col(MONTH).eq(lit(m)))
    }
}

/// Market dummies `region_<market>`; the lexicographically first market is the baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialEncoder;

impl CategoryEncoder for SpatialEncoder {
    fn name(&self) -> &str {
        "spatial"
    }

    fn source_column(&self) -> &str {
        MARKET
    }

    fn levels(&self, frame: &DataFrame) -> Result<Vec<String>, TransformError> {
        let markets: BTreeSet<&str> = source(frame, MARKET)?.str()?.into_iter().flatten().collect();
        Ok(markets.into_iter().map(str::to_string).collect())
    }

    fn dummy_name(&self, level: &str) -> String {
        format!("{SPATIAL_PREFIX}{level}")
    }

    fn matches(&self, level: &str) -> Expr {
        col(MARKET).eq(lit(level.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummies(encoder: &dyn CategoryEncoder, df: DataFrame) -> DataFrame {
        let exprs = encoder.encode(&df).unwrap();
        df.lazy().with_columns(exprs).collect().unwrap()
    }

    #[test]
    fn seasonal_drops_first_month_present() {
        let df = df! { "month" => &[3, 1, 12, 3] }.unwrap();
        let out = dummies(&SeasonalEncoder, df);

        let names: Vec<&str> = out.get_column_names().into_iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["month", "m_3", "m_12"]);
        let m3: Vec<Option<i32>> = out.column("m_3").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(m3, vec![Some(1), Some(0), Some(0), Some(1)]);
    }

    #[test]
    fn spatial_levels_sorted() {
        let df = df! { "market" => &["Kenema", "Bo", "Western Area"] }.unwrap();
        assert_eq!(SpatialEncoder.levels(&df).unwrap(), vec!["Bo", "Kenema", "Western Area"]);

        let out = dummies(&SpatialEncoder, df);
        assert!(out.column("region_Bo").is_err());
        let wa: Vec<Option<i32>> =
            out.column("region_Western Area").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(wa, vec![Some(0), Some(0), Some(1)]);
    }

    #[test]
    fn single_level_yields_no_dummies() {
        let df = df! { "market" => &["Bo", "Bo"] }.unwrap();
        assert!(SpatialEncoder.encode(&df).unwrap().is_empty());
    }

    #[test]
    fn missing_source_column() {
        let df = df! { "price" => &[1.0] }.unwrap();
        assert!(matches!(SeasonalEncoder.levels(&df), Err(TransformError::MissingColumn(_))));
    }
}
