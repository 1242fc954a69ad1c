//! Winsorization operations for outlier handling.

use polars::prelude::*;

use crate::MathError;

/// Temporary column holding month-over-month changes.
const CHANGE_COL: &str = "__pct_change";

/// Winsorize columns of a LazyFrame to quantiles of their own partition.
///
/// Values below the lower quantile are clipped to it, values above the
/// upper quantile are clipped to it. Nulls stay null.
///
/// # Arguments
/// * `df` - Input LazyFrame
/// * `data_cols` - Columns to winsorize
/// * `partition` - Columns identifying a partition
/// * `percentile` - Percentile threshold (e.g., 0.01 for 1st/99th percentiles)
///
/// # Returns
/// LazyFrame with winsorized columns.
pub fn winsorize_over(
    df: LazyFrame,
    data_cols: &[&str],
    partition: &[&str],
    percentile: f64,
) -> LazyFrame {
    let lower_q = percentile;
    let upper_q = 1.0 - percentile;
    let over: Vec<Expr> = partition.iter().map(|&c| col(c)).collect();

    let mut lf = df;

    for &col_name in data_cols {
        let lower_bound =
            col(col_name).quantile(lit(lower_q), QuantileMethod::Linear).over(over.clone());
        let upper_bound =
            col(col_name).quantile(lit(upper_q), QuantileMethod::Linear).over(over.clone());

        lf = lf.with_column(
            when(col(col_name).lt(lower_bound.clone()))
                .then(lower_bound)
                .when(col(col_name).gt(upper_bound.clone()))
                .then(upper_bound)
                .otherwise(col(col_name))
                .alias(col_name),
        );
    }

    lf
}

/// Reconstruct a smoothed price path from winsorized percent changes.
///
/// Within each partition (rows sorted by time), the month-over-month percent
/// change is clipped to the partition's own `[percentile, 1 - percentile]`
/// quantiles and compounded from the partition's first observed value.
/// A change is undefined (and treated as flat) for the first row of a
/// partition and after a zero value.
///
/// # Arguments
/// * `df` - Input LazyFrame sorted by partition, then time
/// * `value_col` - Price column
/// * `partition` - Columns identifying a partition
/// * `percentile` - Percentile threshold
/// * `alias` - Name of the output column
pub fn winsorized_path(
    df: LazyFrame,
    value_col: &str,
    partition: &[&str],
    percentile: f64,
    alias: &str,
) -> LazyFrame {
    let over: Vec<Expr> = partition.iter().map(|&c| col(c)).collect();
    let prev = col(value_col).shift(lit(1));

    let with_change = df.with_column(
        when(prev.clone().neq(lit(0.0)))
            .then(col(value_col) / prev - lit(1.0))
            .otherwise(lit(NULL).cast(DataType::Float64))
            .over(over.clone())
            .alias(CHANGE_COL),
    );

    winsorize_over(with_change, &[CHANGE_COL], partition, percentile)
        .with_column(
            ((lit(1.0) + col(CHANGE_COL)).fill_null(lit(1.0)).cum_prod(false)
                * col(value_col).first())
            .over(over)
            .alias(alias),
        )
        .drop([CHANGE_COL])
}

/// Winsorization configuration and transform.
#[derive(Debug, Clone)]
pub struct Winsorizer {
    /// Percentile threshold (e.g., 0.01).
    percentile: f64,
}

impl Winsorizer {
    /// Create a new winsorizer.
    ///
    /// # Arguments
    /// * `percentile` - Must be in (0, 0.5)
    ///
    /// # Errors
    /// Returns `MathError::InvalidPercentile` if percentile is not in valid range.
    pub fn new(percentile: f64) -> Result<Self, MathError> {
        if percentile <= 0.0 || percentile >= 0.5 || percentile.is_nan() {
            return Err(MathError::InvalidPercentile(percentile));
        }
        Ok(Self { percentile })
    }

    /// Get the percentile.
    #[must_use]
    pub const fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Apply the smoothed-path reconstruction to a LazyFrame.
    pub fn smoothed_path(
        &self,
        df: LazyFrame,
        value_col: &str,
        partition: &[&str],
        alias: &str,
    ) -> LazyFrame {
        winsorized_path(df, value_col, partition, self.percentile, alias)
    }
}

impl Default for Winsorizer {
    fn default() -> Self {
        Self { percentile: 0.01 }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    fn values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn winsorize_over_clips_extremes_per_partition() {
        let df = df! {
            "key" => &["a", "a", "a", "a", "a", "b", "b"],
            "value" => &[1.0, 2.0, 3.0, 4.0, 100.0, 1000.0, 1001.0],
        }
        .unwrap()
        .lazy();

        let out = winsorize_over(df, &["value"], &["key"], 0.25).collect().unwrap();
        let v = values(&out, "value");

        // Partition "a" 75th percentile is 4.0, so 100.0 is clipped down.
        assert_relative_eq!(v[4].unwrap(), 4.0, epsilon = 1e-10);
        assert_relative_eq!(v[2].unwrap(), 3.0, epsilon = 1e-10);
        // Partition "b" is bounded by its own values, not by "a".
        assert!(v[5].unwrap() >= 1000.0);
    }

    #[test]
    fn smoothed_path_without_outliers_reproduces_prices() {
        let df = df! {
            "key" => &["a", "a", "a", "a"],
            "price" => &[10.0, 11.0, 12.1, 13.31],
        }
        .unwrap()
        .lazy();

        let out = winsorized_path(df, "price", &["key"], 0.01, "smoothed").collect().unwrap();
        let path = values(&out, "smoothed");

        // Every change is +10%, so clipping to the 1st/99th percentile is a no-op.
        for (got, want) in path.iter().zip([10.0, 11.0, 12.1, 13.31]) {
            assert_relative_eq!(got.unwrap(), want, epsilon = 1e-9);
        }
        assert!(out.column(CHANGE_COL).is_err());
    }

    #[test]
    fn smoothed_path_damps_spike() {
        let df = df! {
            "key" => &["a"; 6],
            "price" => &[10.0, 10.0, 10.0, 50.0, 50.0, 50.0],
        }
        .unwrap()
        .lazy();

        let out = winsorized_path(df, "price", &["key"], 0.25, "smoothed").collect().unwrap();
        let path = values(&out, "smoothed");

        assert_relative_eq!(path[0].unwrap(), 10.0, epsilon = 1e-10);
        assert!(path[3].unwrap() < 50.0);
    }

    #[test]
    fn smoothed_path_starts_each_partition_at_its_first_price() {
        let df = df! {
            "key" => &["a", "a", "b", "b"],
            "price" => &[5.0, 6.0, 50.0, 60.0],
        }
        .unwrap()
        .lazy();

        let out = winsorized_path(df, "price", &["key"], 0.01, "smoothed").collect().unwrap();
        let path = values(&out, "smoothed");
        assert_relative_eq!(path[0].unwrap(), 5.0, epsilon = 1e-10);
        assert_relative_eq!(path[2].unwrap(), 50.0, epsilon = 1e-10);
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.5)]
    #[case(0.6)]
    #[case(-0.1)]
    fn invalid_percentile_errors(#[case] pct: f64) {
        assert!(Winsorizer::new(pct).is_err());
    }

    #[test]
    fn winsorizer_default() {
        assert_relative_eq!(Winsorizer::default().percentile(), 0.01);
    }
}
