//! Group-wise transformation trait definitions.

use polars::prelude::*;

/// Errors that can occur during transformation.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Required input column is absent.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Column names a partition transform evaluates against.
///
/// The frame is sorted by the partition columns, then by `period_col`
/// ascending, with one row per partition and period.
#[derive(Debug, Clone, Copy)]
pub struct PartitionContext<'a> {
    /// Numeric column being transformed (typically "price").
    pub value_col: &'a str,
    /// Continuous month index used for calendar spacing checks.
    pub period_col: &'a str,
    /// Columns identifying a partition (typically commodity and market).
    pub partition: &'a [&'a str],
}

impl PartitionContext<'_> {
    /// Partition columns as expressions, for use with `over`.
    #[must_use]
    pub fn partition_exprs(&self) -> Vec<Expr> {
        self.partition.iter().map(|&c| col(c)).collect()
    }

    /// Value of `value_col` exactly `months` calendar months away from each row.
    ///
    /// Positive `months` look back, negative `months` look forward. Within a
    /// partition periods strictly increase, so the matching row is at most
    /// `|months|` rows away; the value is null when no row of the partition
    /// lies exactly that many calendar months away.
    #[must_use]
    pub fn at_offset(&self, months: i64) -> Expr {
        if months == 0 {
            return col(self.value_col);
        }
        let mut lookup = lit(NULL).cast(DataType::Float64);
        for rows in (1..=months.abs()).rev() {
            let shift = rows * months.signum();
            let gap = (col(self.period_col) - col(self.period_col).shift(lit(shift)))
                .cast(DataType::Int64);
            lookup = when(gap.eq(lit(months)))
                .then(col(self.value_col).shift(lit(shift)))
                .otherwise(lookup);
        }
        lookup.over(self.partition_exprs())
    }
}

/// Time-series transformation evaluated within each partition.
///
/// Implementations must only read rows of the same partition, and document
/// whether they read the past (lags) or the future (targets).
pub trait PartitionTransform: Send + Sync {
    /// Returns the name of this transformation.
    fn name(&self) -> &str;

    /// Names of the columns this transform adds, in order.
    fn output_columns(&self) -> Vec<String>;

    /// Expressions adding the output columns.
    ///
    /// Expressions in the returned list must not depend on each other; they
    /// are evaluated in a single `with_columns` step.
    fn exprs(&self, ctx: &PartitionContext<'_>) -> Vec<Expr>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_error_display() {
        let err = TransformError::MissingColumn("price".to_string());
        assert_eq!(err.to_string(), "missing column: price");

        let err = TransformError::InvalidParameter("window must be positive".to_string());
        assert_eq!(err.to_string(), "invalid parameter: window must be positive");
    }

    #[test]
    fn at_offset_respects_calendar_gaps() {
        let df = df! {
            "key" => &["a", "a", "a", "b", "b"],
            "period" => &[10, 11, 13, 10, 11],
            "price" => &[1.0, 2.0, 4.0, 100.0, 200.0],
        }
        .unwrap();

        let ctx = PartitionContext { value_col: "price", period_col: "period", partition: &["key"] };
        let out = df
            .lazy()
            .with_columns([
                ctx.at_offset(1).alias("back1"),
                ctx.at_offset(-1).alias("ahead1"),
                ctx.at_offset(2).alias("back2"),
            ])
            .collect()
            .unwrap();

        let back: Vec<Option<f64>> = out.column("back1").unwrap().f64().unwrap().into_iter().collect();
        let ahead: Vec<Option<f64>> =
            out.column("ahead1").unwrap().f64().unwrap().into_iter().collect();

        // Period 13 follows 11, so it has no price one month back.
        assert_eq!(back, vec![None, Some(1.0), None, None, Some(100.0)]);
        assert_eq!(ahead, vec![Some(2.0), None, None, Some(200.0), None]);

        // Period 11 is two months before 13 even though it is the adjacent row.
        let back2: Vec<Option<f64>> =
            out.column("back2").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(back2, vec![None, None, Some(2.0), None, None]);
    }
}
