//! Past-only features: lags and a trailing rolling mean.

use polars::prelude::*;
use pricewise_traits::{PartitionContext, PartitionTransform, TransformError};

use crate::columns;

/// Raw prices `k` calendar months back, for each configured `k`.
///
/// Reads strictly earlier rows of the same partition.
#[derive(Debug, Clone)]
pub struct LagFeatures {
    lags: Vec<usize>,
}

impl LagFeatures {
    /// Create lag features.
    ///
    /// # Errors
    /// Returns `TransformError::InvalidParameter` if a lag is zero.
    pub fn new(lags: Vec<usize>) -> Result<Self, TransformError> {
        if lags.contains(&0) {
            return Err(TransformError::InvalidParameter("lag must be positive".to_string()));
        }
        Ok(Self { lags })
    }

    /// Configured lags.
    #[must_use]
    pub fn lags(&self) -> &[usize] {
        &self.lags
    }
}

impl Default for LagFeatures {
    fn default() -> Self {
        Self { lags: vec![1, 3] }
    }
}

impl PartitionTransform for LagFeatures {
    fn name(&self) -> &str {
        "lags"
    }

    fn output_columns(&self) -> Vec<String> {
        self.lags.iter().copied().map(columns::lag).collect()
    }

    fn exprs(&self, ctx: &PartitionContext<'_>) -> Vec<Expr> {
        self.lags.iter().map(|&k| ctx.at_offset(k as i64).alias(columns::lag(k))).collect()
    }
}

/// Mean of the previous `window` months, excluding the current one.
///
/// Missing unless all `window` preceding calendar months are present.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
}

impl RollingMean {
    /// Create a trailing mean.
    ///
    /// # Errors
    /// Returns `TransformError::InvalidParameter` if the window is zero.
    pub fn new(window: usize) -> Result<Self, TransformError> {
        if window == 0 {
            return Err(TransformError::InvalidParameter("window must be positive".to_string()));
        }
        Ok(Self { window })
    }

    /// Window length in months.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }
}

impl Default for RollingMean {
    fn default() -> Self {
        Self { window: 3 }
    }
}

impl PartitionTransform for RollingMean {
    fn name(&self) -> &str {
        "rolling_mean"
    }

    fn output_columns(&self) -> Vec<String> {
        vec![columns::rolling_mean(self.window)]
    }

    fn exprs(&self, ctx: &PartitionContext<'_>) -> Vec<Expr> {
        let w = self.window as i64;
        // Periods strictly increase within a partition, so a span of exactly
        // `w` over `w` rows means the months t-w..t-1 are all present.
        let span = (col(ctx.period_col) - col(ctx.period_col).shift(lit(w))).cast(DataType::Int64);
        let trailing = col(ctx.value_col).shift(lit(1)).rolling_mean(RollingOptionsFixedWindow {
            window_size: self.window,
            min_periods: self.window,
            ..Default::default()
        });

        vec![
            when(span.eq(lit(w)))
                .then(trailing)
                .otherwise(lit(NULL).cast(DataType::Float64))
                .over(ctx.partition_exprs())
                .alias(columns::rolling_mean(self.window)),
        ]
    }
}
