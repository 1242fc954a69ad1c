//! Forward-looking training targets.

use polars::prelude::*;
use pricewise_traits::{PartitionContext, PartitionTransform, TransformError};

use crate::columns;

/// Prices `h` calendar months ahead, for each configured horizon.
///
/// Reads strictly later rows of the same partition. A target is missing when
/// the partition has no observation exactly `h` months later.
#[derive(Debug, Clone)]
pub struct ForwardTargets {
    horizons: Vec<usize>,
}

impl ForwardTargets {
    /// Create forward targets.
    ///
    /// # Errors
    /// Returns `TransformError::InvalidParameter` if a horizon is zero.
    pub fn new(horizons: Vec<usize>) -> Result<Self, TransformError> {
        if horizons.contains(&0) {
            return Err(TransformError::InvalidParameter("horizon must be positive".to_string()));
        }
        Ok(Self { horizons })
    }

    /// Configured horizons in months.
    #[must_use]
    pub fn horizons(&self) -> &[usize] {
        &self.horizons
    }
}

impl Default for ForwardTargets {
    fn default() -> Self {
        Self { horizons: vec![1, 3, 6] }
    }
}

impl PartitionTransform for ForwardTargets {
    fn name(&self) -> &str {
        "forward_targets"
    }

    fn output_columns(&self) -> Vec<String> {
        self.horizons.iter().copied().map(columns::target).collect()
    }

    fn exprs(&self, ctx: &PartitionContext<'_>) -> Vec<Expr> {
        self.horizons
            .iter()
            .map(|&h| ctx.at_offset(-(h as i64)).alias(columns::target(h)))
            .collect()
    }
}
