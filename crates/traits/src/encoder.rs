//! Categorical encoding trait definitions.

use polars::prelude::*;

use crate::TransformError;

/// Drop-first one-hot encoding of a categorical column.
///
/// Levels are discovered from the frame being encoded, so the set of dummy
/// columns depends on the data: the first level in sort order becomes the
/// implicit baseline and gets no column.
pub trait CategoryEncoder: Send + Sync {
    /// Returns the name of this encoding.
    fn name(&self) -> &str;

    /// Column holding the categories.
    fn source_column(&self) -> &str;

    /// Distinct levels present in `frame`, in baseline-first sort order.
    ///
    /// # Errors
    /// Returns `TransformError` if the source column is missing or mistyped.
    fn levels(&self, frame: &DataFrame) -> Result<Vec<String>, TransformError>;

    /// Dummy column name for a level.
    fn dummy_name(&self, level: &str) -> String;

    /// Predicate selecting rows of a level.
    fn matches(&self, level: &str) -> Expr;

    /// Dummy expressions for every level except the baseline.
    ///
    /// # Errors
    /// Returns `TransformError` if levels cannot be discovered.
    fn encode(&self, frame: &DataFrame) -> Result<Vec<Expr>, TransformError> {
        let levels = self.levels(frame)?;
        Ok(levels
            .iter()
            .skip(1)
            .map(|level| {
                when(self.matches(level))
                    .then(lit(1i32))
                    .otherwise(lit(0i32))
                    .alias(self.dummy_name(level))
            })
            .collect())
    }
}
