//! Raw table source trait definitions.

use std::path::Path;

use polars::prelude::PolarsError;
use pricewise_primitives::RawTable;

/// Errors a single read strategy can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// File could not be opened or read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes are not valid in the strategy's encoding.
    #[error("invalid {encoding} text")]
    Encoding {
        /// Encoding that was attempted.
        encoding: &'static str,
    },

    /// Content could not be parsed into a table.
    #[error("parse error: {0}")]
    Parse(String),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// One strategy for turning a file into a [`RawTable`].
pub trait TableReader: Send + Sync {
    /// Returns the name of this strategy, for logging.
    fn name(&self) -> &str;

    /// Read the file at `path`.
    ///
    /// # Errors
    /// Returns `ReadError` if this strategy cannot produce a table.
    fn read(&self, path: &Path) -> Result<RawTable, ReadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_display() {
        let err = ReadError::Encoding { encoding: "utf-8" };
        assert_eq!(err.to_string(), "invalid utf-8 text");

        let err = ReadError::Parse("no header".to_string());
        assert_eq!(err.to_string(), "parse error: no header");
    }
}
