//! Error types for file ingestion.

use std::path::PathBuf;

use pricewise_traits::ReadError;

/// Errors that can occur while loading a raw table.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// No read strategy succeeded; carries the last strategy's failure.
    #[error("could not read file {}: {source}", path.display())]
    Unreadable {
        /// File that was being read.
        path: PathBuf,
        /// Failure of the last strategy attempted.
        #[source]
        source: ReadError,
    },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn error_display_names_path_and_cause() {
        let err = IngestError::Unreadable {
            path: PathBuf::from("data/prices.csv"),
            source: ReadError::Parse("no columns".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/prices.csv"));
        assert!(msg.contains("no columns"));
        assert!(err.source().is_some());
    }
}
