//! Multi-strategy raw table loader.

use std::path::Path;

use pricewise_primitives::RawTable;
use pricewise_traits::{ReadError, TableReader};
use tracing::{debug, info};

use crate::{DelimitedReader, IngestError, SpreadsheetReader, TextEncoding};

/// Configuration for [`SmartLoader`].
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter used instead of sniffing, if set.
    pub delimiter: Option<u8>,
    /// Delimiters retried when the sniffed UTF-8 parse yields one column.
    pub fallback_delimiters: Vec<u8>,
    /// Non-blank lines inspected when sniffing the delimiter.
    pub sniff_lines: usize,
    /// Whether to attempt a spreadsheet parse after UTF-8 text fails.
    pub spreadsheets: bool,
    /// Single-byte encodings tried last, in order.
    ///
    /// Latin-1 decodes any byte, so encodings after it never run.
    pub legacy_encodings: Vec<TextEncoding>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            fallback_delimiters: b",;\t|".to_vec(),
            sniff_lines: 20,
            spreadsheets: true,
            legacy_encodings: vec![TextEncoding::Windows1252, TextEncoding::Latin1],
        }
    }
}

/// Loads a file of unknown format by trying read strategies in order.
///
/// The default order is UTF-8 delimited text (with delimiter fallback), then
/// spreadsheet, then delimited text in each legacy encoding. The first
/// strategy that succeeds wins.
pub struct SmartLoader {
    strategies: Vec<Box<dyn TableReader>>,
}

impl std::fmt::Debug for SmartLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("SmartLoader").field("strategies", &names).finish()
    }
}

impl SmartLoader {
    /// Create a loader with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a loader from a configuration.
    #[must_use]
    pub fn with_config(config: LoaderConfig) -> Self {
        let mut strategies: Vec<Box<dyn TableReader>> = vec![Box::new(
            DelimitedReader::new(TextEncoding::Utf8, config.sniff_lines)
                .with_delimiter(config.delimiter)
                .with_fallbacks(&config.fallback_delimiters),
        )];
        if config.spreadsheets {
            strategies.push(Box::new(SpreadsheetReader));
        }
        for encoding in config.legacy_encodings {
            strategies.push(Box::new(
                DelimitedReader::new(encoding, config.sniff_lines).with_delimiter(config.delimiter),
            ));
        }
        Self { strategies }
    }

    /// Create a loader from explicit strategies.
    #[must_use]
    pub fn from_strategies(strategies: Vec<Box<dyn TableReader>>) -> Self {
        Self { strategies }
    }

    /// Load the file at `path`.
    ///
    /// # Errors
    /// Returns `IngestError::Unreadable` carrying the last strategy's failure
    /// when every strategy fails.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<RawTable, IngestError> {
        let path = path.as_ref();
        let mut last_error = ReadError::Parse("no read strategy configured".to_string());

        for strategy in &self.strategies {
            match strategy.read(path) {
                Ok(table) => {
                    info!(
                        path = %path.display(),
                        strategy = strategy.name(),
                        rows = table.height(),
                        columns = table.width(),
                        "loaded raw table"
                    );
                    return Ok(table);
                }
                Err(e) => {
                    debug!(strategy = strategy.name(), error = %e, "read strategy failed");
                    last_error = e;
                }
            }
        }

        Err(IngestError::Unreadable { path: path.to_path_buf(), source: last_error })
    }
}

impl Default for SmartLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn loads_utf8_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, "date,market,price\n2020-01-01,Bo,10\n").unwrap();

        let table = SmartLoader::new().load(&path).unwrap();
        assert_eq!(table.width(), 3);
        assert_eq!(table.column("market").unwrap().get(0), Some("Bo"));
    }

    #[test]
    fn falls_back_to_legacy_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, b"date;market;price\n2020-01;Kambia Caf\xe9;10\n").unwrap();

        let table = SmartLoader::new().load(&path).unwrap();
        assert_eq!(table.column("market").unwrap().get(0), Some("Kambia Café"));
    }

    #[test]
    fn windows1252_runs_before_latin1() {
        let dir = tempfile::tempdir().unwrap();
        let euro = dir.path().join("euro.csv");
        fs::write(&euro, b"market,price\nBo,\x80 10\n").unwrap();
        let table = SmartLoader::new().load(&euro).unwrap();
        assert_eq!(table.column("price").unwrap().get(0), Some("\u{20AC} 10"));

        // 0x81 is undefined in windows-1252, so Latin-1 takes over.
        let undefined = dir.path().join("undefined.csv");
        fs::write(&undefined, b"market,price\nB\x81o,10\n").unwrap();
        let table = SmartLoader::new().load(&undefined).unwrap();
        assert_eq!(table.column("market").unwrap().get(0), Some("B\u{81}o"));
    }

    #[test]
    fn loads_first_worksheet() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/prices.xlsx");
        let table = SmartLoader::new().load(path).unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["date", "market", "price"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.column("market").unwrap().get(1), Some("Kenema"));
        assert_eq!(table.column("price").unwrap().get(0), Some("10"));
        assert_eq!(table.column("price").unwrap().get(1), Some("12.5"));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = SmartLoader::new().load(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Unreadable { source: ReadError::Io(_), .. }));
    }

    #[test]
    fn empty_strategy_list_is_unreadable() {
        let err = SmartLoader::from_strategies(Vec::new()).load("anything.csv").unwrap_err();
        assert!(err.to_string().contains("no read strategy"));
    }
}
