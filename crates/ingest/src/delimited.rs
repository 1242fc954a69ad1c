//! Delimited-text read strategy.

use std::{fs, io::Cursor, path::Path};

use polars::prelude::*;
use pricewise_primitives::RawTable;
use pricewise_traits::{ReadError, TableReader};
use tracing::{debug, warn};

use crate::{TextEncoding, sniff_delimiter};

/// Delimiter used when sniffing finds no candidate.
const DEFAULT_DELIMITER: u8 = b',';

/// Reads delimited text in one encoding.
///
/// The delimiter is sniffed from the first lines unless one is preset. If
/// that parse yields
/// a single column, each fallback delimiter is tried and the first producing
/// more than one column wins; otherwise the single-column parse is kept.
/// Ragged and malformed rows are tolerated rather than fatal.
#[derive(Debug, Clone)]
pub struct DelimitedReader {
    encoding: TextEncoding,
    delimiter: Option<u8>,
    fallback_delimiters: Vec<u8>,
    sample_lines: usize,
}

impl DelimitedReader {
    /// Create a reader for `encoding` with no fallback delimiters.
    #[must_use]
    pub const fn new(encoding: TextEncoding, sample_lines: usize) -> Self {
        Self { encoding, delimiter: None, fallback_delimiters: Vec::new(), sample_lines }
    }

    /// Use `delimiter` instead of sniffing; `None` restores sniffing.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Delimiters retried when the sniffed parse yields a single column.
    #[must_use]
    pub fn with_fallbacks(mut self, delimiters: &[u8]) -> Self {
        self.fallback_delimiters = delimiters.to_vec();
        self
    }

    /// Encoding this reader decodes with.
    #[must_use]
    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Parse already-decoded text.
    ///
    /// # Errors
    /// Returns `ReadError` if no delimiter produces a table.
    pub fn parse_text(&self, text: &str) -> Result<RawTable, ReadError> {
        let first = self
            .delimiter
            .or_else(|| sniff_delimiter(text, self.sample_lines))
            .unwrap_or(DEFAULT_DELIMITER);
        let table = parse_delimited(text, first)?;
        if table.width() > 1 || self.fallback_delimiters.is_empty() {
            return Ok(table);
        }

        warn!(delimiter = %char::from(first), "parse produced a single column");
        for &delimiter in self.fallback_delimiters.iter().filter(|&&d| d != first) {
            match parse_delimited(text, delimiter) {
                Ok(candidate) if candidate.width() > 1 => return Ok(candidate),
                Ok(_) => {}
                Err(e) => debug!(delimiter = %char::from(delimiter), error = %e, "fallback parse failed"),
            }
        }
        Ok(table)
    }
}

impl TableReader for DelimitedReader {
    fn name(&self) -> &str {
        match self.encoding {
            TextEncoding::Utf8 => "delimited text (utf-8)",
            TextEncoding::Latin1 => "delimited text (latin-1)",
            TextEncoding::Windows1252 => "delimited text (windows-1252)",
        }
    }

    fn read(&self, path: &Path) -> Result<RawTable, ReadError> {
        let bytes = fs::read(path)?;
        let text = self.encoding.decode(&bytes)?;
        self.parse_text(&text)
    }
}

/// Parse text with an explicit delimiter, keeping every cell as text.
fn parse_delimited(text: &str, separator: u8) -> Result<RawTable, ReadError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_ignore_errors(true)
        .map_parse_options(|opts| opts.with_separator(separator).with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
        .finish()?;
    frame_to_table(&df)
}

/// Convert an all-string frame into a raw table.
fn frame_to_table(df: &DataFrame) -> Result<RawTable, ReadError> {
    let mut headers = Vec::with_capacity(df.width());
    let mut columns: Vec<Vec<Option<String>>> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        headers.push(column.name().to_string());
        columns.push(column.str()?.into_iter().map(|v| v.map(str::to_string)).collect());
    }

    let rows = (0..df.height())
        .map(|i| columns.iter().map(|c| c[i].clone()).collect())
        .collect();
    Ok(RawTable::from_rows(headers, rows))
}
