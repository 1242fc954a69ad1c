//! Spreadsheet read strategy.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDateTime, NaiveTime};
use pricewise_primitives::RawTable;
use pricewise_traits::{ReadError, TableReader};

/// Largest magnitude printed as an integer when a float has no fraction.
const INTEGRAL_FLOAT_LIMIT: f64 = 1e15;

/// Reads the first worksheet of an xlsx/xls/ods workbook.
///
/// The first row is the header; cells are rendered to text so the result is
/// indistinguishable from a delimited-text parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetReader;

impl TableReader for SpreadsheetReader {
    fn name(&self) -> &str {
        "spreadsheet"
    }

    fn read(&self, path: &Path) -> Result<RawTable, ReadError> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| ReadError::Parse(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ReadError::Parse("workbook has no worksheets".to_string()))?
            .map_err(|e| ReadError::Parse(e.to_string()))?;

        let mut rows = range.rows();
        let header = rows.next().ok_or_else(|| ReadError::Parse("worksheet is empty".to_string()))?;
        let headers = header
            .iter()
            .enumerate()
            .map(|(i, cell)| cell_text(cell).unwrap_or_else(|| format!("column_{i}")))
            .collect();
        let records = rows.map(|row| row.iter().map(cell_text).collect()).collect();

        Ok(RawTable::from_rows(headers, records))
    }
}

/// Render a worksheet cell as text, `None` for empty and error cells.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(float_text(*f)),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => dt.as_datetime().map(datetime_text),
    }
}

fn float_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < INTEGRAL_FLOAT_LIMIT {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn datetime_text(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
