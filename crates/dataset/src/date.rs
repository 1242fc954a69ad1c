//! Date parsing and date-column bindings.

use chrono::{NaiveDate, NaiveDateTime};
use pricewise_primitives::{Month, RawTable};

/// Smallest `YYYYMM` value accepted from a compact numeric column.
pub(crate) const COMPACT_MIN: f64 = 190_001.0;
/// Largest `YYYYMM` value accepted from a compact numeric column.
pub(crate) const COMPACT_MAX: f64 = 210_012.0;

const DATE_FORMATS: &[&str] =
    &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y%m%d"];

const DATETIME_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a cell text into the month containing it.
///
/// Accepts ISO and slash dates, datetimes, `YYYY-M`, `YYYY/M`, `YYYYMM`,
/// `YYYYMMDD` and month names such as `Jan 2020` or `March-2021`.
#[must_use]
pub fn parse_month(text: &str) -> Option<Month> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(text, f).ok()) {
        return Some(Month::from_date(date));
    }
    if let Some(dt) =
        DATETIME_FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
    {
        return Some(Month::from_date(dt.date()));
    }
    if let Some(month) = year_month(text) {
        return Some(month);
    }
    if text.len() == 6 && text.bytes().all(|b| b.is_ascii_digit()) {
        return compact_month(text.parse::<f64>().ok()?);
    }

    let spaced = text.replace(['-', '/'], " ");
    NaiveDate::parse_from_str(&format!("1 {spaced}"), "%d %B %Y").ok().map(Month::from_date)
}

/// `YYYY-M` or `YYYY/M`.
fn year_month(text: &str) -> Option<Month> {
    let (year, month) = text.split_once(['-', '/'])?;
    if year.len() != 4 || month.is_empty() || month.len() > 2 {
        return None;
    }
    if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    Month::new(year.parse().ok()?, month.parse().ok()?)
}

/// Month for a numeric `YYYYMM` value in the accepted range.
pub(crate) fn compact_month(value: f64) -> Option<Month> {
    if value.fract() != 0.0 || !(COMPACT_MIN..=COMPACT_MAX).contains(&value) {
        return None;
    }
    let value = value as i32;
    Month::new(value / 100, u32::try_from(value % 100).ok()?)
}

/// How the observation month is read from a raw row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateBinding {
    /// A column found by name, holding dates or months.
    Named(String),
    /// A textual column whose values look like `YYYY-M` or `YYYY/M`.
    YearMonthText(String),
    /// Separate numeric year and month columns.
    YearAndMonth {
        /// Year column.
        year: String,
        /// Month column.
        month: String,
    },
    /// A numeric column holding `YYYYMM` values.
    Compact(String),
}

impl DateBinding {
    /// Month of `row`, `None` when the cell(s) do not parse.
    #[must_use]
    pub fn month_at(&self, table: &RawTable, row: usize) -> Option<Month> {
        match self {
            Self::Named(name) | Self::YearMonthText(name) => {
                table.column(name)?.get(row).and_then(parse_month)
            }
            Self::YearAndMonth { year, month } => {
                let y = table.column(year)?.number(row)?;
                let m = table.column(month)?.number(row)?;
                if y.fract() != 0.0 || m.fract() != 0.0 || m < 1.0 {
                    return None;
                }
                Month::new(y as i32, m as u32)
            }
            Self::Compact(name) => table.column(name)?.number(row).and_then(compact_month),
        }
    }

    /// Columns the binding reads.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::Named(name) | Self::YearMonthText(name) | Self::Compact(name) => vec![name],
            Self::YearAndMonth { year, month } => vec![year, month],
        }
    }

    /// Human-readable description for reports.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Named(name) | Self::YearMonthText(name) | Self::Compact(name) => name.clone(),
            Self::YearAndMonth { year, month } => format!("{year}+{month}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2020-03-15", 2020, 3)]
    #[case("2020/03/01", 2020, 3)]
    #[case("2020-03-15 10:30:00", 2020, 3)]
    #[case("2020-3", 2020, 3)]
    #[case("2021/11", 2021, 11)]
    #[case("202004", 2020, 4)]
    #[case("20200415", 2020, 4)]
    #[case("Jan 2020", 2020, 1)]
    #[case("March-2021", 2021, 3)]
    #[case("Mar-2021", 2021, 3)]
    #[case("september 2020", 2020, 9)]
    #[case("12/25/2019", 2019, 12)]
    #[case("25/12/2019", 2019, 12)]
    fn parses_month_formats(#[case] text: &str, #[case] year: i32, #[case] month: u32) {
        assert_eq!(parse_month(text), Month::new(year, month));
    }

    #[rstest]
    #[case("")]
    #[case("Northern")]
    #[case("2020-13")]
    #[case("12")]
    #[case("123456789")]
    fn rejects_non_dates(#[case] text: &str) {
        assert_eq!(parse_month(text), None);
    }

    #[rstest]
    #[case(202_001.0, Some((2020, 1)))]
    #[case(190_001.0, Some((1900, 1)))]
    #[case(210_012.0, Some((2100, 12)))]
    #[case(189_912.0, None)]
    #[case(202_013.0, None)]
    #[case(202_001.5, None)]
    fn compact_bounds(#[case] value: f64, #[case] expected: Option<(i32, u32)>) {
        assert_eq!(compact_month(value), expected.and_then(|(y, m)| Month::new(y, m)));
    }

    #[test]
    fn year_and_month_columns_combine() {
        let table = RawTable::from_rows(
            vec!["year".into(), "month".into()],
            vec![vec![Some("2020".into()), Some("7".into())], vec![Some("2020".into()), Some("x".into())]],
        );
        let binding = DateBinding::YearAndMonth { year: "year".into(), month: "month".into() };
        assert_eq!(binding.month_at(&table, 0), Month::new(2020, 7));
        assert_eq!(binding.month_at(&table, 1), None);
        assert_eq!(binding.describe(), "year+month");
    }
}
