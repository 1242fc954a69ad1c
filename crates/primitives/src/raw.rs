//! Untyped tabular data as produced by the loader.

/// Cell texts that count as missing, on top of blank cells.
const MISSING_MARKERS: &[&str] = &[
    "nan", "NaN", "NAN", "-nan", "-NaN", "None", "none", "null", "NULL", "NA", "N/A", "n/a",
    "#N/A", "#NA", "<NA>",
];

/// Error raised when columns handed to [`RawTable::from_columns`] disagree on length.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("column {column} has {actual} cells, expected {expected}")]
pub struct RaggedColumns {
    /// Offending column.
    pub column: String,
    /// Height of the first column.
    pub expected: usize,
    /// Height of the offending column.
    pub actual: usize,
}

/// Returns true when a cell text denotes a missing value.
#[must_use]
pub fn is_missing(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed)
}

/// Coerce a cell text to a finite number.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if is_missing(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns true when a one-hot flag cell is active.
///
/// A flag is active when it is numerically positive or one of the
/// truthy texts `1`, `true`, `yes` (case-insensitive).
#[must_use]
pub fn is_truthy(text: &str) -> bool {
    parse_number(text).map_or_else(
        || matches!(text.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        |v| v > 0.0,
    )
}

/// A named column of untyped cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    name: String,
    cells: Vec<Option<String>>,
}

impl RawColumn {
    /// Create a column. The name is trimmed and missing markers become `None`.
    #[must_use]
    pub fn new(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        let name = name.into().trim().to_string();
        let cells = cells.into_iter().map(|c| c.filter(|text| !is_missing(text))).collect();
        Self { name, cells }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the column has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell text at `row`, `None` when missing or out of range.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(|c| c.as_deref())
    }

    /// Cell at `row` coerced to a number.
    #[must_use]
    pub fn number(&self, row: usize) -> Option<f64> {
        self.get(row).and_then(parse_number)
    }

    /// Whether the flag cell at `row` is active.
    #[must_use]
    pub fn is_active(&self, row: usize) -> bool {
        self.get(row).is_some_and(is_truthy)
    }

    /// Iterate over cell texts.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.cells.iter().map(|c| c.as_deref())
    }

    /// True when the column holds at least one non-numeric text cell.
    ///
    /// This is the textual ("object") column notion used by schema probing.
    #[must_use]
    pub fn is_textual(&self) -> bool {
        self.iter().flatten().any(|text| parse_number(text).is_none())
    }
}

/// An ordered set of equal-length named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<RawColumn>,
    height: usize,
}

impl RawTable {
    /// Build from columns that must all have the same length.
    ///
    /// # Errors
    /// Returns [`RaggedColumns`] naming the first column whose length differs.
    pub fn from_columns(columns: Vec<RawColumn>) -> Result<Self, RaggedColumns> {
        let height = columns.first().map_or(0, RawColumn::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != height) {
            return Err(RaggedColumns {
                column: bad.name().to_string(),
                expected: height,
                actual: bad.len(),
            });
        }
        Ok(Self { columns, height })
    }

    /// Build from a header row and record rows.
    ///
    /// Short rows are padded with missing cells, long rows are truncated, and
    /// rows where every cell is missing are skipped.
    #[must_use]
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = headers.len();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(rows.len()); width];

        for mut row in rows {
            if row.iter().all(|c| c.as_deref().is_none_or(is_missing)) {
                continue;
            }
            row.resize(width, None);
            for (slot, cell) in cells.iter_mut().zip(row) {
                slot.push(cell);
            }
        }

        let columns: Vec<RawColumn> =
            headers.into_iter().zip(cells).map(|(name, c)| RawColumn::new(name, c)).collect();
        let height = columns.first().map_or(0, RawColumn::len);
        Self { columns, height }
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Columns in their original order.
    #[must_use]
    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    /// Column names in their original order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(RawColumn::name)
    }

    /// Look up a column by exact name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Look up the first column whose name matches case-insensitively.
    #[must_use]
    pub fn column_ignore_case(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1", true)]
    #[case("1.0", true)]
    #[case("0.5", true)]
    #[case("TRUE", true)]
    #[case(" yes ", true)]
    #[case("0", false)]
    #[case("false", false)]
    #[case("", false)]
    #[case("-1", false)]
    fn truthy_flags(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_truthy(text), expected);
    }

    #[test]
    fn missing_markers_become_none() {
        let col = RawColumn::new(" price ", vec![Some("nan".into()), Some(" ".into()), Some("3".into())]);
        assert_eq!(col.name(), "price");
        assert_eq!(col.get(0), None);
        assert_eq!(col.get(1), None);
        assert_eq!(col.number(2), Some(3.0));
    }

    #[test]
    fn from_rows_pads_and_skips_empty() {
        let table = RawTable::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                vec![Some("1".into())],
                vec![None, Some("".into())],
                vec![Some("2".into()), Some("x".into()), Some("extra".into())],
            ],
        );
        assert_eq!(table.height(), 2);
        assert_eq!(table.column("b").unwrap().get(0), None);
        assert_eq!(table.column("b").unwrap().get(1), Some("x"));
    }

    #[test]
    fn ragged_columns_rejected() {
        let err = RawTable::from_columns(vec![
            RawColumn::new("a", vec![None, None]),
            RawColumn::new("b", vec![None]),
        ])
        .unwrap_err();
        assert_eq!(err.column, "b");
    }

    #[test]
    fn textual_detection() {
        let numeric = RawColumn::new("n", vec![Some("1".into()), None, Some("2.5".into())]);
        let text = RawColumn::new("t", vec![Some("1".into()), Some("2020-01".into())]);
        assert!(!numeric.is_textual());
        assert!(text.is_textual());
    }

    #[test]
    fn lookup_ignores_case() {
        let table = RawTable::from_rows(vec!["Date".into()], vec![vec![Some("2020-01".into())]]);
        assert!(table.column("date").is_none());
        assert_eq!(table.column_ignore_case("date").unwrap().name(), "Date");
    }
}
