//! Flat, all-text tables produced by the row mappers.

/// Sentinel stored for every value missing from the source resource.
pub const UNKNOWN: &str = "Unknown";

/// A row shape with a fixed, ordered set of named columns.
pub trait FlatRow {
    /// Destination table name.
    const TABLE: &'static str;

    /// Column names, in storage order.
    const COLUMNS: &'static [&'static str];

    /// Cells in the same order as [`FlatRow::COLUMNS`]. `None` marks a missing value.
    fn into_cells(self) -> Vec<Option<String>>;
}

/// Cleans a single cell for storage.
///
/// Missing values become [`UNKNOWN`], commas are replaced with a space so the
/// value is safe inside a comma-delimited load, and surrounding whitespace is
/// trimmed. Applying it to an already clean value returns the same value.
pub fn clean_cell(value: Option<&str>) -> String {
    match value {
        None => UNKNOWN.to_string(),
        Some(v) => v.replace(',', " ").trim().to_string(),
    }
}

/// A named table whose cells are all cleaned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FlatTable {
    /// Creates an empty table with the given columns.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a cleaned table from mapped rows.
    pub fn from_rows<R, I>(rows: I) -> Self
    where
        R: FlatRow,
        I: IntoIterator<Item = R>,
    {
        let columns = R::COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut table = Self::new(R::TABLE, columns);
        for row in rows {
            table.push_cells(row.into_cells());
        }
        table
    }

    /// Appends one row, cleaning every cell.
    ///
    /// Short rows are padded with the sentinel and extra cells are dropped, so
    /// every row always has exactly one cell per column.
    pub fn push_cells(&mut self, cells: Vec<Option<String>>) {
        let mut cells = cells.into_iter();
        let row = (0..self.columns.len())
            .map(|_| clean_cell(cells.next().flatten().as_deref()))
            .collect();
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `column`, if the table has it.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Cell at `row` under `column`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }
}
