/// The tabular boundary shape consumed by the engine.
///
/// File parsing lives outside this crate; adapters (Excel, CSV, test
/// fixtures) hand the engine a [`RawTable`] of trimmed strings and nothing
/// else. Column names are the boundary contract and are matched exactly
/// after whitespace trimming.
use serde::{Deserialize, Serialize};

/// An untyped table: one header row plus zero or more data rows.
///
/// Headers are trimmed at construction. Data cells are stored as-is; the
/// normalizer trims them per-column because trimming rules differ by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Builds a table from a header row and data rows, trimming each header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_owned()).collect();
        Self { headers, rows }
    }

    /// Returns the column index of an exact (post-trim) header match.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Returns the trimmed headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the cell at (`row_idx`, `col_idx`), or `""` when the row is
    /// ragged and the cell is absent.
    pub fn cell(&self, row_idx: usize, col_idx: usize) -> &str {
        self.rows
            .get(row_idx)
            .and_then(|row| row.get(col_idx))
            .map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn headers_are_trimmed() {
        let table = RawTable::new(strings(&[" SKU ", "Precio Unitario  "]), Vec::new());
        assert_eq!(table.column("SKU"), Some(0));
        assert_eq!(table.column("Precio Unitario"), Some(1));
        assert_eq!(table.column("Nombre"), None);
    }

    #[test]
    fn ragged_rows_read_as_empty_cells() {
        let table = RawTable::new(strings(&["SKU", "Nombre"]), vec![strings(&["123"])]);
        assert_eq!(table.cell(0, 0), "123");
        assert_eq!(table.cell(0, 1), "");
        assert_eq!(table.cell(5, 0), "");
    }
}
