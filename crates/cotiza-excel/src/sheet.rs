/// Conversion from calamine worksheet ranges to the engine's boundary shape.
use calamine::{Data, Range};

use cotiza_core::RawTable;

/// Converts a worksheet range into a [`RawTable`]: first row becomes the
/// header row, everything below becomes data rows.
///
/// Returns `None` when the range has no rows at all.
pub fn range_to_table(range: &Range<Data>) -> Option<RawTable> {
    let mut rows = range.rows();
    let headers: Vec<String> = rows.next()?.iter().map(cell_to_string).collect();
    let data: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    Some(RawTable::new(headers, data))
}

/// Converts a `calamine::Data` cell to a trimmed `String`.
///
/// Whole-number floats render without a trailing `.0` so numeric SKU cells
/// survive the digits-only identifier validation. Empty, blank, and error
/// cells become empty strings.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_owned(),
        Data::Float(f) => {
            if *f == f.floor() && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
        Data::Empty => String::new(),
    }
}
