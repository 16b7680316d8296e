/// Price-list workbook import.
use std::io::{Read, Seek};

use calamine::{Reader, Xlsx, open_workbook_from_rs};

use cotiza_core::RawTable;

use crate::error::ImportError;
use crate::sheet::range_to_table;

/// Reads one supplier's price list from an `.xlsx` workbook.
///
/// The first worksheet is the price list: row 1 carries the column headers
/// (`SKU`, `Precio Unitario`, optional `Nombre`), rows 2+ carry the data.
/// No content validation happens here; the returned [`RawTable`] goes to
/// `cotiza_core::normalize` which owns the column contract.
///
/// # Errors
///
/// Returns [`ImportError`] when the workbook cannot be parsed, has no
/// worksheets, or the first worksheet is completely empty.
pub fn read_price_list<R: Read + Seek>(reader: R) -> Result<RawTable, ImportError> {
    let mut workbook: Xlsx<R> =
        open_workbook_from_rs(reader).map_err(|e: calamine::XlsxError| ImportError::ExcelRead {
            detail: e.to_string(),
        })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::NoSheets)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::ExcelRead {
            detail: format!("failed to read sheet {sheet_name:?}: {e}"),
        })?;

    range_to_table(&range).ok_or(ImportError::EmptySheet { sheet: sheet_name })
}
