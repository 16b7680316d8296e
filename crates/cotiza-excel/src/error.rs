/// Errors produced while reading or writing `.xlsx` workbooks.
use thiserror::Error;

/// All error conditions that can occur while importing a price-list workbook.
///
/// Column-contract and row-content validation do not happen here; the core
/// normalizer owns those. Import errors are strictly about getting tabular
/// data out of the file.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The workbook contains no worksheets at all.
    #[error("workbook has no worksheets")]
    NoSheets,

    /// The first worksheet has no rows, not even a header row.
    #[error("worksheet {sheet:?} is empty")]
    EmptySheet {
        /// Name of the empty worksheet.
        sheet: String,
    },

    /// An I/O or parsing error from the calamine library.
    #[error("Excel read error: {detail}")]
    ExcelRead {
        /// Human-readable description of the error.
        detail: String,
    },
}

/// All error conditions that can occur while writing an export workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The workbook could not be built or serialized.
    #[error("Excel write error: {detail}")]
    ExcelWrite {
        /// Human-readable description of the error.
        detail: String,
    },

    /// The serialized workbook bytes could not be written to the sink.
    #[error("I/O error: {detail}")]
    Io {
        /// The underlying I/O error message.
        detail: String,
    },
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::ExcelWrite {
            detail: e.to_string(),
        }
    }
}
