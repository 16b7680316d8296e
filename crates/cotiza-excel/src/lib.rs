/// Excel adapter for the cotiza price-reconciliation engine.
///
/// This crate reads one-supplier `.xlsx` price lists into the engine's
/// [`cotiza_core::RawTable`] boundary shape and writes the two export
/// workbooks (tie-resolution summary and per-supplier order). The
/// `calamine` and `rust_xlsxwriter` dependencies are confined to this crate
/// and do not bleed into `cotiza-core` or `cotiza-cli`.
pub mod error;
mod export;
mod import;
mod sheet;

pub use error::{ExportError, ImportError};
pub use export::{write_order_workbook, write_summary_workbook};
pub use import::read_price_list;
