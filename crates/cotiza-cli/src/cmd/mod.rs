/// Subcommand implementations.
use std::path::PathBuf;

use cotiza_core::{Precision, QuoteSet, build_quote_set};
use cotiza_excel::read_price_list;

use crate::error::CliError;
use crate::io::{open_input, supplier_name};

pub mod compare;
pub mod order;

/// Parses the `--precision` argument.
fn parse_precision(digits: u8) -> Result<Precision, CliError> {
    Precision::try_from(digits).map_err(|_| CliError::InvalidPrecision { got: digits })
}

/// Imports every price-list file and runs the reconciliation pipeline.
///
/// Suppliers are named after the file stems and processed in argument
/// order; the first file that cannot be read or fails validation aborts
/// the run.
fn load_quote_set(files: &[PathBuf], precision: Precision) -> Result<QuoteSet, CliError> {
    let mut inputs = Vec::with_capacity(files.len());
    for path in files {
        let reader = open_input(path)?;
        let table = read_price_list(reader).map_err(|source| CliError::ImportFailed {
            path: path.clone(),
            source,
        })?;
        inputs.push((supplier_name(path), table));
    }
    Ok(build_quote_set(&inputs, precision)?)
}
