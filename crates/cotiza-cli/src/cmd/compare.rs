/// Implementation of `cotiza compare`.
///
/// Ingests one `.xlsx` price list per supplier, merges and ranks them, and
/// reports the winner/tie partition. With `--out`, also writes the
/// five-sheet summary workbook. With `--json`, prints the full quote set as
/// JSON instead of the human-readable report.
///
/// Exit codes:
/// - 0 = success
/// - 1 = a price list failed validation, or no usable records
/// - 2 = file not found, unreadable workbook, or bad precision
use std::path::{Path, PathBuf};

use cotiza_core::{QuoteSet, fmt_money4};

use crate::error::CliError;
use crate::io::{create_output, timestamped_name};

use super::{load_quote_set, parse_precision};

/// Runs the `compare` command.
///
/// # Errors
///
/// Returns [`CliError`] on I/O failures, import errors, or pipeline
/// validation failures.
pub fn run(
    files: &[PathBuf],
    precision: u8,
    json: bool,
    out: Option<&Path>,
) -> Result<(), CliError> {
    let precision = parse_precision(precision)?;
    let quote = load_quote_set(files, precision)?;

    if json {
        let rendered = serde_json::to_string_pretty(&quote).map_err(|e| {
            CliError::RenderFailed {
                detail: e.to_string(),
            }
        })?;
        println!("{rendered}");
    } else {
        print_report(&quote);
    }

    if let Some(dir) = out {
        let (path, file) = create_output(dir, &timestamped_name("resumen_precios"))?;
        cotiza_excel::write_summary_workbook(&quote, file)?;
        eprintln!("resumen escrito en {}", path.display());
    }

    Ok(())
}

fn print_report(quote: &QuoteSet) {
    println!(
        "{} filas combinadas, {} ganadores unicos, {} empates reales (precision {})",
        quote.merged.len(),
        quote.ranking.winners.len(),
        quote.ranking.ties.len(),
        quote.ranking.precision,
    );

    if quote.ranking.ties.is_empty() {
        println!("No hay empates.");
        return;
    }

    for (sku, group) in &quote.ranking.ties {
        let name = group
            .first()
            .map_or("", |r| r.canonical_name.as_str());
        println!("SKU {sku} — {name}");
        for row in group {
            println!("  {}  {}", row.supplier, fmt_money4(row.unit_price));
        }
    }
}
