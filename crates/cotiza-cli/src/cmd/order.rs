/// Implementation of `cotiza order`.
///
/// Headless replay of an operator session: tie resolutions and quantities
/// come from JSON files instead of interactive edits, and the result is the
/// per-supplier order workbook.
///
/// Resolutions file: `{ "<sku>": "<supplier>", ... }`. Quantities file:
/// `[ { "supplier": "...", "sku": "...", "quantity": N }, ... ]`. Entries
/// that no longer apply to the current ranking (unknown SKU, supplier not
/// in the tie group) are warned about on stderr and skipped, mirroring how
/// stale session state is silently ignored rather than fatal.
///
/// Exit codes:
/// - 0 = success
/// - 1 = a price list failed validation, or no usable records
/// - 2 = file not found, unreadable workbook, malformed JSON, bad precision
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use cotiza_core::{
    OrderState, Ranking, Sku, TieResolution, build_order_set, fmt_money2,
};

use crate::error::CliError;
use crate::io::{create_output, open_input, timestamped_name};

use super::{load_quote_set, parse_precision};

/// One quantity entry from the quantities JSON file.
#[derive(Debug, Deserialize)]
struct QuantityEntry {
    supplier: String,
    sku: String,
    quantity: u32,
}

/// Runs the `order` command.
///
/// # Errors
///
/// Returns [`CliError`] on I/O failures, import errors, malformed session
/// JSON, or pipeline validation failures.
pub fn run(
    files: &[PathBuf],
    resolutions: Option<&Path>,
    quantities: Option<&Path>,
    precision: u8,
    out: &Path,
) -> Result<(), CliError> {
    let precision = parse_precision(precision)?;
    let quote = load_quote_set(files, precision)?;

    let resolution = match resolutions {
        Some(path) => apply_resolutions(path, &quote.ranking)?,
        None => TieResolution::new(),
    };
    let state = match quantities {
        Some(path) => apply_quantities(path)?,
        None => OrderState::new(),
    };

    let (resolved, total) = resolution.progress(&quote.ranking);
    if total > 0 {
        println!("Empates resueltos: {resolved}/{total}");
    }

    let order = build_order_set(&quote.ranking, &resolution, &state);
    for supplier in order.lines.keys() {
        println!(
            "{supplier}: subtotal {}",
            fmt_money2(order.supplier_subtotal(supplier))
        );
    }
    println!("Total general: {}", fmt_money2(order.grand_total()));

    let (path, file) = create_output(out, &timestamped_name("pedido_por_proveedor"))?;
    cotiza_excel::write_order_workbook(&order, file)?;
    eprintln!("pedido escrito en {}", path.display());

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let mut raw = String::new();
    open_input(path)?
        .read_to_string(&mut raw)
        .map_err(|e| CliError::IoError {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
    serde_json::from_str(&raw).map_err(|e| CliError::InvalidJson {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Loads the resolutions file and applies each choice against the current
/// ranking. Invalid or stale entries are skipped with a warning.
fn apply_resolutions(path: &Path, ranking: &Ranking) -> Result<TieResolution, CliError> {
    let choices: BTreeMap<String, String> = read_json(path)?;
    let mut resolution = TieResolution::new();
    for (raw_sku, supplier) in &choices {
        let Ok(sku) = Sku::try_from(raw_sku.as_str()) else {
            eprintln!("aviso: SKU invalido {raw_sku:?} en resoluciones, ignorado");
            continue;
        };
        if let Err(e) = resolution.choose(ranking, &sku, Some(supplier)) {
            eprintln!("aviso: resolucion ignorada: {e}");
        }
    }
    Ok(resolution)
}

/// Loads the quantities file into an [`OrderState`]. Entries with an
/// invalid SKU are skipped with a warning; quantities for pairings outside
/// the current orderable set are stored anyway (they apply if the pairing
/// returns).
fn apply_quantities(path: &Path) -> Result<OrderState, CliError> {
    let entries: Vec<QuantityEntry> = read_json(path)?;
    let mut state = OrderState::new();
    for entry in &entries {
        let Ok(sku) = Sku::try_from(entry.sku.as_str()) else {
            eprintln!("aviso: SKU invalido {:?} en cantidades, ignorado", entry.sku);
            continue;
        };
        state.set_quantity(&entry.supplier, &sku, entry.quantity);
    }
    Ok(state)
}
