/// Workbook export for the two interaction modes.
///
/// The summary workbook carries the intermediate computation tables used
/// while resolving ties; the order workbook is the terminal artifact, one
/// sheet per supplier with currency-formatted totals.
use std::io::Write;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use cotiza_core::{MergedRow, OrderSet, QuoteSet, RankedRow};

use crate::error::ExportError;

/// Excel limits sheet names to 31 characters.
const SHEET_NAME_MAX: usize = 31;

/// Number format for money columns.
const MONEY_FORMAT: &str = "$#,##0.00";

/// Truncates a supplier name to a valid sheet name length.
fn sheet_name(supplier: &str) -> String {
    supplier.chars().take(SHEET_NAME_MAX).collect()
}

fn write_headers(ws: &mut Worksheet, headers: &[&str]) -> Result<(), ExportError> {
    for (col, header) in headers.iter().enumerate() {
        ws.write_string(0, col as u16, *header)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Summary workbook
// ---------------------------------------------------------------------------

/// Writes the five-sheet summary workbook for a quote set: the combined raw
/// merge, the best price per product, the tie-group base table, the unique
/// winners, and the real ties awaiting resolution.
///
/// # Errors
///
/// Returns [`ExportError`] if the workbook cannot be built or written.
pub fn write_summary_workbook<W: Write>(
    quote: &QuoteSet,
    mut writer: W,
) -> Result<(), ExportError> {
    let mut wb = Workbook::new();

    write_merged_sheet(wb.add_worksheet(), &quote.merged)?;
    write_ranked_sheet(wb.add_worksheet(), "Mejores Precios", &quote.ranking.best_prices())?;
    write_ranked_sheet(wb.add_worksheet(), "Base Empates", &quote.ranking.tie_base())?;
    write_ranked_sheet(wb.add_worksheet(), "Ganadores Unicos", &quote.ranking.winners)?;

    let tied: Vec<RankedRow> = quote
        .ranking
        .ties
        .values()
        .flat_map(|group| group.iter().cloned())
        .collect();
    write_ranked_sheet(wb.add_worksheet(), "Empates Reales", &tied)?;

    let bytes = wb.save_to_buffer()?;
    writer.write_all(&bytes).map_err(|e| ExportError::Io {
        detail: e.to_string(),
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        detail: e.to_string(),
    })?;
    Ok(())
}

fn write_merged_sheet(ws: &mut Worksheet, rows: &[MergedRow]) -> Result<(), ExportError> {
    ws.set_name("Combinado")?;
    write_headers(
        ws,
        &["SKU", "Nombre", "Nombre Canonico", "Proveedor", "Precio Unitario"],
    )?;
    let money = Format::new().set_num_format(MONEY_FORMAT);
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        ws.write_string(r, 0, row.sku.to_string())?;
        ws.write_string(r, 1, &row.name)?;
        ws.write_string(r, 2, &row.canonical_name)?;
        ws.write_string(r, 3, &row.supplier)?;
        if let Some(price) = row.unit_price {
            ws.write_number_with_format(r, 4, price, &money)?;
        }
    }
    Ok(())
}

fn write_ranked_sheet(
    ws: &mut Worksheet,
    name: &str,
    rows: &[RankedRow],
) -> Result<(), ExportError> {
    ws.set_name(name)?;
    write_headers(ws, &["SKU", "Nombre", "Proveedor", "Precio Unitario"])?;
    let money = Format::new().set_num_format(MONEY_FORMAT);
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        ws.write_string(r, 0, row.sku.to_string())?;
        ws.write_string(r, 1, &row.canonical_name)?;
        ws.write_string(r, 2, &row.supplier)?;
        ws.write_number_with_format(r, 3, row.unit_price, &money)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Order workbook
// ---------------------------------------------------------------------------

/// Writes the per-supplier order workbook: one sheet per supplier with
/// columns `[Cantidad, SKU, Nombre, Precio Unitario, Total]`, plus a final
/// `Resumen` sheet with per-supplier subtotals and the grand total.
///
/// Supplier sheet names are truncated to Excel's 31-character limit. Money
/// columns are formatted `$#,##0.00`; quantities as plain integers.
///
/// # Errors
///
/// Returns [`ExportError`] if the workbook cannot be built or written.
pub fn write_order_workbook<W: Write>(order: &OrderSet, mut writer: W) -> Result<(), ExportError> {
    let mut wb = Workbook::new();
    let money = Format::new().set_num_format(MONEY_FORMAT);
    let qty = Format::new().set_num_format("0");

    for (supplier, lines) in &order.lines {
        let ws = wb.add_worksheet();
        ws.set_name(sheet_name(supplier))?;
        write_headers(ws, &["Cantidad", "SKU", "Nombre", "Precio Unitario", "Total"])?;

        // Column widths follow the original template layout.
        ws.set_column_width(0, 10)?;
        ws.set_column_width(1, 12)?;
        ws.set_column_width(2, 28)?;
        ws.set_column_width(3, 14)?;
        ws.set_column_width(4, 14)?;

        for (i, line) in lines.iter().enumerate() {
            let r = (i + 1) as u32;
            ws.write_number_with_format(r, 0, f64::from(line.quantity), &qty)?;
            ws.write_string(r, 1, line.sku.to_string())?;
            ws.write_string(r, 2, &line.name)?;
            ws.write_number_with_format(r, 3, line.unit_price, &money)?;
            ws.write_number_with_format(r, 4, line.total, &money)?;
        }
    }

    let ws = wb.add_worksheet();
    ws.set_name("Resumen")?;
    write_headers(ws, &["Proveedor", "Subtotal"])?;
    let mut r = 1u32;
    for supplier in order.lines.keys() {
        ws.write_string(r, 0, supplier)?;
        ws.write_number_with_format(r, 1, order.supplier_subtotal(supplier), &money)?;
        r += 1;
    }
    ws.write_string(r, 0, "Total general")?;
    ws.write_number_with_format(r, 1, order.grand_total(), &money)?;

    let bytes = wb.save_to_buffer()?;
    writer.write_all(&bytes).map_err(|e| ExportError::Io {
        detail: e.to_string(),
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        detail: e.to_string(),
    })?;
    Ok(())
}
