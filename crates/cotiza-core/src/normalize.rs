/// Ingestion and normalization of one supplier's raw price list.
///
/// Validates the column contract, cleans every cell, and produces uniform
/// [`SupplierRecord`]s. Identifier problems fail the whole batch with the
/// offending rows attached; price problems never do (an unparseable price
/// becomes an absent price).
use std::fmt;

use crate::money::clean_price;
use crate::newtypes::Sku;
use crate::records::SupplierRecord;
use crate::table::RawTable;

/// Required column holding the product identifier.
pub const COL_SKU: &str = "SKU";
/// Required column holding the unit price.
pub const COL_PRICE: &str = "Precio Unitario";
/// Optional column holding the supplier's display name for the product.
pub const COL_NAME: &str = "Nombre";

// ---------------------------------------------------------------------------
// NormalizeError
// ---------------------------------------------------------------------------

/// Fatal ingestion failures for a single supplier file.
///
/// Either variant aborts the entire pipeline run: no report is produced for
/// any file when one file fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The file lacks one or both required columns.
    MissingColumns {
        /// Supplier (file base name) whose table was rejected.
        supplier: String,
        /// The required column names that were not found.
        missing: Vec<String>,
    },

    /// One or more rows carry a product identifier that is not all digits.
    InvalidSku {
        /// Supplier (file base name) whose table was rejected.
        supplier: String,
        /// Offending `(spreadsheet_row, raw_value)` pairs. Row numbers are
        /// 1-based and count the header, matching what the operator sees in
        /// the source file.
        rows: Vec<(usize, String)>,
    },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumns { supplier, missing } => {
                write!(
                    f,
                    "{supplier}: missing required column(s) {}",
                    missing
                        .iter()
                        .map(|c| format!("{c:?}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Self::InvalidSku { supplier, rows } => {
                write!(f, "{supplier}: invalid SKU (digits only) in row(s) ")?;
                let mut first = true;
                for (row, value) in rows {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{row} ({value:?})")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

/// Normalizes one supplier's raw table into [`SupplierRecord`]s.
///
/// - `SKU` and `Precio Unitario` columns are required; `Nombre` defaults to
///   an empty string per row.
/// - SKU and name cells are whitespace-trimmed.
/// - Price cells are cleaned via [`clean_price`]; unparseable values become
///   `None` rather than failing the batch.
/// - Rows whose SKU, name, and price cells are all empty are skipped
///   (trailing blank spreadsheet rows).
///
/// # Errors
///
/// Returns [`NormalizeError::MissingColumns`] when a required column is
/// absent, or [`NormalizeError::InvalidSku`] listing every row whose
/// identifier is not all digits. Both are whole-batch failures.
pub fn normalize(supplier: &str, table: &RawTable) -> Result<Vec<SupplierRecord>, NormalizeError> {
    let missing: Vec<String> = [COL_SKU, COL_PRICE]
        .iter()
        .filter(|col| table.column(col).is_none())
        .map(|col| (*col).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(NormalizeError::MissingColumns {
            supplier: supplier.to_owned(),
            missing,
        });
    }

    let sku_col = table.column(COL_SKU).unwrap_or(0);
    let price_col = table.column(COL_PRICE).unwrap_or(0);
    let name_col = table.column(COL_NAME);

    let mut records = Vec::with_capacity(table.rows().len());
    let mut invalid: Vec<(usize, String)> = Vec::new();

    for row_idx in 0..table.rows().len() {
        let raw_sku = table.cell(row_idx, sku_col).trim();
        let raw_price = table.cell(row_idx, price_col).trim();
        let raw_name = name_col.map_or("", |c| table.cell(row_idx, c)).trim();

        if raw_sku.is_empty() && raw_price.is_empty() && raw_name.is_empty() {
            continue;
        }

        match Sku::try_from(raw_sku) {
            Ok(sku) => records.push(SupplierRecord {
                sku,
                name: raw_name.to_owned(),
                supplier: supplier.to_owned(),
                unit_price: clean_price(raw_price),
            }),
            // +2: 1-based numbering plus the header row.
            Err(_) => invalid.push((row_idx + 2, raw_sku.to_owned())),
        }
    }

    if !invalid.is_empty() {
        return Err(NormalizeError::InvalidSku {
            supplier: supplier.to_owned(),
            rows: invalid,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            strings(headers),
            rows.iter().map(|r| strings(r)).collect(),
        )
    }

    #[test]
    fn normalizes_clean_rows() {
        let t = table(
            &["SKU", "Nombre", "Precio Unitario"],
            &[&["001", " Paracetamol 500mg ", "$12,345.6700"]],
        );
        let records = normalize("droguera_norte", &t).expect("valid table");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sku.to_string(), "001");
        assert_eq!(records[0].name, "Paracetamol 500mg");
        assert_eq!(records[0].supplier, "droguera_norte");
        assert_eq!(records[0].unit_price, Some(12345.67));
    }

    #[test]
    fn missing_required_columns_is_fatal() {
        let t = table(&["SKU", "Nombre"], &[&["001", "x"]]);
        let err = normalize("prov", &t).expect_err("must fail");
        assert_eq!(
            err,
            NormalizeError::MissingColumns {
                supplier: "prov".to_owned(),
                missing: vec!["Precio Unitario".to_owned()],
            }
        );
    }

    #[test]
    fn name_column_is_optional() {
        let t = table(&["SKU", "Precio Unitario"], &[&["001", "5.00"]]);
        let records = normalize("prov", &t).expect("valid table");
        assert_eq!(records[0].name, "");
    }

    #[test]
    fn invalid_sku_fails_whole_batch_with_all_offenders() {
        let t = table(
            &["SKU", "Precio Unitario"],
            &[&["001", "1.0"], &["12a", "2.0"], &["-3", "3.0"]],
        );
        let err = normalize("prov", &t).expect_err("must fail");
        match err {
            NormalizeError::InvalidSku { supplier, rows } => {
                assert_eq!(supplier, "prov");
                assert_eq!(
                    rows,
                    vec![(3, "12a".to_owned()), (4, "-3".to_owned())]
                );
            }
            NormalizeError::MissingColumns { .. } => {
                unreachable!("wrong error variant")
            }
        }
    }

    #[test]
    fn unparseable_price_becomes_absent_not_error() {
        let t = table(
            &["SKU", "Precio Unitario"],
            &[&["001", "consultar"], &["002", "7.25"]],
        );
        let records = normalize("prov", &t).expect("valid table");
        assert_eq!(records[0].unit_price, None);
        assert_eq!(records[1].unit_price, Some(7.25));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let t = table(
            &["SKU", "Nombre", "Precio Unitario"],
            &[&["001", "a", "1.0"], &["", "", ""], &["", " ", ""]],
        );
        let records = normalize("prov", &t).expect("valid table");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn empty_sku_with_data_elsewhere_is_invalid() {
        let t = table(
            &["SKU", "Nombre", "Precio Unitario"],
            &[&["", "producto sin clave", "9.99"]],
        );
        let err = normalize("prov", &t).expect_err("must fail");
        match err {
            NormalizeError::InvalidSku { rows, .. } => {
                assert_eq!(rows, vec![(2, String::new())]);
            }
            NormalizeError::MissingColumns { .. } => {
                unreachable!("wrong error variant")
            }
        }
    }
}
