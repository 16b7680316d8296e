/// Full reconciliation pipeline: normalize every supplier file, merge the
/// catalog, and rank prices in one pass.
///
/// The pipeline is all-or-nothing on ingestion: if any file fails
/// validation, no output is produced for any file. Ranking never fails;
/// rows it cannot use are simply excluded upstream. Stateful session
/// objects ([`crate::resolve::TieResolution`], [`crate::order::OrderState`])
/// are deliberately not part of the pipeline output; the caller owns them
/// and replays them against each fresh [`QuoteSet`].
use std::fmt;

use serde::Serialize;

use crate::catalog::merge;
use crate::newtypes::Precision;
use crate::normalize::{NormalizeError, normalize};
use crate::rank::{Ranking, rank};
use crate::records::MergedRow;
use crate::table::RawTable;

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Fatal pipeline failures. Every variant aborts the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No input tables were supplied, or ingestion produced zero records.
    EmptyInput,
    /// A supplier file failed validation.
    Normalize(NormalizeError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("no valid records after ingestion"),
            Self::Normalize(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyInput => None,
            Self::Normalize(e) => Some(e),
        }
    }
}

impl From<NormalizeError> for PipelineError {
    fn from(e: NormalizeError) -> Self {
        Self::Normalize(e)
    }
}

// ---------------------------------------------------------------------------
// QuoteSet
// ---------------------------------------------------------------------------

/// One complete recomputation pass over the current source files.
///
/// Recomputed fresh whenever a file is added or removed or the precision
/// changes; carries no session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSet {
    /// Every input record with its canonical name, in catalog order.
    pub merged: Vec<MergedRow>,
    /// Winner/tie partition at this quote set's precision.
    pub ranking: Ranking,
}

/// Runs ingestion, merge, and ranking over `(supplier, table)` pairs.
///
/// Suppliers are processed in the given order; the first file to fail
/// validation aborts the run.
///
/// # Errors
///
/// Returns [`PipelineError::Normalize`] on the first file-level validation
/// failure, or [`PipelineError::EmptyInput`] when there are no tables or no
/// records survive ingestion.
pub fn build_quote_set(
    inputs: &[(String, RawTable)],
    precision: Precision,
) -> Result<QuoteSet, PipelineError> {
    if inputs.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let mut batches = Vec::with_capacity(inputs.len());
    for (supplier, table) in inputs {
        batches.push(normalize(supplier, table)?);
    }
    if batches.iter().all(Vec::is_empty) {
        return Err(PipelineError::EmptyInput);
    }

    let merged = merge(&batches);
    let ranking = rank(&merged, precision);
    Ok(QuoteSet { merged, ranking })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn price_list(rows: &[(&str, &str, &str)]) -> RawTable {
        RawTable::new(
            strings(&["SKU", "Nombre", "Precio Unitario"]),
            rows.iter()
                .map(|(sku, name, price)| strings(&[sku, name, price]))
                .collect(),
        )
    }

    fn precision2() -> Precision {
        Precision::default()
    }

    #[test]
    fn end_to_end_two_suppliers() {
        let inputs = vec![
            (
                "farmacos_sa".to_owned(),
                price_list(&[("001", "Aspirina", "10.0000"), ("002", "Gasas", "5.00")]),
            ),
            (
                "distribuidora_mx".to_owned(),
                price_list(&[("001", "Aspirina", "10.0000"), ("002", "Gasas", "5.0049")]),
            ),
        ];
        let quote = build_quote_set(&inputs, precision2()).expect("valid inputs");
        assert_eq!(quote.merged.len(), 4);
        // Both SKUs tie at precision 2 (5.0049 rounds to 5.00).
        assert_eq!(quote.ranking.ties.len(), 2);
        assert!(quote.ranking.winners.is_empty());
    }

    #[test]
    fn no_inputs_is_empty_input() {
        assert_eq!(
            build_quote_set(&[], precision2()).expect_err("must fail"),
            PipelineError::EmptyInput
        );
    }

    #[test]
    fn all_blank_tables_are_empty_input() {
        let inputs = vec![("prov".to_owned(), price_list(&[]))];
        assert_eq!(
            build_quote_set(&inputs, precision2()).expect_err("must fail"),
            PipelineError::EmptyInput
        );
    }

    #[test]
    fn one_bad_file_aborts_the_whole_run() {
        let inputs = vec![
            ("bueno".to_owned(), price_list(&[("001", "x", "1.0")])),
            ("malo".to_owned(), price_list(&[("ABC", "y", "2.0")])),
        ];
        let err = build_quote_set(&inputs, precision2()).expect_err("must fail");
        match err {
            PipelineError::Normalize(NormalizeError::InvalidSku { supplier, .. }) => {
                assert_eq!(supplier, "malo");
            }
            PipelineError::Normalize(NormalizeError::MissingColumns { .. })
            | PipelineError::EmptyInput => unreachable!("wrong error variant"),
        }
    }

    #[test]
    fn precision_change_recomputes_the_partition() {
        let inputs = vec![
            ("a".to_owned(), price_list(&[("002", "g", "5.0000")])),
            ("b".to_owned(), price_list(&[("002", "g", "5.0049")])),
        ];
        let p2 = build_quote_set(&inputs, precision2()).expect("valid inputs");
        assert_eq!(p2.ranking.ties.len(), 1);

        let p4 = build_quote_set(&inputs, Precision::try_from(4).expect("valid"))
            .expect("valid inputs");
        assert!(p4.ranking.ties.is_empty());
        assert_eq!(p4.ranking.winners.len(), 1);

        // Round-tripping back to precision 2 reproduces the original partition.
        let again = build_quote_set(&inputs, precision2()).expect("valid inputs");
        assert_eq!(again.ranking, p2.ranking);
    }
}
