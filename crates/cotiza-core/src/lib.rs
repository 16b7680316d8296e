#![deny(clippy::print_stdout, clippy::print_stderr)]

//! Core price-reconciliation engine.
//!
//! Takes N supplier price lists (as untyped [`table::RawTable`]s), merges
//! them into a canonical catalog, ranks per-product prices at a configurable
//! precision, and supports the operator workflow of resolving ties and
//! entering order quantities. All file parsing and rendering lives in
//! adapter crates; this crate is pure data transformation plus two small
//! caller-owned state objects.

pub mod catalog;
pub mod money;
pub mod newtypes;
pub mod normalize;
pub mod order;
pub mod pipeline;
pub mod rank;
pub mod records;
pub mod resolve;
pub mod table;

pub use catalog::merge;
pub use money::{clean_price, comparison_minor, fmt_money2, fmt_money4};
pub use newtypes::{MAX_PRECISION, NewtypeError, Precision, Sku};
pub use normalize::{COL_NAME, COL_PRICE, COL_SKU, NormalizeError, normalize};
pub use order::{OrderSet, OrderState, build_order_set};
pub use pipeline::{PipelineError, QuoteSet, build_quote_set};
pub use rank::{Ranking, rank};
pub use records::{MergedRow, OrderLine, RankedRow, SupplierRecord};
pub use resolve::{ResolveError, TieResolution};
pub use table::RawTable;

/// Returns the current version of the cotiza-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
