/// Row shapes flowing through the reconciliation pipeline.
///
/// One supplier file produces [`SupplierRecord`]s, the catalog merge adds
/// canonical names to make [`MergedRow`]s, ranking keeps only priced rows as
/// [`RankedRow`]s, and the order builder emits [`OrderLine`]s.
use serde::{Deserialize, Serialize};

use crate::newtypes::Sku;

/// A single normalized row from one supplier's price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
    /// Validated all-digit product identifier.
    pub sku: Sku,
    /// Trimmed display name as this supplier wrote it; may be empty.
    pub name: String,
    /// Source identifier, the supplier file's base name without extension.
    pub supplier: String,
    /// Parsed unit price. `None` when the cell was empty or unparseable;
    /// such rows stay in the catalog but never enter ranking.
    pub unit_price: Option<f64>,
}

/// A supplier record joined with the catalog-wide canonical product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    /// Validated all-digit product identifier.
    pub sku: Sku,
    /// This supplier's own display name for the product.
    pub name: String,
    /// The single name chosen to represent this SKU across all suppliers.
    pub canonical_name: String,
    /// Source supplier identifier.
    pub supplier: String,
    /// Parsed unit price, if any.
    pub unit_price: Option<f64>,
}

/// A priced merged row with its comparison price attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    /// Validated all-digit product identifier.
    pub sku: Sku,
    /// Canonical product name.
    pub canonical_name: String,
    /// Source supplier identifier.
    pub supplier: String,
    /// Exact unit price as parsed from the source file.
    pub unit_price: f64,
    /// Unit price scaled to minor units at the run's precision; tie
    /// detection is exact equality on this integer.
    pub comparison_minor: i64,
}

/// One line of the final purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Supplier this line will be ordered from.
    pub supplier: String,
    /// Product identifier.
    pub sku: Sku,
    /// Canonical product name.
    pub name: String,
    /// Unit price quoted by this supplier.
    pub unit_price: f64,
    /// Operator-entered quantity; defaults to 0.
    pub quantity: u32,
    /// `unit_price * quantity`; 0.0 for untouched lines.
    pub total: f64,
}
