/// Order building: operator-entered quantities over the orderable set.
///
/// The orderable set is the union of singleton winners and resolved tie
/// choices. Quantities live in a caller-owned [`OrderState`] keyed by
/// `(supplier, SKU)` so they survive upstream recomputation; a key that
/// temporarily leaves the orderable set keeps its quantity and picks it up
/// again if the same pairing returns. Keys are never remapped to a
/// different product.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::newtypes::Sku;
use crate::rank::Ranking;
use crate::records::{OrderLine, RankedRow};
use crate::resolve::TieResolution;

// ---------------------------------------------------------------------------
// OrderState
// ---------------------------------------------------------------------------

/// Per-(supplier, SKU) quantities entered by the operator.
///
/// Quantities are non-negative by construction (`u32`) and default to 0.
/// Tuple keys do not survive JSON maps, so this type stays serde-free;
/// callers persist quantities in their own flat shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderState {
    quantities: BTreeMap<(String, Sku), u32>,
}

impl OrderState {
    /// Creates an empty quantity state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quantity for a `(supplier, SKU)` pairing. Setting 0 is a
    /// valid entry, not an error; it simply zeroes the line total.
    pub fn set_quantity(&mut self, supplier: &str, sku: &Sku, quantity: u32) {
        self.quantities
            .insert((supplier.to_owned(), sku.clone()), quantity);
    }

    /// Returns the stored quantity for a pairing, defaulting to 0.
    pub fn quantity(&self, supplier: &str, sku: &Sku) -> u32 {
        self.quantities
            .get(&(supplier.to_owned(), sku.clone()))
            .copied()
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// OrderSet
// ---------------------------------------------------------------------------

/// The assembled purchase order, one table of lines per supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSet {
    /// Supplier → order lines, lines in ascending numeric SKU order.
    pub lines: BTreeMap<String, Vec<OrderLine>>,
}

impl OrderSet {
    /// Sum of line totals for one supplier; 0.0 for unknown suppliers.
    pub fn supplier_subtotal(&self, supplier: &str) -> f64 {
        self.lines
            .get(supplier)
            .map_or(0.0, |lines| lines.iter().map(|l| l.total).sum())
    }

    /// Sum of all line totals across all suppliers.
    pub fn grand_total(&self) -> f64 {
        self.lines
            .values()
            .flatten()
            .map(|l| l.total)
            .sum()
    }
}

/// Assembles the order set from the current ranking, tie resolutions, and
/// quantity state.
///
/// Orderable rows = singleton winners plus the chosen row of every resolved
/// tie. Quantities come from `state` (default 0); each line's total is
/// `unit_price * quantity`.
pub fn build_order_set(
    ranking: &Ranking,
    resolution: &TieResolution,
    state: &OrderState,
) -> OrderSet {
    let mut orderable: Vec<&RankedRow> = ranking.winners.iter().collect();
    let resolved = resolution.resolved(ranking);
    orderable.extend(resolved.values());

    let mut lines: BTreeMap<String, Vec<OrderLine>> = BTreeMap::new();
    for row in orderable {
        let quantity = state.quantity(&row.supplier, &row.sku);
        lines.entry(row.supplier.clone()).or_default().push(OrderLine {
            supplier: row.supplier.clone(),
            sku: row.sku.clone(),
            name: row.canonical_name.clone(),
            unit_price: row.unit_price,
            quantity,
            total: row.unit_price * f64::from(quantity),
        });
    }
    for supplier_lines in lines.values_mut() {
        supplier_lines.sort_by(|a, b| a.sku.cmp(&b.sku));
    }

    OrderSet { lines }
}
