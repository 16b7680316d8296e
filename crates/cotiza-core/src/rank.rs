/// Price ranking: per-SKU minimum detection and tie partitioning.
///
/// Rows with an absent unit price are dropped before ranking; they never win
/// and never appear in a tie group. Tie detection is exact integer equality
/// on the comparison price in minor units (see [`crate::money`] for the
/// rounding policy), so there is no within-epsilon comparison anywhere.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::money::comparison_minor;
use crate::newtypes::{Precision, Sku};
use crate::records::{MergedRow, RankedRow};

/// The outcome of one ranking pass at a fixed precision.
///
/// Every SKU with at least one priced record lands in exactly one of
/// `winners` (its minimum-price group had one member) or `ties` (it had
/// several). A `Ranking` is recomputed from scratch whenever source data or
/// the precision changes; stateful layers hold onto their own keys and
/// re-validate against the current `Ranking` at read time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    /// Rows that are the sole cheapest offer for their SKU, sorted by
    /// (supplier, numeric SKU).
    pub winners: Vec<RankedRow>,
    /// Real ties: SKU → all rows sharing the group minimum, in numeric SKU
    /// order; members sorted by (supplier, unit price).
    pub ties: BTreeMap<Sku, Vec<RankedRow>>,
    /// The precision this ranking was computed at.
    pub precision: Precision,
}

impl Ranking {
    /// One representative cheapest row per SKU: the winner for singleton
    /// groups, the first tie member otherwise. Feeds the best-price sheet.
    pub fn best_prices(&self) -> Vec<RankedRow> {
        let mut by_sku: BTreeMap<&Sku, &RankedRow> = BTreeMap::new();
        for row in &self.winners {
            by_sku.insert(&row.sku, row);
        }
        for (sku, group) in &self.ties {
            if let Some(first) = group.first() {
                by_sku.insert(sku, first);
            }
        }
        by_sku.into_values().cloned().collect()
    }

    /// Every minimum-price row, winners and tie members alike, in numeric
    /// SKU order. Feeds the tie-base sheet.
    pub fn tie_base(&self) -> Vec<RankedRow> {
        let mut rows: Vec<RankedRow> = self.winners.clone();
        for group in self.ties.values() {
            rows.extend(group.iter().cloned());
        }
        rows.sort_by(|a, b| a.sku.cmp(&b.sku).then_with(|| a.supplier.cmp(&b.supplier)));
        rows
    }

    /// Returns the tie group for a SKU, if that SKU is a real tie.
    pub fn tie_group(&self, sku: &Sku) -> Option<&[RankedRow]> {
        self.ties.get(sku).map(Vec::as_slice)
    }
}

/// Ranks merged rows at the given precision.
///
/// Per SKU, the minimum comparison price defines the group: all priced rows
/// whose comparison price equals that minimum. Singleton groups become
/// auto-selected winners; larger groups become real ties awaiting operator
/// resolution.
pub fn rank(rows: &[MergedRow], precision: Precision) -> Ranking {
    let mut groups: BTreeMap<Sku, Vec<RankedRow>> = BTreeMap::new();
    for row in rows {
        let Some(unit_price) = row.unit_price else {
            continue;
        };
        groups.entry(row.sku.clone()).or_default().push(RankedRow {
            sku: row.sku.clone(),
            canonical_name: row.canonical_name.clone(),
            supplier: row.supplier.clone(),
            unit_price,
            comparison_minor: comparison_minor(unit_price, precision),
        });
    }

    let mut winners = Vec::new();
    let mut ties = BTreeMap::new();
    for (sku, rows) in groups {
        let Some(min_minor) = rows.iter().map(|r| r.comparison_minor).min() else {
            continue;
        };
        let mut group: Vec<RankedRow> = rows
            .into_iter()
            .filter(|r| r.comparison_minor == min_minor)
            .collect();
        group.sort_by(|a, b| {
            a.supplier
                .cmp(&b.supplier)
                .then_with(|| a.unit_price.total_cmp(&b.unit_price))
        });
        if group.len() == 1 {
            winners.extend(group);
        } else {
            ties.insert(sku, group);
        }
    }

    winners.sort_by(|a, b| a.supplier.cmp(&b.supplier).then_with(|| a.sku.cmp(&b.sku)));

    Ranking {
        winners,
        ties,
        precision,
    }
}
