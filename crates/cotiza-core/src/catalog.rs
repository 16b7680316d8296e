/// Catalog merge: combines all suppliers' records and computes canonical
/// product names.
///
/// Canonical name selection per SKU: the most frequent non-empty trimmed
/// name across all suppliers; on a frequency tie, the longest name; on a
/// length tie, the lexicographically smallest. The chain is a total order,
/// so the result never depends on supplier or map iteration order.
use std::collections::BTreeMap;

use crate::newtypes::Sku;
use crate::records::{MergedRow, SupplierRecord};

/// Merges all suppliers' normalized records into one canonical catalog.
///
/// Every input record appears in the output (a left join of canonical names
/// onto records), including rows with an absent price. Output ordering is
/// ascending by numeric SKU, then supplier, then unit price, which is total
/// for any input and stable under supplier reordering.
pub fn merge(batches: &[Vec<SupplierRecord>]) -> Vec<MergedRow> {
    let records: Vec<&SupplierRecord> = batches.iter().flatten().collect();
    let canonical = canonical_names(&records);

    let mut rows: Vec<MergedRow> = records
        .iter()
        .map(|r| MergedRow {
            sku: r.sku.clone(),
            name: r.name.clone(),
            canonical_name: canonical.get(&r.sku).cloned().unwrap_or_default(),
            supplier: r.supplier.clone(),
            unit_price: r.unit_price,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.sku
            .cmp(&b.sku)
            .then_with(|| a.supplier.cmp(&b.supplier))
            .then_with(|| {
                let ap = a.unit_price.unwrap_or(f64::INFINITY);
                let bp = b.unit_price.unwrap_or(f64::INFINITY);
                ap.total_cmp(&bp)
            })
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

/// Picks one canonical display name per SKU.
///
/// SKUs whose records carry only empty names map to an empty string.
fn canonical_names(records: &[&SupplierRecord]) -> BTreeMap<Sku, String> {
    // BTreeMap on both levels keeps the fold deterministic regardless of
    // input order; the name tie-break alone already guarantees the winner.
    let mut counts: BTreeMap<Sku, BTreeMap<String, usize>> = BTreeMap::new();
    for record in records {
        let name = record.name.trim();
        if name.is_empty() {
            continue;
        }
        *counts
            .entry(record.sku.clone())
            .or_default()
            .entry(name.to_owned())
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter_map(|(sku, names)| {
            names
                .into_iter()
                .max_by(|(name_a, count_a), (name_b, count_b)| {
                    count_a
                        .cmp(count_b)
                        .then_with(|| name_a.len().cmp(&name_b.len()))
                        // max_by keeps the greater element, so the reversed
                        // comparison selects the lexicographically smaller name.
                        .then_with(|| name_b.cmp(name_a))
                })
                .map(|(name, _)| (sku, name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn record(sku: &str, name: &str, supplier: &str, price: Option<f64>) -> SupplierRecord {
        SupplierRecord {
            sku: Sku::try_from(sku).expect("valid sku"),
            name: name.to_owned(),
            supplier: supplier.to_owned(),
            unit_price: price,
        }
    }

    #[test]
    fn most_frequent_name_wins() {
        let batches = vec![
            vec![record("001", "Aspirina", "a", Some(1.0))],
            vec![record("001", "Aspirina", "b", Some(2.0))],
            vec![record("001", "aspirina 500", "c", Some(3.0))],
        ];
        let rows = merge(&batches);
        assert!(rows.iter().all(|r| r.canonical_name == "Aspirina"));
    }

    #[test]
    fn frequency_tie_prefers_longest_name() {
        let batches = vec![
            vec![record("001", "Ibuprofeno", "a", Some(1.0))],
            vec![record("001", "Ibuprofeno 400mg", "b", Some(2.0))],
        ];
        let rows = merge(&batches);
        assert!(rows.iter().all(|r| r.canonical_name == "Ibuprofeno 400mg"));
    }

    #[test]
    fn length_tie_prefers_lexicographically_smallest() {
        let batches = vec![
            vec![record("001", "bbbb", "a", Some(1.0))],
            vec![record("001", "aaaa", "b", Some(2.0))],
        ];
        let rows = merge(&batches);
        assert!(rows.iter().all(|r| r.canonical_name == "aaaa"));
    }

    #[test]
    fn all_empty_names_yield_empty_canonical() {
        let batches = vec![vec![record("001", "", "a", Some(1.0))]];
        let rows = merge(&batches);
        assert_eq!(rows[0].canonical_name, "");
    }

    #[test]
    fn unpriced_rows_survive_the_merge() {
        let batches = vec![vec![
            record("001", "x", "a", Some(1.0)),
            record("002", "y", "a", None),
        ]];
        let rows = merge(&batches);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].unit_price, None);
    }

    #[test]
    fn output_is_numeric_sku_order() {
        let batches = vec![vec![
            record("10", "x", "a", Some(1.0)),
            record("2", "y", "a", Some(1.0)),
        ]];
        let rows = merge(&batches);
        assert_eq!(rows[0].sku.to_string(), "2");
        assert_eq!(rows[1].sku.to_string(), "10");
    }

    #[test]
    fn supplier_order_does_not_change_the_output() {
        let a = vec![
            record("001", "Amoxicilina", "a", Some(1.0)),
            record("002", "Vitamina C", "a", None),
        ];
        let b = vec![record("001", "Amoxi", "b", Some(2.0))];
        let forward = merge(&[a.clone(), b.clone()]);
        let reversed = merge(&[b, a]);
        assert_eq!(forward, reversed);
    }
}
