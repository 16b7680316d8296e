/// Operator tie-resolution state.
///
/// A [`TieResolution`] outlives any single [`Ranking`]: the caller owns it
/// for the working session and replays it against each freshly computed
/// ranking. Writes validate against the current ranking; reads silently skip
/// entries the current ranking no longer supports (the SKU stopped being a
/// real tie, or the chosen supplier left the group). Stale entries are never
/// surfaced as errors.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::newtypes::Sku;
use crate::rank::Ranking;
use crate::records::RankedRow;

// ---------------------------------------------------------------------------
// ResolveError
// ---------------------------------------------------------------------------

/// Rejected tie-resolution writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The SKU is not a real tie in the current ranking.
    NoTieGroup {
        /// The SKU that has no tie group.
        sku: Sku,
    },
    /// The chosen supplier is not a member of the SKU's tie group.
    NotInGroup {
        /// The tied SKU.
        sku: Sku,
        /// The supplier that is not in the group.
        supplier: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTieGroup { sku } => {
                write!(f, "SKU {sku} has no tie group in the current ranking")
            }
            Self::NotInGroup { sku, supplier } => {
                write!(f, "supplier {supplier:?} is not in the tie group for SKU {sku}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

// ---------------------------------------------------------------------------
// TieResolution
// ---------------------------------------------------------------------------

/// Per-SKU supplier choices for real ties, keyed by stable identifiers so
/// the state survives upstream recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieResolution {
    choices: BTreeMap<Sku, String>,
}

impl TieResolution {
    /// Creates an empty resolution state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records, overwrites, or clears the choice for a tied SKU.
    ///
    /// `Some(supplier)` stores the choice after validating that the supplier
    /// is a member of the SKU's tie group in `ranking`. `None` clears any
    /// stored choice and always succeeds, even for unknown SKUs.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoTieGroup`] or [`ResolveError::NotInGroup`];
    /// the stored state is unchanged on error.
    pub fn choose(
        &mut self,
        ranking: &Ranking,
        sku: &Sku,
        supplier: Option<&str>,
    ) -> Result<(), ResolveError> {
        let Some(supplier) = supplier else {
            self.choices.remove(sku);
            return Ok(());
        };
        let Some(group) = ranking.tie_group(sku) else {
            return Err(ResolveError::NoTieGroup { sku: sku.clone() });
        };
        if !group.iter().any(|r| r.supplier == supplier) {
            return Err(ResolveError::NotInGroup {
                sku: sku.clone(),
                supplier: supplier.to_owned(),
            });
        }
        self.choices.insert(sku.clone(), supplier.to_owned());
        Ok(())
    }

    /// Returns `(resolved, total)` tie-group counts against the current
    /// ranking, for progress reporting. Stale choices do not count.
    pub fn progress(&self, ranking: &Ranking) -> (usize, usize) {
        let resolved = ranking
            .ties
            .iter()
            .filter(|(sku, group)| {
                self.choices
                    .get(sku)
                    .is_some_and(|chosen| group.iter().any(|r| &r.supplier == chosen))
            })
            .count();
        (resolved, ranking.ties.len())
    }

    /// Yields the chosen row for every resolved tie in the current ranking.
    ///
    /// Entries whose SKU is no longer a real tie, or whose supplier is no
    /// longer in the group, are silently skipped.
    pub fn resolved(&self, ranking: &Ranking) -> BTreeMap<Sku, RankedRow> {
        let mut out = BTreeMap::new();
        for (sku, chosen) in &self.choices {
            let Some(group) = ranking.tie_group(sku) else {
                continue;
            };
            if let Some(row) = group.iter().find(|r| &r.supplier == chosen) {
                out.insert(sku.clone(), row.clone());
            }
        }
        out
    }

    /// Returns the raw stored choice for a SKU, stale or not.
    pub fn choice(&self, sku: &Sku) -> Option<&str> {
        self.choices.get(sku).map(String::as_str)
    }
}
