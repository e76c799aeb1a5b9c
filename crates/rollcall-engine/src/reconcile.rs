//! Tally reconciliation
//!
//! Extracted per-category name lists are cross-checked against the
//! totals the document itself prints. With a single printed source
//! the check is exact. Some journals print totals twice (inline with
//! the motion and again with the vote table), and the two may
//! legitimately disagree by a late-recorded vote change; those
//! documents are reconciled within the determinative margin — the
//! smaller of the two yes/no margins — because a discrepancy that
//! small cannot flip the pass/fail outcome. A one-name discrepancy is
//! harmless in a 45-10 vote and disqualifying in a 23-22 vote.

use std::collections::BTreeMap;

use rollcall_types::{ReconstructError, VoteCategory};

use crate::adapters::LayoutAdapter;

/// Independently printed totals observed in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedTotals {
    /// First-reported totals, printed inline with the motion.
    pub inline: Option<BTreeMap<VoteCategory, usize>>,
    /// Totals printed with the vote table itself.
    pub table: Option<BTreeMap<VoteCategory, usize>>,
}

/// Accept or reject the extraction against the printed totals.
pub fn reconcile(
    adapter: &dyn LayoutAdapter,
    extracted: &BTreeMap<VoteCategory, Vec<String>>,
    observed: &ObservedTotals,
) -> Result<(), ReconstructError> {
    match (&observed.inline, &observed.table) {
        (None, None) => Err(ReconstructError::MissingTotals),

        // One ground truth: exact equality, no tolerance.
        (Some(declared), None) | (None, Some(declared)) => {
            check_each(adapter, extracted, declared, 0)
        }

        (Some(first), Some(last)) => {
            let margin = determinative_margin(first, last);

            // The two printed sources must themselves agree within the
            // margin on the deciding categories before either can be
            // trusted.
            for category in [VoteCategory::Yes, VoteCategory::No] {
                let a = count(first, category);
                let b = count(last, category);
                if a.abs_diff(b) > margin {
                    return Err(ReconstructError::CountMismatch {
                        category,
                        extracted: a,
                        declared: b,
                        tolerance: margin,
                    });
                }
            }

            check_each(adapter, extracted, last, margin)
        }
    }
}

/// The smaller of the two printed yes/no margins: the largest count
/// discrepancy that cannot change the outcome.
pub fn determinative_margin(
    first: &BTreeMap<VoteCategory, usize>,
    last: &BTreeMap<VoteCategory, usize>,
) -> usize {
    let first_margin = count(first, VoteCategory::Yes).abs_diff(count(first, VoteCategory::No));
    let last_margin = count(last, VoteCategory::Yes).abs_diff(count(last, VoteCategory::No));
    first_margin.min(last_margin)
}

fn check_each(
    adapter: &dyn LayoutAdapter,
    extracted: &BTreeMap<VoteCategory, Vec<String>>,
    declared: &BTreeMap<VoteCategory, usize>,
    tolerance: usize,
) -> Result<(), ReconstructError> {
    for &category in adapter.categories() {
        let extracted_n = extracted.get(&category).map_or(0, Vec::len);
        let declared_n = count(declared, category);
        if extracted_n.abs_diff(declared_n) > tolerance {
            return Err(ReconstructError::CountMismatch {
                category,
                extracted: extracted_n,
                declared: declared_n,
                tolerance,
            });
        }
    }
    Ok(())
}

fn count(totals: &BTreeMap<VoteCategory, usize>, category: VoteCategory) -> usize {
    totals.get(&category).copied().unwrap_or(0)
}
