//! VoteRecord assembly
//!
//! The last stage: reconciled per-category name lists become an
//! immutable record. The pass/fail call and the motion classification
//! are both adapter policies, because document families genuinely
//! disagree on them.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rollcall_types::{Ballot, ReconstructError, VoteCategory, VoteRecord, VoteResult};

use crate::adapters::LayoutAdapter;

/// Assemble the final record from reconciled name lists.
pub fn emit(
    adapter: &dyn LayoutAdapter,
    source_url: &str,
    start_date: NaiveDate,
    motion_text: String,
    vote_number: Option<u32>,
    names_by_category: &BTreeMap<VoteCategory, Vec<String>>,
) -> Result<VoteRecord, ReconstructError> {
    // A legislator cannot be in two categories at once.
    let mut seen: HashMap<&str, VoteCategory> = HashMap::new();
    for (&category, names) in names_by_category {
        for name in names {
            if let Some(previous) = seen.insert(name.as_str(), category) {
                if previous != category {
                    return Err(ReconstructError::DuplicateVoter(name.clone()));
                }
            }
        }
    }

    let mut counts: BTreeMap<VoteCategory, usize> = BTreeMap::new();
    let mut ballots: Vec<Ballot> = Vec::new();
    for &category in adapter.categories() {
        let names = names_by_category.get(&category).map_or(&[][..], Vec::as_slice);
        counts.insert(category, names.len());
        for name in names {
            ballots.push(Ballot {
                category,
                voter_name: name.clone(),
            });
        }
    }
    // Structural: every counted name became exactly one ballot.
    debug_assert_eq!(counts.values().sum::<usize>(), ballots.len());

    let result = if adapter.passes(&counts) {
        VoteResult::Pass
    } else {
        VoteResult::Fail
    };
    let classification = classify_motion(adapter, &motion_text).to_string();

    Ok(VoteRecord {
        chamber: adapter.chamber(),
        start_date,
        motion_text,
        classification,
        result,
        counts,
        ballots,
        vote_number,
        source_url: source_url.to_string(),
    })
}

/// First matching rule wins; families with no rules fall back to
/// their default classification.
pub fn classify_motion(adapter: &dyn LayoutAdapter, motion: &str) -> &'static str {
    adapter
        .classification_rules()
        .iter()
        .find(|(pattern, _)| pattern.is_match(motion))
        .map(|&(_, classification)| classification)
        .unwrap_or_else(|| adapter.default_classification())
}
