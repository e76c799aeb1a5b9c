//! Per-document-family layout adapters
//!
//! Every legislature prints its roll calls differently, but the
//! reconstruction algorithm is the same everywhere. Each document
//! family implements [`LayoutAdapter`] to supply the patterns and
//! policies the shared engine needs: category-label regex, mark
//! alphabet, name override table, pass/fail predicate. The engine
//! itself never carries jurisdiction-specific logic.

pub mod massachusetts;
pub mod new_mexico;

use std::collections::BTreeMap;

use regex::Regex;
use rollcall_types::{Chamber, VoteCategory};

/// Strategy interface one document family implements.
pub trait LayoutAdapter: Send + Sync {
    /// Short family name used in diagnostics, e.g. "nm-senate".
    fn family(&self) -> &'static str;

    fn chamber(&self) -> Chamber;

    /// Categories this family's documents can print. Unseen categories
    /// still appear in the emitted counts map with a zero count.
    fn categories(&self) -> &'static [VoteCategory];

    /// Pattern matching the category labels of a grid header row.
    /// `None` for families that only publish line layouts.
    fn header_labels(&self) -> Option<&Regex> {
        None
    }

    /// Whether a token is a grid header label. The default defers to
    /// [`Self::header_labels`]; families whose label vocabulary
    /// collides with other text (e.g. "YEA" vs the totals label
    /// "YEAS") refine this.
    fn is_header_label(&self, text: &str) -> bool {
        self.header_labels().is_some_and(|re| re.is_match(text))
    }

    /// Map a header or section label to its category.
    fn category_for_label(&self, label: &str) -> Option<VoteCategory>;

    /// Literal cell text that terminates the vote grid.
    fn table_stop(&self) -> &'static str {
        "TOTAL"
    }

    /// Literal text marking the row carrying the printed totals.
    fn totals_marker(&self) -> &'static str {
        "TOTAL"
    }

    /// Single-character marks a line layout uses, with the category
    /// each denotes. A known misread substitute maps to the category
    /// of the mark it stands in for, and keeps its own entry so the
    /// substitution stays visible.
    fn mark_alphabet(&self) -> &'static [(char, VoteCategory)] {
        &[]
    }

    /// Totals vocabulary for line layouts: a pattern whose first
    /// capture is the count, paired with the category it declares.
    fn totals_vocabulary(&self) -> &'static [(Regex, VoteCategory)] {
        &[]
    }

    /// Exact-match corrections for systematically misread names.
    fn name_overrides(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// One-off name corrections that exact matching cannot express.
    fn special_case_name(&self, _name: &str) -> Option<&'static str> {
        None
    }

    /// Whether this family's extractor emits shift-encoded glyphs
    /// that must be decoded before the name is usable.
    fn shifted_encoding(&self) -> bool {
        false
    }

    /// Placeholder printed instead of a name for the presiding
    /// officer; stripped from a line before it is classified.
    fn presiding_officer(&self) -> Option<&Regex> {
        None
    }

    /// Lines that carry no information and are discarded outright.
    fn is_boilerplate(&self, line: &str) -> bool {
        line.is_empty()
    }

    /// strptime-style format of the timestamp line in line layouts.
    fn timestamp_format(&self) -> &'static str {
        "%m/%d/%Y %I:%M %p"
    }

    /// Motion text to attach to grid documents, which print no motion.
    fn grid_motion(&self) -> &'static str {
        "passage"
    }

    /// Pass/fail predicate over the reconciled counts.
    fn passes(&self, counts: &BTreeMap<VoteCategory, usize>) -> bool;

    /// Ordered (pattern, classification) rules; first match wins.
    fn classification_rules(&self) -> &'static [(Regex, &'static str)] {
        &[]
    }

    fn default_classification(&self) -> &'static str {
        "passage"
    }
}

/// Category by the first letter of its label, the convention grid
/// sheets follow: YEA/YES, NAY/NO, EXCUSED/EXC, ABSENT/ABS; anything
/// else (REC and friends) lands in Other.
pub fn category_by_initial(label: &str) -> Option<VoteCategory> {
    match label.chars().next()? {
        'Y' => Some(VoteCategory::Yes),
        'N' => Some(VoteCategory::No),
        'E' => Some(VoteCategory::Excused),
        'A' => Some(VoteCategory::Absent),
        _ => Some(VoteCategory::Other),
    }
}

/// Simple-majority predicate: yes votes outnumber no votes.
pub fn yes_over_no(counts: &BTreeMap<VoteCategory, usize>) -> bool {
    counts.get(&VoteCategory::Yes).copied().unwrap_or(0)
        > counts.get(&VoteCategory::No).copied().unwrap_or(0)
}

/// Stricter predicate for families whose journals count every non-yes
/// ballot against passage.
pub fn yes_over_all_others(counts: &BTreeMap<VoteCategory, usize>) -> bool {
    let yes = counts.get(&VoteCategory::Yes).copied().unwrap_or(0);
    let others: usize = counts
        .iter()
        .filter(|(&category, _)| category != VoteCategory::Yes)
        .map(|(_, &n)| n)
        .sum();
    yes > others
}
