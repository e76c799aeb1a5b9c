//! Massachusetts House roll-call records
//!
//! The House publishes one PDF per sitting with a fixed-width line
//! layout per roll call: motion text, a "No. <n>" identifier, a
//! timestamp, declared totals ("145 yeas", "12 nays", "3 n/v"), then
//! one column of single-character marks followed by one column of
//! names. Marks and names are zipped positionally; the extractor
//! occasionally misreads a Y as a P, which the mark alphabet maps
//! back to yes without hiding the substitution.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use rollcall_types::{Chamber, VoteCategory};

use super::{yes_over_no, LayoutAdapter};

lazy_static! {
    static ref TOTALS_VOCABULARY: Vec<(Regex, VoteCategory)> = vec![
        (
            Regex::new(r"(?i)^(\d+) yeas").unwrap(),
            VoteCategory::Yes
        ),
        (
            Regex::new(r"(?i)^(\d+) nays").unwrap(),
            VoteCategory::No
        ),
        (
            Regex::new(r"(?i)^(\d+) n/v").unwrap(),
            VoteCategory::NotVoting
        ),
    ];

    /// Presiding-officer placeholder printed in place of a name.
    static ref PRESIDING_OFFICER: Regex =
        Regex::new(r"(?i)(mr\.?|madam)\s+(speaker|president)").unwrap();

    /// Journal motion classifications, checked in order.
    static ref CLASSIFICATION_RULES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)passing.+engross").unwrap(), "engrossment"),
        (
            Regex::new(r"(?i)adoption.+amendment").unwrap(),
            "amendment-passage"
        ),
        (
            Regex::new(r"(?i)acceptance.+report").unwrap(),
            "report-acceptance"
        ),
        (Regex::new(r"(?i)passing.+enacted").unwrap(), "passage"),
        (Regex::new(r"(?i)approving.+plan").unwrap(), "passage"),
    ];
}

/// `P` is a known extractor misread of `Y`; it keeps its own entry so
/// the substitution stays documented instead of being merged into the
/// canonical mark.
const MARK_ALPHABET: &[(char, VoteCategory)] = &[
    ('Y', VoteCategory::Yes),
    ('P', VoteCategory::Yes),
    ('N', VoteCategory::No),
    ('X', VoteCategory::NotVoting),
];

const CATEGORIES: &[VoteCategory] = &[
    VoteCategory::Yes,
    VoteCategory::No,
    VoteCategory::NotVoting,
];

pub struct MaHouse;

impl LayoutAdapter for MaHouse {
    fn family(&self) -> &'static str {
        "ma-house"
    }

    fn chamber(&self) -> Chamber {
        Chamber::Lower
    }

    fn categories(&self) -> &'static [VoteCategory] {
        CATEGORIES
    }

    fn category_for_label(&self, label: &str) -> Option<VoteCategory> {
        TOTALS_VOCABULARY
            .iter()
            .find(|(pattern, _)| pattern.is_match(label))
            .map(|&(_, category)| category)
    }

    fn mark_alphabet(&self) -> &'static [(char, VoteCategory)] {
        MARK_ALPHABET
    }

    fn totals_vocabulary(&self) -> &'static [(Regex, VoteCategory)] {
        TOTALS_VOCABULARY.as_slice()
    }

    fn presiding_officer(&self) -> Option<&Regex> {
        Some(&PRESIDING_OFFICER)
    }

    fn is_boilerplate(&self, line: &str) -> bool {
        line.is_empty() || line == "\x0c" || line.contains('=') || line == "Yea and Nay"
    }

    fn passes(&self, counts: &BTreeMap<VoteCategory, usize>) -> bool {
        yes_over_no(counts)
    }

    fn classification_rules(&self) -> &'static [(Regex, &'static str)] {
        CLASSIFICATION_RULES.as_slice()
    }
}
