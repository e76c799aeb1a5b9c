use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A unit of extracted text with its page position. Produced per page
/// by the upstream extractor and discarded once the vote record (or
/// rejection) has been produced.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub text: String,
    pub top: i64,
    pub left: i64,
    pub width: i64,
}

impl Token {
    /// Right edge of the rendered text, the coordinate used to match a
    /// cell to a header column.
    pub fn right_edge(&self) -> i64 {
        self.left + self.width
    }
}

/// The closed set of ballot outcomes. `Ord` so category maps iterate
/// deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VoteCategory {
    Yes,
    No,
    Excused,
    Absent,
    NotVoting,
    Other,
    Abstain,
}

/// A category column derived from one grid header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HeaderColumn {
    pub category: VoteCategory,
    pub right_edge: i64,
}

/// One legislator's recorded position on one vote.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Ballot {
    pub category: VoteCategory,
    pub voter_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteResult {
    Pass,
    Fail,
}

/// A fully reconstructed and reconciled roll-call vote.
///
/// Invariants enforced before emission:
/// - each voter name appears in at most one category
/// - `counts` sums to `ballots.len()`
/// - `counts` carries every category the document family can print,
///   zero-filled for categories the document did not use
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VoteRecord {
    pub chamber: Chamber,
    pub start_date: NaiveDate,
    pub motion_text: String,
    pub classification: String,
    pub result: VoteResult,
    pub counts: BTreeMap<VoteCategory, usize>,
    pub ballots: Vec<Ballot>,
    /// Roll-call number printed in journal layouts ("No. 123").
    pub vote_number: Option<u32>,
    pub source_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_right_edge() {
        let token = Token {
            text: "YES".to_string(),
            top: 10,
            left: 100,
            width: 30,
        };
        assert_eq!(token.right_edge(), 130);
    }

    #[test]
    fn category_map_iterates_in_declaration_order() {
        let mut counts = BTreeMap::new();
        counts.insert(VoteCategory::Other, 1);
        counts.insert(VoteCategory::Yes, 45);
        counts.insert(VoteCategory::No, 12);

        let order: Vec<VoteCategory> = counts.keys().copied().collect();
        assert_eq!(
            order,
            vec![VoteCategory::Yes, VoteCategory::No, VoteCategory::Other]
        );
    }

    #[test]
    fn vote_record_round_trips_through_json() {
        let record = VoteRecord {
            chamber: Chamber::Upper,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            motion_text: "senate passage".to_string(),
            classification: "passage".to_string(),
            result: VoteResult::Pass,
            counts: BTreeMap::from([(VoteCategory::Yes, 1)]),
            ballots: vec![Ballot {
                category: VoteCategory::Yes,
                voter_name: "Smith".to_string(),
            }],
            vote_number: None,
            source_url: "https://example.gov/votes/1.pdf".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: VoteRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
