//! New Mexico vote sheets
//!
//! Both chambers publish one grid PDF per roll call. The house sheet
//! headers are YEA/NAY/EXCUSED/ABSENT and the table ends at the
//! "CERTIFIED CORRECT" footer; the senate sheet headers are
//! YES/NO/ABS/EXC/REC and the table ends at the TOTAL row. Senate
//! sheets additionally come through the extractor with shift-encoded
//! glyphs (see [`crate::normalize`]).

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use rollcall_types::{Chamber, VoteCategory};

use super::{category_by_initial, yes_over_no, LayoutAdapter};

lazy_static! {
    /// House header labels. The original sheets also print "YEAS"
    /// (totals row) and "EXCUSED:"/"ABSENT:" summary lines, which are
    /// not headers; `is_header_label` filters those out.
    static ref HOUSE_HEADER: Regex =
        Regex::new(r"^(YEA|NAY|EXCUSED|ABSENT)").unwrap();

    static ref SENATE_HEADER: Regex =
        Regex::new(r"^(YES|NO|ABS|EXC|REC)\b").unwrap();
}

/// Names the PDF extractor systematically misreads: accented
/// characters are lost and come through as "q" glyphs. Exact match
/// only, so a genuinely new extraction failure surfaces downstream
/// instead of being papered over.
const NAME_OVERRIDES: &[(&str, &str)] = &[
    ("ONEILL", "O'NEILL"),
    ("Larraqaga", "Larrañaga"),
    ("Salazar, Tomas", "Salazar, Tomás"),
    ("Sariqana", "Sariñana"),
    ("MUQOZ", "MUÑOZ"),
];

const CATEGORIES: &[VoteCategory] = &[
    VoteCategory::Yes,
    VoteCategory::No,
    VoteCategory::Excused,
    VoteCategory::Absent,
    VoteCategory::Other,
];

pub struct NmHouse;

impl LayoutAdapter for NmHouse {
    fn family(&self) -> &'static str {
        "nm-house"
    }

    fn chamber(&self) -> Chamber {
        Chamber::Lower
    }

    fn categories(&self) -> &'static [VoteCategory] {
        CATEGORIES
    }

    fn header_labels(&self) -> Option<&Regex> {
        Some(&HOUSE_HEADER)
    }

    fn is_header_label(&self, text: &str) -> bool {
        HOUSE_HEADER.is_match(text)
            && !text.starts_with("YEAS")
            && !text.starts_with("NAYS")
            && !text.contains(':')
    }

    fn category_for_label(&self, label: &str) -> Option<VoteCategory> {
        category_by_initial(label)
    }

    fn table_stop(&self) -> &'static str {
        "CERTIFIED CORRECT"
    }

    fn totals_marker(&self) -> &'static str {
        "YEAS"
    }

    fn name_overrides(&self) -> &'static [(&'static str, &'static str)] {
        NAME_OVERRIDES
    }

    fn grid_motion(&self) -> &'static str {
        "house passage"
    }

    fn passes(&self, counts: &BTreeMap<VoteCategory, usize>) -> bool {
        yes_over_no(counts)
    }
}

pub struct NmSenate;

impl LayoutAdapter for NmSenate {
    fn family(&self) -> &'static str {
        "nm-senate"
    }

    fn chamber(&self) -> Chamber {
        Chamber::Upper
    }

    fn categories(&self) -> &'static [VoteCategory] {
        CATEGORIES
    }

    fn header_labels(&self) -> Option<&Regex> {
        Some(&SENATE_HEADER)
    }

    fn category_for_label(&self, label: &str) -> Option<VoteCategory> {
        category_by_initial(label)
    }

    fn name_overrides(&self) -> &'static [(&'static str, &'static str)] {
        NAME_OVERRIDES
    }

    fn special_case_name(&self, name: &str) -> Option<&'static str> {
        // The lieutenant governor presides and is printed with
        // whatever abbreviation fit that day's sheet; exact-match
        // overrides cannot keep up.
        if name.contains("LT. GOV") {
            Some("LT. GOVERNOR")
        } else {
            None
        }
    }

    fn shifted_encoding(&self) -> bool {
        true
    }

    fn grid_motion(&self) -> &'static str {
        "senate passage"
    }

    fn passes(&self, counts: &BTreeMap<VoteCategory, usize>) -> bool {
        yes_over_no(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_headers_exclude_totals_and_summary_labels() {
        let adapter = NmHouse;
        assert!(adapter.is_header_label("YEA"));
        assert!(adapter.is_header_label("NAY"));
        assert!(adapter.is_header_label("EXCUSED"));
        assert!(adapter.is_header_label("ABSENT"));

        assert!(!adapter.is_header_label("YEAS: 37"));
        assert!(!adapter.is_header_label("NAYS: 28"));
        assert!(!adapter.is_header_label("EXCUSED: 3"));
        assert!(!adapter.is_header_label("SMITH"));
    }

    #[test]
    fn senate_headers_map_to_categories() {
        let adapter = NmSenate;
        for (label, category) in [
            ("YES", VoteCategory::Yes),
            ("NO", VoteCategory::No),
            ("ABS", VoteCategory::Absent),
            ("EXC", VoteCategory::Excused),
            ("REC", VoteCategory::Other),
        ] {
            assert!(adapter.is_header_label(label), "{label}");
            assert_eq!(adapter.category_for_label(label), Some(category));
        }
    }

    #[test]
    fn lt_governor_special_case() {
        let adapter = NmSenate;
        assert_eq!(
            adapter.special_case_name("LT. GOV J. DOE"),
            Some("LT. GOVERNOR")
        );
        assert_eq!(adapter.special_case_name("MUQOZ"), None);
    }
}
