//! Regex tables shared across document families

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Date marker printed on grid vote sheets, e.g. "02/14/2017" or
    /// "02/14/17".
    pub static ref DATE_MARKER: Regex =
        Regex::new(r"[0-1][0-9]/[0-3][0-9]/\d+").unwrap();

    /// Roll-call identifier line in journal layouts, e.g. "No. 123".
    pub static ref VOTE_NUMBER: Regex =
        Regex::new(r"(?i)^no\.? ?(\d+)").unwrap();

    /// Totals printed inline with the motion text,
    /// e.g. "(yeas 45 - nays 10)" or "(yeas 45 to nays 10)".
    pub static ref INLINE_TOTALS: Regex =
        Regex::new(r"\(yeas\s*(\d+)\s*(?:-|to)\s*nays\.?\s*(\d+)\)").unwrap();

    /// Trailing vote-code annotation on a name cell, e.g. "SMITH (Y)".
    pub static ref CODE_ANNOTATION: Regex =
        Regex::new(r"\s*\([A-Z]\)\s*$").unwrap();
}

/// Parse a grid date marker. Sheets print either two- or four-digit
/// years depending on the session.
pub fn parse_date_marker(text: &str) -> Option<NaiveDate> {
    let raw = DATE_MARKER.find(text)?.as_str();
    let format = if raw.len() == 8 { "%m/%d/%y" } else { "%m/%d/%Y" };
    NaiveDate::parse_from_str(raw, format).ok()
}
