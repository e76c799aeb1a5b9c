//! Name normalization
//!
//! Extracted names are noisy in well-understood ways: some sheets
//! come through with every glyph shifted by a fixed offset, a handful
//! of accented names are systematically misread, and cells carry
//! vote-code annotations and padding. Normalization is a pure, total
//! function; garbage in produces garbage out, and correctness is
//! enforced downstream by the tally reconciliation.

use crate::adapters::LayoutAdapter;
use crate::patterns;

/// Inverse of the fixed-offset glyph encoding some vote sheets use:
/// capital letters come through shifted up by 64, punctuation by 128.
/// Anything else passes through unchanged.
pub fn decode_shifted_char(c: char) -> char {
    let code = c as u32;
    // 'A'..='Z' shifted by 64 lands in 129..=154.
    if (129..=154).contains(&code) {
        return char::from_u32(code - 64).unwrap_or(c);
    }
    if code >= 128 {
        return char::from_u32(code - 128).unwrap_or(c);
    }
    c
}

/// Canonicalize one raw name: shift-decode if the family needs it,
/// apply the family's exact-match override table, then strip
/// annotations and padding.
pub fn normalize_name(adapter: &dyn LayoutAdapter, raw: &str) -> String {
    let decoded: String = if adapter.shifted_encoding() {
        raw.chars().map(decode_shifted_char).collect()
    } else {
        raw.to_string()
    };
    let decoded = decoded.trim();

    if let Some(fixed) = adapter.special_case_name(decoded) {
        return fixed.to_string();
    }
    // Exact match only. Fuzzy matching here would mask real
    // extraction failures that the reconciliation should catch.
    for (from, to) in adapter.name_overrides() {
        if *from == decoded {
            return (*to).to_string();
        }
    }

    strip_annotations(decoded)
}

/// Drop trailing vote-code annotations ("SMITH (Y)") and dash/dot
/// padding around the name. Runs to a fixpoint so stacked decoration
/// ("SMITH (Y),") comes off in one call.
pub fn strip_annotations(name: &str) -> String {
    let mut current = name.to_string();
    loop {
        let next = patterns::CODE_ANNOTATION
            .replace(current.trim_matches(is_padding), "")
            .trim_matches(is_padding)
            .to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

fn is_padding(c: char) -> bool {
    matches!(c, '-' | '.' | '*' | ',') || c.is_whitespace()
}
