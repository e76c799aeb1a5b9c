//! Layout classification
//!
//! Exactly two reconstruction strategies exist. Positioned tokens
//! with a recognizable header row select the grid path; a flat line
//! stream selects the line path. Anything else is a hard rejection,
//! never a best-effort guess.

use rollcall_types::{ReconstructError, Token};

use crate::adapters::LayoutAdapter;

/// Raw page payload handed over by the upstream extractor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PagePayload {
    Tokens(Vec<Token>),
    Lines(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Grid,
    Line,
}

/// Pick the reconstruction strategy for a payload.
pub fn classify(
    adapter: &dyn LayoutAdapter,
    payload: &PagePayload,
) -> Result<Layout, ReconstructError> {
    match payload {
        PagePayload::Tokens(tokens) => {
            if tokens.iter().any(|t| adapter.is_header_label(t.text.trim())) {
                Ok(Layout::Grid)
            } else {
                Err(ReconstructError::LayoutUnrecognized(format!(
                    "no {} header labels among {} tokens",
                    adapter.family(),
                    tokens.len()
                )))
            }
        }
        PagePayload::Lines(_) => Ok(Layout::Line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::massachusetts::MaHouse;
    use crate::adapters::new_mexico::NmSenate;

    fn token(text: &str, top: i64, left: i64, width: i64) -> Token {
        Token {
            text: text.to_string(),
            top,
            left,
            width,
        }
    }

    #[test]
    fn tokens_with_header_labels_select_grid() {
        let payload = PagePayload::Tokens(vec![
            token("SENATE VOTE SHEET", 5, 10, 200),
            token("YES", 20, 100, 30),
            token("NO", 20, 140, 30),
        ]);
        assert_eq!(classify(&NmSenate, &payload), Ok(Layout::Grid));
    }

    #[test]
    fn tokens_without_header_labels_are_rejected() {
        let payload = PagePayload::Tokens(vec![token("SENATE VOTE SHEET", 5, 10, 200)]);
        assert!(matches!(
            classify(&NmSenate, &payload),
            Err(ReconstructError::LayoutUnrecognized(_))
        ));
    }

    #[test]
    fn line_stream_selects_line() {
        let payload = PagePayload::Lines(vec!["On passage of the bill".to_string()]);
        assert_eq!(classify(&MaHouse, &payload), Ok(Layout::Line));
    }

    #[test]
    fn tokens_for_a_line_only_family_are_rejected() {
        let payload = PagePayload::Tokens(vec![token("YEAS", 20, 100, 30)]);
        assert!(matches!(
            classify(&MaHouse, &payload),
            Err(ReconstructError::LayoutUnrecognized(_))
        ));
    }
}
