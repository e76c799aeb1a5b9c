use thiserror::Error;

use crate::types::VoteCategory;

/// Per-document rejection reasons. Every variant is non-fatal to a
/// batch: the caller is expected to log the rejection and move on to
/// the next document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("no recognizable header or section structure: {0}")]
    LayoutUnrecognized(String),

    #[error("mark cell at x={0} cannot be assigned to any header column")]
    ColumnAmbiguous(i64),

    #[error("collected {marks} vote marks but {names} voter names")]
    NameListLengthMismatch { marks: usize, names: usize },

    #[error("vote mark {0:?} is not in the document family's mark alphabet")]
    UnknownVoteMark(String),

    #[error("no declared totals found to reconcile against")]
    MissingTotals,

    #[error(
        "{category:?} count mismatch: extracted {extracted}, declared {declared} \
         (tolerance {tolerance})"
    )]
    CountMismatch {
        category: VoteCategory,
        extracted: usize,
        declared: usize,
        tolerance: usize,
    },

    #[error("voter {0:?} appears in more than one category")]
    DuplicateVoter(String),

    #[error("no vote date found in the document")]
    MissingDate,
}
