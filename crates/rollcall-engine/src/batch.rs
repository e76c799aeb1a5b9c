//! Batch driver
//!
//! Rejection of one document is an expected outcome of the
//! reject-whole-record policy, not a reason to stop the run. Each
//! rejection is logged with its source URL and the rule that fired so
//! a reviewer can pull the document and look at it.

use rollcall_types::VoteRecord;

use crate::engine::{ReconstructionEngine, VoteDocument};

/// Reconstruct every document, skipping the ones that fail validation.
pub fn reconstruct_batch(
    engine: &ReconstructionEngine,
    documents: &[VoteDocument],
) -> Vec<VoteRecord> {
    let mut records = Vec::with_capacity(documents.len());
    for document in documents {
        match engine.reconstruct(document) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(
                    family = engine.family(),
                    url = %document.source_url,
                    error = %err,
                    "skipping vote document"
                );
            }
        }
    }
    records
}
