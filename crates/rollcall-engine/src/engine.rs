//! Engine facade
//!
//! One engine per document family, wired to that family's adapter.
//! Each call is a pure transformation of one document; nothing
//! persists between calls, so callers can fan documents out across
//! threads without coordination.

use std::collections::BTreeMap;

use rollcall_types::{ReconstructError, Token, VoteCategory, VoteRecord};

use crate::adapters::LayoutAdapter;
use crate::layout::{self, Layout, PagePayload};
use crate::reconcile::{self, ObservedTotals};
use crate::{emit, grid, line, normalize};

/// One vote document, already fetched and tokenized by upstream
/// collaborators. The bill/session resolver supplies the source URL;
/// the chamber comes from the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteDocument {
    pub source_url: String,
    pub payload: PagePayload,
}

pub struct ReconstructionEngine {
    adapter: &'static dyn LayoutAdapter,
}

impl ReconstructionEngine {
    pub fn new(adapter: &'static dyn LayoutAdapter) -> Self {
        Self { adapter }
    }

    pub fn family(&self) -> &'static str {
        self.adapter.family()
    }

    /// Reconstruct one document into a validated vote record.
    pub fn reconstruct(&self, document: &VoteDocument) -> Result<VoteRecord, ReconstructError> {
        match layout::classify(self.adapter, &document.payload)? {
            Layout::Grid => {
                let PagePayload::Tokens(tokens) = &document.payload else {
                    unreachable!("classifier only selects Grid for token payloads");
                };
                self.from_grid(document, tokens)
            }
            Layout::Line => {
                let PagePayload::Lines(lines) = &document.payload else {
                    unreachable!("classifier only selects Line for line payloads");
                };
                self.from_lines(document, lines)
            }
        }
    }

    fn from_grid(
        &self,
        document: &VoteDocument,
        tokens: &[Token],
    ) -> Result<VoteRecord, ReconstructError> {
        let extract = grid::reconstruct_grid(self.adapter, tokens)?;
        let start_date = extract.date.ok_or(ReconstructError::MissingDate)?;
        let names = self.normalize_all(extract.names_by_category);

        let observed = ObservedTotals {
            inline: None,
            table: extract.table_totals,
        };
        reconcile::reconcile(self.adapter, &names, &observed)?;

        emit::emit(
            self.adapter,
            &document.source_url,
            start_date,
            self.adapter.grid_motion().to_string(),
            None,
            &names,
        )
    }

    fn from_lines(
        &self,
        document: &VoteDocument,
        lines: &[String],
    ) -> Result<VoteRecord, ReconstructError> {
        let extract = line::parse_lines(self.adapter, lines)?;
        let start_date = extract
            .timestamp
            .map(|when| when.date())
            .ok_or(ReconstructError::MissingDate)?;
        let names = self.normalize_all(extract.names_by_category);

        let observed = ObservedTotals {
            inline: extract.inline_totals,
            table: (!extract.declared_totals.is_empty()).then_some(extract.declared_totals),
        };
        reconcile::reconcile(self.adapter, &names, &observed)?;

        emit::emit(
            self.adapter,
            &document.source_url,
            start_date,
            extract.motion_text,
            extract.vote_number,
            &names,
        )
    }

    fn normalize_all(
        &self,
        raw: BTreeMap<VoteCategory, Vec<String>>,
    ) -> BTreeMap<VoteCategory, Vec<String>> {
        raw.into_iter()
            .map(|(category, names)| {
                (
                    category,
                    names
                        .iter()
                        .map(|name| normalize::normalize_name(self.adapter, name))
                        .collect(),
                )
            })
            .collect()
    }
}
