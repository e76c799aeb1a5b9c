//! Roll-call vote reconstruction engine
//!
//! Turns raw positioned text (or raw text lines) extracted from a
//! single vote document into a validated, structured vote tally with
//! per-legislator ballots. Two reconstruction strategies are
//! supported:
//!
//! - *Grid*: the document is a visual table; tokens carry x/y
//!   geometry and a header row of category labels. Marks are matched
//!   to the nearest header column by spatial proximity.
//! - *Line*: the document is a flat ordered line stream with section
//!   markers, walked by a finite state machine.
//!
//! Jurisdiction-specific knowledge (label patterns, mark alphabets,
//! name override tables, pass predicates) lives behind the
//! [`adapters::LayoutAdapter`] trait, one module per document family.
//!
//! The engine is a pure transformation: no I/O, no shared state
//! between documents. Fetching pages and extracting tokens from PDFs
//! belongs to upstream collaborators.

pub mod adapters;
pub mod batch;
pub mod emit;
pub mod engine;
pub mod grid;
pub mod layout;
pub mod line;
pub mod normalize;
pub mod patterns;
pub mod reconcile;

pub use batch::reconstruct_batch;
pub use engine::{ReconstructionEngine, VoteDocument};
pub use layout::{Layout, PagePayload};
