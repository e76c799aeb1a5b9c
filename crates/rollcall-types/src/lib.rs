//! Shared data model for roll-call vote reconstruction
//!
//! These types flow between the reconstruction engine and its
//! collaborators: the token/line extractor upstream and the
//! persistence layer downstream.

pub mod error;
pub mod types;

pub use error::ReconstructError;
pub use types::*;
