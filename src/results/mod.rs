//! Candidate types and ranking for suggestion results
//!
//! This module defines the wire-level candidate structures, the query-tagged
//! candidate set, the observable search state, and the pure ranking function.

mod ranking;
mod types;

pub use ranking::rank;
pub use types::*;
