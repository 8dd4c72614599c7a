//! Search orchestration module
//!
//! Wires the debouncer, cache gate, fetcher and ranking into one state
//! machine exposed to the UI layer.

mod controller;
mod models;

pub use controller::{SearchController, SearchHandle};
pub use models::{Effect, SearchEvent, SearchStore};
