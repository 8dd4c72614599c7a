//! Typeahead-RS: a debounced incremental search client written in Rust
//!
//! Turns a raw keystroke stream into a ranked, de-duplicated list of
//! suggestions fetched from a remote autocomplete service, while keeping
//! redundant network calls to a minimum and the displayed list consistent
//! under out-of-order responses.

pub mod autocomplete;
pub mod cache;
pub mod config;
pub mod network;
pub mod query;
pub mod results;
pub mod search;

pub use autocomplete::{FetchError, InterestBackend, SuggestBackend};
pub use config::Settings;
pub use query::Query;
pub use results::{Candidate, CandidateSet, Phase, SearchState};
pub use search::{SearchController, SearchHandle};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default trailing-edge debounce interval in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Default number of suggestions requested per lookup
pub const DEFAULT_SUGGEST_LIMIT: u32 = 100;
