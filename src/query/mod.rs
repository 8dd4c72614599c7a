//! Query normalization module
//!
//! A raw input string becomes a [`Query`]: trimmed, with a lowercase view
//! used for all case-insensitive matching. The empty trimmed string is the
//! distinguished "no search" state that clears results without fetching.

use serde::{Deserialize, Serialize};

/// A normalized search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Trimmed query text as typed
    text: String,
    /// Lowercase form used for matching
    normalized: String,
}

impl Query {
    /// Normalize a raw input string
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_string();
        let normalized = text.to_lowercase();
        Self { text, normalized }
    }

    /// The trimmed query text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The lowercase form used for matching
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Whether this is the distinguished "no search" state
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Case-insensitive: does `name` start with this query?
    pub fn is_prefix_of(&self, name: &str) -> bool {
        !self.is_empty() && name.to_lowercase().starts_with(&self.normalized)
    }

    /// Case-insensitive: does `name` contain this query as a substring?
    pub fn is_within(&self, name: &str) -> bool {
        !self.is_empty() && name.to_lowercase().contains(&self.normalized)
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new("")
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
