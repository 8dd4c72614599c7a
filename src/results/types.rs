//! Result type definitions

use crate::query::Query;
use serde::{Deserialize, Deserializer, Serialize};

/// A single suggestion candidate as returned by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Identifier, unique within one fetch batch
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Display name, also the match target
    pub name: String,
    /// Avatar image URL; the renderer supplies a placeholder when absent
    #[serde(default)]
    pub avatar: Option<String>,
    /// Relevance score from the remote source, higher = more relevant
    #[serde(rename = "match", default)]
    pub match_score: f64,
}

impl Candidate {
    /// Create a candidate without an avatar
    pub fn new(id: impl Into<String>, name: impl Into<String>, match_score: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
            match_score,
        }
    }

    /// Add an avatar URL
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

// The service is inconsistent about numeric vs string ids.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// The full unfiltered candidate list from the most recent successful fetch,
/// tagged with the query that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    /// Query the fetch was issued for
    pub query: Query,
    /// Candidates exactly as delivered by the service
    pub candidates: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new(query: Query, candidates: Vec<Candidate>) -> Self {
        Self { query, candidates }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}

/// Pipeline phase, exposed alongside the ranked results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Empty query, nothing to show
    Idle,
    /// Keystroke received, waiting for the debounce timer
    Debouncing,
    /// Query committed, consulting the cache gate
    Deciding,
    /// Remote lookup in flight
    Fetching,
    /// Ranked results populated
    Ready,
}

/// The single source of truth exposed to the UI layer
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Current trimmed query text
    pub query: String,
    /// Ranked candidates for the current query
    pub ranked: Vec<Candidate>,
    /// Whether a remote lookup is in flight
    pub is_loading: bool,
    /// Current pipeline phase
    pub phase: Phase,
}

impl SearchState {
    /// The idle state: empty query, empty results, not loading
    pub fn idle() -> Self {
        Self {
            query: String::new(),
            ranked: Vec::new(),
            is_loading: false,
            phase: Phase::Idle,
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::idle()
    }
}
