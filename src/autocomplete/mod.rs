//! Autocomplete backends for search suggestions
//!
//! Provides the remote lookup that turns a committed query into a raw
//! candidate list.

mod backends;

pub use backends::{InterestBackend, SuggestBackend};

use crate::network::HttpClient;
use crate::results::Candidate;
use thiserror::Error;
use tracing::debug;

/// A failed suggestion lookup
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network unreachable, timeout, or non-2xx status
    #[error("transport failure: {0}")]
    Transport(String),
    /// Body is not valid JSON
    #[error("parse failure: {0}")]
    Parse(String),
}

/// Fetch suggestion candidates from a backend
pub async fn fetch_suggestions(
    client: &HttpClient,
    backend: &dyn SuggestBackend,
    query: &str,
) -> Result<Vec<Candidate>, FetchError> {
    debug!("Fetching suggestions for '{}' from {}", query, backend.name());
    let candidates = backend.suggest(client, query).await?;
    debug!(
        "Backend {} returned {} candidates for '{}'",
        backend.name(),
        candidates.len(),
        query
    );
    Ok(candidates)
}
