//! Autocomplete backend implementations

use super::FetchError;
use crate::config::{EndpointSettings, Settings};
use crate::network::HttpClient;
use crate::results::Candidate;
use async_trait::async_trait;
use std::collections::HashMap;

/// Trait for suggestion backends
#[async_trait]
pub trait SuggestBackend: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Fetch candidates for a non-empty trimmed query
    async fn suggest(&self, client: &HttpClient, query: &str)
        -> Result<Vec<Candidate>, FetchError>;
}

/// The interest autocomplete service
pub struct InterestBackend {
    base_url: String,
    interest_path: String,
    token: String,
    limit: u32,
}

impl InterestBackend {
    /// Create a backend for a specific endpoint
    pub fn new(endpoint: &EndpointSettings, limit: u32) -> Self {
        Self {
            base_url: endpoint.base_url.clone(),
            interest_path: endpoint.interest_path.clone(),
            token: endpoint.token.clone(),
            limit,
        }
    }

    /// Create a backend from full settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.endpoint, settings.search.limit)
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, self.interest_path)
    }
}

#[async_trait]
impl SuggestBackend for InterestBackend {
    fn name(&self) -> &str {
        "interests"
    }

    async fn suggest(
        &self,
        client: &HttpClient,
        query: &str,
    ) -> Result<Vec<Candidate>, FetchError> {
        let mut params = HashMap::new();
        params.insert("q".to_string(), query.to_string());
        params.insert("limit".to_string(), self.limit.to_string());
        params.insert("from".to_string(), "0".to_string());

        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), self.token.clone());
        headers.insert("Accept".to_string(), "application/json".to_string());

        let response = client
            .get(&self.url(), params, headers)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(FetchError::Transport(format!(
                "unexpected status {} from {}",
                response.status, response.url
            )));
        }

        let json: serde_json::Value = serde_json::from_str(&response.text)
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        // Expected shape: {"autocomplete": [...]}; a missing or malformed
        // field means an empty list, not an error.
        let candidates = json
            .get("autocomplete")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(candidates)
    }
}
