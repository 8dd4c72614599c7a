//! Settings structures for Typeahead-RS configuration

use serde::{Deserialize, Serialize};

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: EndpointSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: EndpointSettings::default(),
            search: SearchSettings::default(),
            outgoing: OutgoingSettings::default(),
        }
    }
}

impl Settings {
    /// Create settings for a specific suggestion endpoint
    pub fn new(
        base_url: impl Into<String>,
        interest_path: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: EndpointSettings {
                base_url: base_url.into(),
                interest_path: interest_path.into(),
                token: token.into(),
            },
            ..Self::default()
        }
    }

    /// Merge with environment variables (TYPEAHEAD_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("TYPEAHEAD_BASE_URL") {
            self.endpoint.base_url = val;
        }
        if let Ok(val) = std::env::var("TYPEAHEAD_INTEREST_PATH") {
            self.endpoint.interest_path = val;
        }
        if let Ok(val) = std::env::var("TYPEAHEAD_TOKEN") {
            self.endpoint.token = val;
        }
        if let Ok(val) = std::env::var("TYPEAHEAD_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse() {
                self.search.debounce_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("TYPEAHEAD_LIMIT") {
            if let Ok(limit) = val.parse() {
                self.search.limit = limit;
            }
        }
        if let Ok(val) = std::env::var("TYPEAHEAD_REUSE_CACHED") {
            self.search.reuse_cached = val.parse().unwrap_or(true);
        }
    }
}

/// Remote suggestion service endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    /// Service base URL
    pub base_url: String,
    /// Path of the interest autocomplete resource
    pub interest_path: String,
    /// Authorization header value sent with every lookup
    pub token: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            interest_path: "/autocomplete/interests".to_string(),
            token: String::new(),
        }
    }
}

/// Search pipeline behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Trailing-edge debounce interval in milliseconds
    pub debounce_ms: u64,
    /// Maximum number of suggestions requested per lookup
    pub limit: u32,
    /// Reuse the cached candidate set for prefix-narrowing queries
    /// instead of fetching again
    pub reuse_cached: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: crate::DEFAULT_DEBOUNCE_MS,
            limit: crate::DEFAULT_SUGGEST_LIMIT,
            reuse_cached: true,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Maximum idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            pool_maxsize: 10,
            verify_ssl: true,
        }
    }
}
