//! Repository configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for one index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsConfig {
    /// Engine base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Index the repository reads and writes.
    pub index: String,

    /// Per-request timeout in seconds. There is no retry at this layer;
    /// a caller abandoning a request simply lets it run to this timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:9200".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl EsConfig {
    /// Configuration for an index on the default local endpoint.
    pub fn for_index<I: Into<String>>(index: I) -> Self {
        Self {
            endpoint: default_endpoint(),
            index: index.into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
