//! Application Configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_KEY: &str = "tasks";
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Tunables for the local store and the remote page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Key-value slot holding the task list
    pub storage_key: String,
    pub api_base_url: String,
    /// `_limit` passed to the remote list endpoint
    pub remote_limit: u32,
    /// Age after which cached remote data is refetched
    pub stale_time_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            remote_limit: 10,
            stale_time_ms: 60_000,
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep their defaults
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
