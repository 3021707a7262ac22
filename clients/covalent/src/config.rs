use serde::{Deserialize, Serialize};

/// Configuration for CovalentClient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CovalentClientConfig {
    /// Covalent API key
    pub api_key: String,
    /// Base URL for API endpoints
    pub base_url: String,
}

impl CovalentClientConfig {
    /// Config pointing at the production API.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: crate::portfolio::COVALENT_API_BASE.to_string(),
        }
    }
}
