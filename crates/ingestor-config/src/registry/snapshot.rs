//! Redacted, serializable view of a loaded registry

use serde::Serialize;

use crate::resolver::ValueSource;

/// Non-secret settings in clear, secrets reduced to presence and source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
    pub football_api_url: String,
    pub odds_api_url: String,
    pub mongo_host: String,
    pub mongo_url: String,
    pub betfair_data_dir: String,
    pub day_limit: u32,
    pub secrets: Vec<SecretStatus>,
}

/// Whether a credential is configured, and from where
#[derive(Debug, Clone, Serialize)]
pub struct SecretStatus {
    pub name: &'static str,
    /// False when absent or still the `NOT_SET` placeholder
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ValueSource>,
}

impl ConfigSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
