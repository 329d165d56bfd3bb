//! Fullnode REST response types consumed by the decoder.
//!
//! Field names here are externally dictated by the node's JSON schema
//! (`sequence_number`, `type`, `data`) and must not be renamed.

use serde::{Deserialize, Serialize};

/// A resource stored on chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// The resource type.
    #[serde(rename = "type")]
    pub typ: String,
    /// The resource data as JSON.
    pub data: serde_json::Value,
}

/// Account data from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    /// The sequence number.
    pub sequence_number: String,
    /// The authentication key.
    pub authentication_key: String,
}

impl AccountData {
    /// Returns the sequence number as u64.
    ///
    /// # Errors
    /// Returns an error if the sequence number string cannot be parsed as u64.
    pub fn sequence_number(&self) -> Result<u64, std::num::ParseIntError> {
        self.sequence_number.parse()
    }
}
