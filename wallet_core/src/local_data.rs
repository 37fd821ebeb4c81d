//! Wallet-local state shared with the host.
//!
//! The host persists this as JSON between sessions; the engine only reads and
//! writes it in memory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EngineError;

/// Sync cursors kept for the surrounding plugin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherData {
    #[serde(default)]
    pub account_sequence: u64,
    #[serde(default = "default_paging_token")]
    pub last_paging_token: String,
}

fn default_paging_token() -> String {
    "0".to_string()
}

impl Default for OtherData {
    fn default() -> Self {
        Self {
            account_sequence: 0,
            last_paging_token: default_paging_token(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletLocalData {
    /// The wallet's public address (normalized account id).
    #[serde(default)]
    pub public_key: String,
    /// Balances in tinybar strings, keyed by currency code.
    #[serde(default)]
    pub total_balances: BTreeMap<String, String>,
    #[serde(default)]
    pub other_data: OtherData,
}

impl WalletLocalData {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            ..Self::default()
        }
    }

    pub fn balance(&self, currency_code: &str) -> Option<&str> {
        self.total_balances.get(currency_code).map(String::as_str)
    }

    pub fn from_json(s: &str) -> Result<Self, EngineError> {
        serde_json::from_str(s)
            .map_err(|e| EngineError::Serialization(format!("invalid wallet local data: {e}")))
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string(self).map_err(|e| EngineError::Serialization(e.to_string()))
    }
}
