//! Ledger network port.
//!
//! The engine only needs two network operations; building, parsing and signing
//! payloads are pure and live in [`crate::payload`].

use async_trait::async_trait;
use hbar_types::{AccountId, Tinybar};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Receipt status the network reports for an accepted transaction.
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// Submission acknowledgment. Not necessarily ledger finality.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_id: String,
    pub status: String,
}

impl Receipt {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Network client for one ledger. Timeout policy belongs to the implementation.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Current balance of `account`.
    async fn account_balance(&self, account: &AccountId) -> Result<Tinybar, EngineError>;

    /// Submit signed transaction bytes and wait for the receipt.
    async fn submit(&self, signed_bytes: &[u8]) -> Result<Receipt, EngineError>;
}
