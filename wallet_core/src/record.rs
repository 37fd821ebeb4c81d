//! Spend requests and host-visible transaction records.

use serde::{Deserialize, Serialize};

/// Block height meaning "submitted", used until real confirmation data exists.
/// Any non-zero value keeps the host from showing the record as synchronizing.
pub const SUBMITTED_BLOCK_HEIGHT: u64 = 1;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendTarget {
    pub public_address: String,
    /// Tinybar amount as a decimal string.
    #[serde(default)]
    pub native_amount: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendInfo {
    /// Defaults to the engine's currency code.
    #[serde(default)]
    pub currency_code: Option<String>,
    pub spend_targets: Vec<SpendTarget>,
    /// Replaces the default fee (tinybar decimal string).
    #[serde(default)]
    pub network_fee_override: Option<String>,
}

impl SpendInfo {
    /// A request paying `native_amount` tinybars to a single address.
    pub fn single(public_address: impl Into<String>, native_amount: impl Into<String>) -> Self {
        Self {
            currency_code: None,
            spend_targets: vec![SpendTarget {
                public_address: public_address.into(),
                native_amount: Some(native_amount.into()),
            }],
            network_fee_override: None,
        }
    }
}

/// Payload bytes and participants carried on the record between stages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherParams {
    pub from_address: String,
    pub to_address: String,
    /// Encoded unsigned `TransferBody`.
    pub transfer_tx: Vec<u8>,
    /// Encoded `SignedTransaction`; empty until signed.
    #[serde(default)]
    pub signed_tx: Vec<u8>,
    /// Hex SHA-384 of `signed_tx`, the hash the network reports for it.
    #[serde(default)]
    pub tx_hash: String,
}

/// The host-visible transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub txid: String,
    /// Milliseconds since epoch.
    pub date: u64,
    pub currency_code: String,
    /// 0 until broadcast, then [`SUBMITTED_BLOCK_HEIGHT`].
    pub block_height: u64,
    /// Signed delta to the wallet balance; negative for outgoing spends.
    pub native_amount: String,
    pub network_fee: String,
    pub our_receive_addresses: Vec<String>,
    /// Hex of the signed bytes, for hosts that show or export raw transactions.
    pub signed_tx: String,
    pub other_params: OtherParams,
}

impl TransactionRecord {
    pub fn is_signed(&self) -> bool {
        !self.other_params.signed_tx.is_empty()
    }
}
