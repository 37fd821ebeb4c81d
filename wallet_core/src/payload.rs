//! Transfer payload codec.
//!
//! A transfer is carried through its lifecycle as opaque bytes on the
//! transaction record: first the unsigned [`TransferBody`], then the
//! [`SignedTransaction`] wrapping the exact body bytes that were signed.
//! Both are encoded with bincode.

use hbar_types::{AccountId, PrivateKey, PublicKey, Signature, Tinybar, TransactionId};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Seconds a transaction stays valid after its valid-start instant.
pub const DEFAULT_VALID_DURATION_SECS: u64 = 120;

/// Unsigned single-recipient transfer instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferBody {
    pub transaction_id: TransactionId,
    /// Node the transaction is submitted through (it collects the node fee).
    pub node_account: AccountId,
    /// Maximum fee the sender is willing to pay.
    pub fee: Tinybar,
    pub valid_duration_secs: u64,
    pub memo: String,
    pub sender: AccountId,
    pub recipient: AccountId,
    pub amount: Tinybar,
}

impl TransferBody {
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        bincode::deserialize(bytes)
            .map_err(|e| EngineError::Serialization(format!("invalid transfer body: {e}")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePair {
    pub public_key: PublicKey,
    pub signature: Signature,
}

/// Body bytes plus the signatures over them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub body_bytes: Vec<u8>,
    pub sig_map: Vec<SignaturePair>,
}

impl SignedTransaction {
    /// Wrap unsigned body bytes, checking that they decode.
    pub fn from_body_bytes(body_bytes: Vec<u8>) -> Result<Self, EngineError> {
        TransferBody::from_bytes(&body_bytes)?;
        Ok(Self {
            body_bytes,
            sig_map: Vec::new(),
        })
    }

    /// Add a signature by `private_key`. Signing twice with the same key is a no-op.
    pub fn sign(&mut self, private_key: &PrivateKey) {
        let public_key = hbar_crypto::public_from_private(private_key);
        if self.sig_map.iter().any(|p| p.public_key == public_key) {
            return;
        }
        let (public_key, signature) = hbar_crypto::sign_body(&self.body_bytes, private_key);
        self.sig_map.push(SignaturePair {
            public_key,
            signature,
        });
    }

    pub fn body(&self) -> Result<TransferBody, EngineError> {
        TransferBody::from_bytes(&self.body_bytes)
    }

    pub fn is_signed(&self) -> bool {
        !self.sig_map.is_empty()
    }

    /// Every signature in the map verifies over the body bytes.
    pub fn verify(&self) -> bool {
        self.is_signed()
            && self.sig_map.iter().all(|p| {
                hbar_crypto::verify_body(&self.body_bytes, &p.public_key, &p.signature)
            })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        bincode::deserialize(bytes)
            .map_err(|e| EngineError::Serialization(format!("invalid signed transaction: {e}")))
    }
}
