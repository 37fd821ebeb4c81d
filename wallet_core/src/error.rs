use thiserror::Error;

use hbar_crypto::CryptoError;
use hbar_types::TypesError;

/// Coarse classification of engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad spend request shape. Never retried.
    Validation,
    /// Malformed key or account at construction. The engine cannot be built.
    Key,
    /// Balance query or submission failure. Polling retries balance queries.
    Network,
    /// Payload bytes failed to encode or decode. Fatal to that spend.
    Serialization,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("only one output allowed, got {count}")]
    InvalidSpendTargets { count: usize },

    #[error("no amount specified")]
    NoAmountSpecified,

    #[error("invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("invalid fee: {0:?}")]
    InvalidFee(String),

    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("key error: {0}")]
    Key(String),

    #[error("invalid wallet type: {0}")]
    InvalidWalletType(String),

    #[error("creating new accounts is not supported")]
    AccountCreationUnsupported,

    #[error("network error: {0}")]
    Network(String),

    #[error("transaction rejected by the network: {status}")]
    Rejected { status: String },

    #[error("receipt names transaction {got}, expected {expected}")]
    ReceiptMismatch { expected: String, got: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSpendTargets { .. }
            | Self::NoAmountSpecified
            | Self::InvalidAddress(_)
            | Self::InvalidFee(_)
            | Self::UnsupportedCurrency(_)
            | Self::Config(_) => ErrorKind::Validation,
            Self::Key(_) | Self::InvalidWalletType(_) | Self::AccountCreationUnsupported => {
                ErrorKind::Key
            }
            Self::Network(_) | Self::Rejected { .. } | Self::ReceiptMismatch { .. } => {
                ErrorKind::Network
            }
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Whether repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<CryptoError> for EngineError {
    fn from(e: CryptoError) -> Self {
        Self::Key(e.to_string())
    }
}

impl From<TypesError> for EngineError {
    fn from(e: TypesError) -> Self {
        match e {
            TypesError::InvalidAmount(_) => Self::NoAmountSpecified,
            other => Self::Key(other.to_string()),
        }
    }
}

impl From<bincode::Error> for EngineError {
    fn from(e: bincode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
