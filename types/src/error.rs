//! Parse errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid account id: {0}")]
    InvalidAccountId(String),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("invalid transaction id: {0}")]
    InvalidTransactionId(String),
}
