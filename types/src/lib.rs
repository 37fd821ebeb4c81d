//! Fundamental types for the HBAR wallet engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account ids, tinybar amounts, valid-start timestamps, transaction ids, key material
//! and currency metadata.

pub mod account;
pub mod amount;
pub mod currency;
pub mod error;
pub mod keys;
pub mod time;
pub mod transaction_id;

pub use account::AccountId;
pub use amount::{Tinybar, TINYBARS_PER_HBAR};
pub use currency::{CurrencyInfo, Denomination, HBAR_CURRENCY_INFO};
pub use error::TypesError;
pub use keys::{
    KeyPair, PrivateKey, PublicKey, Signature, PRIVATE_KEY_DER_PREFIX, PUBLIC_KEY_DER_PREFIX,
};
pub use time::ValidStart;
pub use transaction_id::TransactionId;
