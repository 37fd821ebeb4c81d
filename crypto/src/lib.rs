//! Cryptographic primitives for the HBAR wallet engine.
//!
//! - **Ed25519** for transaction signing and signature verification
//! - **SHA-384** for transaction hashes, as the network computes them
//! - Private key string parsing (raw hex and DER-prefixed hex)

pub mod error;
pub mod hash;
pub mod key_string;
pub mod keys;
pub mod sign;

pub use error::CryptoError;
pub use hash::transaction_hash;
pub use key_string::parse_private_key;
pub use keys::{keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_body, verify_body};
