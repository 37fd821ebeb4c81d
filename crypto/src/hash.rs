//! SHA-384 transaction hashing.

use sha2::{Digest, Sha384};

/// Hash of a signed transaction's bytes, as reported by the network.
pub fn transaction_hash(signed_bytes: &[u8]) -> [u8; 48] {
    let mut output = [0u8; 48];
    output.copy_from_slice(&Sha384::digest(signed_bytes));
    output
}
