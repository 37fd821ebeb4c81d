//! Ed25519 key material as the ledger encodes it.
//!
//! Keys are exchanged as hex with an ASN.1 DER prefix: PKCS#8 for private keys,
//! SubjectPublicKeyInfo for public keys.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// PKCS#8 prefix of a DER-encoded Ed25519 private key (hex).
pub const PRIVATE_KEY_DER_PREFIX: &str = "302e020100300506032b657004220420";
/// SubjectPublicKeyInfo prefix of a DER-encoded Ed25519 public key (hex).
pub const PUBLIC_KEY_DER_PREFIX: &str = "302a300506032b6570032100";

/// Ed25519 public key. Displays as DER hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PUBLIC_KEY_DER_PREFIX}{}", hex::encode(self.0))
    }
}

/// Ed25519 private key seed, wiped on drop.
///
/// No `Debug`, `Clone` or serde: the only way out is [`PrivateKey::to_der_hex`].
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

impl PrivateKey {
    /// DER hex of the key, wiped when the returned string is dropped.
    pub fn to_der_hex(&self) -> Zeroizing<String> {
        let mut out = Zeroizing::new(String::with_capacity(PRIVATE_KEY_DER_PREFIX.len() + 64));
        out.push_str(PRIVATE_KEY_DER_PREFIX);
        out.push_str(&Zeroizing::new(hex::encode(self.0)));
        out
    }
}

/// Ed25519 signature over a transaction body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        let len = bytes.len();
        bytes
            .try_into()
            .map(Signature)
            .map_err(|_| serde::de::Error::invalid_length(len, &"64 signature bytes"))
    }
}

/// The wallet's signing key with its derived public key.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_displays_as_der() {
        let s = PublicKey([0xab; 32]).to_string();
        assert!(s.starts_with(PUBLIC_KEY_DER_PREFIX));
        assert_eq!(&s[PUBLIC_KEY_DER_PREFIX.len()..], "ab".repeat(32));
    }

    #[test]
    fn private_key_der_hex() {
        let s = PrivateKey([1; 32]).to_der_hex();
        assert_eq!(s.len(), PRIVATE_KEY_DER_PREFIX.len() + 64);
        assert!(s.starts_with(PRIVATE_KEY_DER_PREFIX));
        assert!(s.ends_with(&"01".repeat(32)));
    }

    #[test]
    fn signature_survives_bincode() {
        let sig = Signature([7u8; 64]);
        let back: Signature = bincode::deserialize(&bincode::serialize(&sig).unwrap()).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn signature_length_is_enforced() {
        let bytes = bincode::serialize(&vec![1u8; 10]).unwrap();
        assert!(bincode::deserialize::<Signature>(&bytes).is_err());
    }
}
