//! Transaction body signatures.
//!
//! The ledger stores each signature next to the public key that made it, so
//! signing yields that pair. Verification is strict: small-order keys and
//! non-canonical signatures are rejected.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use hbar_types::{PrivateKey, PublicKey, Signature};

/// Sign `body` and return the `(public key, signature)` pair for a signature map.
pub fn sign_body(body: &[u8], private_key: &PrivateKey) -> (PublicKey, Signature) {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    let public = PublicKey(signing_key.verifying_key().to_bytes());
    (public, Signature(signing_key.sign(body).to_bytes()))
}

/// Check one signature-map entry over `body`.
pub fn verify_body(body: &[u8], public_key: &PublicKey, signature: &Signature) -> bool {
    VerifyingKey::from_bytes(&public_key.0)
        .and_then(|key| {
            key.verify_strict(body, &ed25519_dalek::Signature::from_bytes(&signature.0))
        })
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    const BODY: &[u8] = b"transfer 0.0.2 -> 0.0.1001";

    #[test]
    fn pair_names_the_signer() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let (public, signature) = sign_body(BODY, &kp.private);
        assert_eq!(public, kp.public);
        assert!(verify_body(BODY, &public, &signature));
    }

    #[test]
    fn tampered_body_fails() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let (public, signature) = sign_body(BODY, &kp.private);
        assert!(!verify_body(b"transfer 0.0.2 -> 0.0.1002", &public, &signature));
    }

    #[test]
    fn other_signer_fails() {
        let (_, signature) = sign_body(BODY, &keypair_from_seed(&[3u8; 32]).private);
        let other = keypair_from_seed(&[4u8; 32]).public;
        assert!(!verify_body(BODY, &other, &signature));
    }

    #[test]
    fn same_key_same_signature() {
        let kp = keypair_from_seed(&[5u8; 32]);
        assert_eq!(sign_body(BODY, &kp.private), sign_body(BODY, &kp.private));
    }

    #[test]
    fn malformed_public_key_fails() {
        let (_, signature) = sign_body(BODY, &keypair_from_seed(&[3u8; 32]).private);
        assert!(!verify_body(BODY, &PublicKey([0xFF; 32]), &signature));
        assert!(!verify_body(BODY, &PublicKey([0u8; 32]), &signature));
    }
}
