//! Parsing of private key strings.
//!
//! Accepted: raw hex (32-byte seed, or the 64-byte seed‖public form), or hex
//! with the PKCS#8 DER prefix. Rendering lives on the key types.

use hbar_types::{PrivateKey, PRIVATE_KEY_DER_PREFIX};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Parse a private key string.
///
/// Error messages never echo the key material.
pub fn parse_private_key(s: &str) -> Result<PrivateKey, CryptoError> {
    let trimmed = s.trim();
    let hex_body = trimmed
        .strip_prefix("0x")
        .unwrap_or(trimmed)
        .to_ascii_lowercase();
    let hex_body = Zeroizing::new(hex_body);
    let seed_hex = hex_body
        .strip_prefix(PRIVATE_KEY_DER_PREFIX)
        .unwrap_or(hex_body.as_str());

    let bytes = Zeroizing::new(
        hex::decode(seed_hex)
            .map_err(|_| CryptoError::InvalidPrivateKey("not a hex string".into()))?,
    );

    match bytes.len() {
        // 64 bytes is the seed followed by its public key
        32 | 64 => {
            let mut seed = [0u8; 32];
            seed.copy_from_slice(&bytes[..32]);
            let key = PrivateKey(seed);
            if bytes.len() == 64 && crate::public_from_private(&key).0[..] != bytes[32..] {
                return Err(CryptoError::InvalidPrivateKey(
                    "embedded public key does not match".into(),
                ));
            }
            Ok(key)
        }
        n => Err(CryptoError::InvalidPrivateKey(format!(
            "expected 32 or 64 key bytes, got {n}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn raw_and_der_forms_parse_to_same_key() {
        let raw = hex::encode([7u8; 32]);
        let der = format!("{PRIVATE_KEY_DER_PREFIX}{raw}");
        assert_eq!(parse_private_key(&raw).unwrap().0, [7u8; 32]);
        assert_eq!(parse_private_key(&der).unwrap().0, [7u8; 32]);
    }

    #[test]
    fn display_form_parses_back() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let s = kp.private.to_der_hex();
        assert!(s.starts_with(PRIVATE_KEY_DER_PREFIX));
        assert_eq!(parse_private_key(&s).unwrap().0, kp.private.0);
    }

    #[test]
    fn seed_with_public_key_suffix() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let combined = format!("{}{}", hex::encode(kp.private.0), hex::encode(kp.public.0));
        assert_eq!(parse_private_key(&combined).unwrap().0, kp.private.0);

        let wrong = format!("{}{}", hex::encode(kp.private.0), hex::encode([0u8; 32]));
        assert!(parse_private_key(&wrong).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_private_key("").is_err());
        assert!(parse_private_key("zz").is_err());
        assert!(parse_private_key(&hex::encode([1u8; 16])).is_err());
    }

    #[test]
    fn error_does_not_leak_key() {
        let key = hex::encode([9u8; 31]);
        let Err(err) = parse_private_key(&key) else {
            panic!("short key accepted");
        };
        assert!(!err.to_string().contains(&key));
    }
}
