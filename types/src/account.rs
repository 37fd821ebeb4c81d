//! Ledger account identifiers (`shard.realm.num`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A ledger account, addressed by its `shard.realm.num` triple.
///
/// Public keys are not unique on the network, so the account id (not the key)
/// is the wallet's public address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId {
    pub shard: u64,
    pub realm: u64,
    pub num: u64,
}

impl AccountId {
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }

    /// Account in shard 0, realm 0.
    pub const fn from_num(num: u64) -> Self {
        Self::new(0, 0, num)
    }
}

impl FromStr for AccountId {
    type Err = TypesError;

    /// Accepts `N` (shard and realm default to 0) or `S.R.N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidAccountId(s.to_string());
        let parse = |part: &str| -> Result<u64, TypesError> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u64>().map_err(|_| invalid())
        };

        let parts: Vec<&str> = s.split('.').collect();
        match parts.as_slice() {
            [num] => Ok(Self::from_num(parse(num)?)),
            [shard, realm, num] => Ok(Self::new(parse(shard)?, parse(realm)?, parse(num)?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for AccountId {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_triple() {
        let id: AccountId = "0.0.1001".parse().unwrap();
        assert_eq!(id, AccountId::new(0, 0, 1001));
        assert_eq!(id.to_string(), "0.0.1001");
    }

    #[test]
    fn bare_number_defaults_shard_and_realm() {
        let id: AccountId = "1234".parse().unwrap();
        assert_eq!(id.to_string(), "0.0.1234");
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["", "0.0", "0.0.1.2", "a.b.c", "0..1", "-1", "0.0.1 ", "0.0.+1"] {
            assert!(bad.parse::<AccountId>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn serde_uses_string_form() {
        let id = AccountId::new(1, 2, 3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1.2.3\"");
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
