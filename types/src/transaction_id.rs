//! Transaction identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::account::AccountId;
use crate::error::TypesError;
use crate::time::ValidStart;

/// A transaction id: the paying account plus the valid-start instant.
///
/// Derived purely from its two components, so the same unsigned payload always
/// maps to the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    pub account: AccountId,
    pub valid_start: ValidStart,
}

impl TransactionId {
    pub fn new(account: AccountId, valid_start: ValidStart) -> Self {
        Self {
            account,
            valid_start,
        }
    }
}

impl fmt::Display for TransactionId {
    /// `shard.realm.num@seconds.nanos`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.account, self.valid_start)
    }
}

impl FromStr for TransactionId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidTransactionId(s.to_string());
        let (account, start) = s.split_once('@').ok_or_else(invalid)?;
        let (secs, nanos) = start.split_once('.').ok_or_else(invalid)?;
        let account = account.parse().map_err(|_| invalid())?;
        let seconds = secs.parse::<u64>().map_err(|_| invalid())?;
        let nanos = nanos.parse::<u32>().map_err(|_| invalid())?;
        if nanos > 999_999_999 {
            return Err(invalid());
        }
        Ok(Self::new(account, ValidStart::new(seconds, nanos)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let id = TransactionId::new(AccountId::from_num(1001), ValidStart::new(1_700_000_000, 5));
        assert_eq!(id.to_string(), "0.0.1001@1700000000.5");
    }

    #[test]
    fn parse_display_roundtrip() {
        let id = TransactionId::new(AccountId::new(0, 1, 77), ValidStart::new(12, 345_678_901));
        assert_eq!(id.to_string().parse::<TransactionId>().unwrap(), id);
    }

    #[test]
    fn rejects_missing_separator() {
        assert!("0.0.1001".parse::<TransactionId>().is_err());
        assert!("0.0.1001@17".parse::<TransactionId>().is_err());
    }
}
