//! Tinybar amounts.
//!
//! Amounts are non-negative integers in the network's smallest unit (tinybar) so no
//! floating point is ever involved. Outgoing deltas are rendered as signed strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Number of tinybars in one HBAR.
pub const TINYBARS_PER_HBAR: u64 = 100_000_000;

/// A non-negative amount of tinybars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tinybar(u64);

impl Tinybar {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Signed string form of `-self`, as used for outgoing balance deltas.
    pub fn negated(&self) -> String {
        if self.0 == 0 {
            "0".to_string()
        } else {
            format!("-{}", self.0)
        }
    }
}

impl FromStr for Tinybar {
    type Err = TypesError;

    /// Accepts plain ASCII decimal digits only: no sign, fraction or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidAmount(s.to_string()));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| TypesError::InvalidAmount(s.to_string()))
    }
}

impl From<u64> for Tinybar {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Tinybar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
