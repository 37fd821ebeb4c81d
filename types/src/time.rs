//! Valid-start timestamps.
//!
//! The network considers a transaction valid from its valid-start instant, which
//! is also half of its transaction id. It is kept as whole seconds plus a
//! nanosecond component.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Seconds + nanoseconds since the Unix epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ValidStart {
    pub seconds: u64,
    pub nanos: u32,
}

impl ValidStart {
    pub const EPOCH: Self = Self { seconds: 0, nanos: 0 };

    /// `nanos` is clamped below one second.
    pub fn new(seconds: u64, nanos: u32) -> Self {
        Self {
            seconds,
            nanos: nanos.min(999_999_999),
        }
    }

    /// Convert a system time; instants before the epoch collapse to the epoch.
    pub fn from_system_time(time: SystemTime) -> Self {
        let since = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        Self::new(since.as_secs(), since.subsec_nanos())
    }

    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Milliseconds since epoch: `seconds * 1000 + floor(nanos / 1_000_000)`.
    pub fn as_millis(&self) -> u64 {
        self.seconds
            .saturating_mul(1000)
            .saturating_add(u64::from(self.nanos / 1_000_000))
    }
}

impl fmt::Display for ValidStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.seconds, self.nanos)
    }
}
