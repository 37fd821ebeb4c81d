//! Nullable clock: deterministic time for testing.

use std::sync::Mutex;

use hbar_types::ValidStart;
use hbar_wallet_core::Clock;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Mutex<ValidStart>,
}

impl NullClock {
    pub fn new(seconds: u64, nanos: u32) -> Self {
        Self {
            current: Mutex::new(ValidStart::new(seconds, nanos)),
        }
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        let mut current = self.current.lock().unwrap();
        *current = ValidStart::new(current.seconds + secs, current.nanos);
    }

    /// Set the time to a specific value.
    pub fn set(&self, seconds: u64, nanos: u32) {
        *self.current.lock().unwrap() = ValidStart::new(seconds, nanos);
    }
}

impl Clock for NullClock {
    fn now(&self) -> ValidStart {
        *self.current.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_moves_when_told() {
        let clock = NullClock::new(100, 5);
        assert_eq!(clock.now(), ValidStart::new(100, 5));
        clock.advance(10);
        assert_eq!(clock.now(), ValidStart::new(110, 5));
        clock.set(1, 2);
        assert_eq!(clock.now(), ValidStart::new(1, 2));
    }
}
