//! Wall-clock source for valid-start timestamps.

use hbar_types::ValidStart;

pub trait Clock: Send + Sync {
    fn now(&self) -> ValidStart;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> ValidStart {
        ValidStart::now()
    }
}
