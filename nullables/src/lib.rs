//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the engine (clock, ledger network, host wallet)
//! sits behind a trait. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod host;
pub mod ledger;

pub use clock::NullClock;
pub use host::NullHost;
pub use ledger::NullLedger;
