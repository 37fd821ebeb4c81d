//! Host wallet framework port.

/// Callbacks into the host wallet framework.
///
/// Logging is not part of this interface; the engine emits `tracing` events and
/// the host installs whatever subscriber it wants.
pub trait EngineHost: Send + Sync {
    /// The stored balance for `currency_code` is now `balance` (tinybar string).
    fn on_balance_changed(&self, currency_code: &str, balance: &str);

    /// Startup hook, called once the engine is running.
    fn on_engine_started(&self) {}
}
