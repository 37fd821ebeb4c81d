//! Nullable host: record engine callbacks instead of driving a UI.

use std::sync::Mutex;

use hbar_wallet_core::EngineHost;

/// A host that records every callback for assertions.
#[derive(Default)]
pub struct NullHost {
    balance_changes: Mutex<Vec<(String, String)>>,
    started: Mutex<usize>,
}

impl NullHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(currency_code, balance)` notifications, oldest first.
    pub fn balance_changes(&self) -> Vec<(String, String)> {
        self.balance_changes.lock().unwrap().clone()
    }

    pub fn last_balance(&self) -> Option<String> {
        self.balance_changes
            .lock()
            .unwrap()
            .last()
            .map(|(_, b)| b.clone())
    }

    /// Number of startup hook invocations.
    pub fn start_count(&self) -> usize {
        *self.started.lock().unwrap()
    }

    /// Clear all state.
    pub fn reset(&self) {
        self.balance_changes.lock().unwrap().clear();
        *self.started.lock().unwrap() = 0;
    }
}

impl EngineHost for NullHost {
    fn on_balance_changed(&self, currency_code: &str, balance: &str) {
        self.balance_changes
            .lock()
            .unwrap()
            .push((currency_code.to_string(), balance.to_string()));
    }

    fn on_engine_started(&self) {
        *self.started.lock().unwrap() += 1;
    }
}
