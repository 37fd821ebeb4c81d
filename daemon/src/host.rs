//! Host side of the engine for a headless process.

use std::path::PathBuf;

use hbar_wallet_core::{EngineHost, WalletLocalData};

/// Reports engine callbacks as log events.
pub struct LoggingHost;

impl EngineHost for LoggingHost {
    fn on_balance_changed(&self, currency_code: &str, balance: &str) {
        tracing::info!(currency = currency_code, balance, "balance changed");
    }

    fn on_engine_started(&self) {
        tracing::info!("engine running");
    }
}

/// Wallet-local data persisted as JSON between runs.
pub struct StateFile {
    path: Option<PathBuf>,
}

impl StateFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Stored data, or `None` when no file is configured or it does not exist yet.
    pub fn load(&self) -> anyhow::Result<Option<WalletLocalData>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path)?;
        Ok(Some(WalletLocalData::from_json(&json)?))
    }

    pub fn save(&self, data: &WalletLocalData) -> anyhow::Result<()> {
        if let Some(path) = &self.path {
            std::fs::write(path, data.to_json()?)?;
            tracing::debug!(path = %path.display(), "wallet data saved");
        }
        Ok(())
    }
}
