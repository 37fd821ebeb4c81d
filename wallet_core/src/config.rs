//! Engine configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use hbar_types::{AccountId, Tinybar};

use crate::error::EngineError;
use crate::payload::DEFAULT_VALID_DURATION_SECS;

/// Fee charged when a spend does not override it.
pub const DEFAULT_FEE_TINYBAR: u64 = 900_000;
/// Period of the balance poll.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

/// How a built record reports the network fee to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeDisplay {
    /// `network_fee` carries the fee; `native_amount` is only the transfer amount.
    #[default]
    Separate,
    /// `network_fee` is `"0"`; the host infers the fee from balance changes.
    Inferred,
}

/// Configuration for one wallet engine.
///
/// Loaded from a TOML table via [`EngineConfig::from_toml_file`] or built
/// programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Currency code balances and records are keyed by.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Balance poll period in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Default transaction fee in tinybars.
    #[serde(default = "default_fee")]
    pub default_fee: u64,

    /// Validity window of built transactions.
    #[serde(default = "default_valid_duration_secs")]
    pub valid_duration_secs: u64,

    #[serde(default)]
    pub fee_display: FeeDisplay,

    /// Account of the node that receives and relays submissions.
    #[serde(default = "default_node_account")]
    pub node_account: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_currency_code() -> String {
    hbar_types::HBAR_CURRENCY_INFO.currency_code.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_fee() -> u64 {
    DEFAULT_FEE_TINYBAR
}

fn default_valid_duration_secs() -> u64 {
    DEFAULT_VALID_DURATION_SECS
}

fn default_node_account() -> String {
    "0.0.3".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.poll_interval_ms == 0 {
            return Err(EngineError::Config("poll_interval_ms must be positive".into()));
        }
        self.node_account().map(|_| ())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn default_fee(&self) -> Tinybar {
        Tinybar::new(self.default_fee)
    }

    pub fn node_account(&self) -> Result<AccountId, EngineError> {
        self.node_account
            .parse()
            .map_err(|e| EngineError::Config(format!("node account: {e}")))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency_code: default_currency_code(),
            poll_interval_ms: default_poll_interval_ms(),
            default_fee: default_fee(),
            valid_duration_secs: default_valid_duration_secs(),
            fee_display: FeeDisplay::default(),
            node_account: default_node_account(),
        }
    }
}
