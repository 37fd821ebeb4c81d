//! Daemon configuration: a TOML file with an `[engine]` table, overridden by
//! CLI flags and environment variables.

use std::path::{Path, PathBuf};

use hbar_wallet_core::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// JSON gateway that relays balance queries and submissions.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directive, e.g. `"info"` or `"info,hbar_wallet_core=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where the wallet-local data is kept between runs.
    #[serde(default)]
    pub state_file: Option<PathBuf>,

    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_gateway_url() -> String {
    "http://127.0.0.1:50211".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            state_file: None,
            engine: EngineConfig::default(),
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub gateway_url: Option<String>,
    pub log_format: Option<LogFormat>,
    pub log_level: Option<String>,
    pub state_file: Option<PathBuf>,
    pub poll_interval_ms: Option<u64>,
}

impl DaemonConfig {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.engine.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    /// The file at `path` if one was given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_toml_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.gateway_url {
            self.gateway_url = url;
        }
        if let Some(format) = overrides.log_format {
            self.log_format = format;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(path) = overrides.state_file {
            self.state_file = Some(path);
        }
        if let Some(ms) = overrides.poll_interval_ms {
            self.engine.poll_interval_ms = ms;
        }
    }
}
