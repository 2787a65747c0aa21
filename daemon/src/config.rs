//! Daemon configuration with TOML file support.

use std::path::Path;

use anyhow::Context;
use phishblock_ledger::LedgerConfig;
use phishblock_types::Address;
use phishblock_utils::LogFormat;
use serde::{Deserialize, Serialize};

/// Configuration for the daemon: logging plus the ledger's own settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    pub ledger: LedgerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Defaults for everything except the deploying admin.
    pub fn with_admin(admin: Address) -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            ledger: LedgerConfig::new(admin),
        }
    }

    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.ledger.quorum.validate()?;
        Ok(config)
    }
}
