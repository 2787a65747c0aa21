//! Ledger configuration with TOML file support.

use phishblock_types::Address;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::quorum::QuorumPolicy;

/// Construction-time settings for a [`ReportLedger`](crate::ReportLedger).
///
/// Can be loaded from TOML via [`LedgerConfig::from_toml_file`] or built
/// programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The deploying identity, seeded as the first admin.
    pub admin: Address,

    /// Further admins seeded at construction. Admins cannot be changed later.
    #[serde(default)]
    pub extra_admins: Vec<Address>,

    /// When a pending report resolves.
    #[serde(default)]
    pub quorum: QuorumPolicy,
}

impl LedgerConfig {
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            extra_admins: Vec::new(),
            quorum: QuorumPolicy::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, LedgerError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LedgerError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string and check the quorum policy.
    pub fn from_toml_str(s: &str) -> Result<Self, LedgerError> {
        let config: Self = toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))?;
        config.quorum.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, LedgerError> {
        toml::to_string_pretty(self).map_err(|e| LedgerError::Config(e.to_string()))
    }
}
