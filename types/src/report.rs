//! Report identifiers and the report type / status enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Sequential report identifier. IDs start at 1; `0` means "does not exist".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(u64);

impl ReportId {
    /// The sentinel "no report" ID.
    pub const NONE: Self = Self(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// The ID allocated after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ReportId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// What a report accuses: a phishing URL or a scam wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    #[serde(rename = "URL")]
    Url,
    #[serde(rename = "WALLET")]
    Wallet,
}

impl ReportType {
    /// Canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Wallet => "WALLET",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = TypesError;

    /// Case-sensitive: only `"URL"` and `"WALLET"` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "URL" => Ok(Self::Url),
            "WALLET" => Ok(Self::Wallet),
            other => Err(TypesError::InvalidReportType(other.to_string())),
        }
    }
}

/// Lifecycle status of a report.
///
/// `Pending` is the only non-terminal state; once a report is `Validated`
/// or `Rejected` its status never changes again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    Validated,
    Rejected,
}

impl ReportStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Validated => "VALIDATED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Numeric discriminant as exposed to external readers (0, 1, 2).
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Validated => 1,
            Self::Rejected => 2,
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "VALIDATED" => Ok(Self::Validated),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(TypesError::InvalidReportStatus(other.to_string())),
        }
    }
}
