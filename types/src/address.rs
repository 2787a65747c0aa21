//! Caller identity type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// An identity as supplied by the host environment (the "transaction sender").
///
/// The ledger trusts whatever identity it is handed, so construction never
/// fails. [`Address::is_valid`] and the [`FromStr`] impl check the
/// `0x` + 40 hex digit account format for callers that want it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// The standard prefix for account addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of hex digits following the prefix.
    pub const HEX_LEN: usize = 40;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this address is a well-formed `0x` account address.
    pub fn is_valid(&self) -> bool {
        match self.0.strip_prefix(Self::PREFIX) {
            Some(hex) => hex.len() == Self::HEX_LEN && hex.bytes().all(|b| b.is_ascii_hexdigit()),
            None => false,
        }
    }

    /// Shortened form for display, e.g. `0x1234...5678`.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr = Self::new(s);
        if addr.is_valid() {
            Ok(addr)
        } else {
            Err(TypesError::InvalidAddress(s.to_string()))
        }
    }
}
