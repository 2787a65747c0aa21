//! Fundamental types for the PhishBlock report ledger.
//!
//! This crate defines the value types shared by every other crate in the
//! workspace: caller identities, timestamps, report identifiers, and the
//! report type / status enums.

pub mod address;
pub mod error;
pub mod report;
pub mod time;

pub use address::Address;
pub use error::TypesError;
pub use report::{ReportId, ReportStatus, ReportType};
pub use time::Timestamp;
