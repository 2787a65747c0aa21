//! Parse errors for the shared value types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid report type: {0}")]
    InvalidReportType(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid report status: {0}")]
    InvalidReportStatus(String),
}
