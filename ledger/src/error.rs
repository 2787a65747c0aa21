use phishblock_types::ReportId;
use thiserror::Error;

/// Every ledger failure is synchronous and leaves ledger state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("invalid report type: {0}")]
    InvalidReportType(String),

    #[error("target cannot be empty")]
    EmptyTarget,

    #[error("not an admin: {0}")]
    NotAdmin(String),

    #[error("not a validator: {0}")]
    NotValidator(String),

    #[error("invalid report ID: {0}")]
    InvalidReportId(u64),

    #[error("already voted: {validator} on report {report_id}")]
    AlreadyVoted { report_id: u64, validator: String },

    #[error("report {0} is already finalized")]
    ReportFinalized(u64),

    #[error("invalid quorum policy: {0}")]
    InvalidPolicy(String),

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,

    #[error("config error: {0}")]
    Config(String),
}

impl LedgerError {
    pub(crate) fn invalid_report(id: ReportId) -> Self {
        Self::InvalidReportId(id.as_u64())
    }
}
