//! Notifications emitted for external observers.

use phishblock_types::{Address, ReportId, ReportStatus};
use serde::{Deserialize, Serialize};

/// Events queued by the ledger, in the order the operations ran.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum LedgerEvent {
    ReportSubmitted {
        report_id: ReportId,
        reporter: Address,
        target: String,
    },
    ValidatorAdded {
        validator: Address,
    },
    ValidatorRemoved {
        validator: Address,
    },
    VoteCast {
        report_id: ReportId,
        validator: Address,
        support: bool,
    },
    /// A report left `Pending`. Emitted at most once per report.
    ReportResolved {
        report_id: ReportId,
        status: ReportStatus,
    },
}

impl LedgerEvent {
    /// Event name as external observers know it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReportSubmitted { .. } => "ReportSubmitted",
            Self::ValidatorAdded { .. } => "ValidatorAdded",
            Self::ValidatorRemoved { .. } => "ValidatorRemoved",
            Self::VoteCast { .. } => "VoteCast",
            Self::ReportResolved { .. } => "ReportResolved",
        }
    }
}
