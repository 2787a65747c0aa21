//! Report records and vote records.

use phishblock_types::{Address, ReportId, ReportStatus, ReportType, Timestamp};
use serde::{Deserialize, Serialize};

/// An abuse report as held by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    /// Who submitted it.
    pub reporter: Address,
    pub report_type: ReportType,
    /// The accused URL or wallet. Never empty.
    pub target: String,
    /// Opaque content-addressed reference to off-ledger evidence.
    pub content_ref: String,
    pub status: ReportStatus,
    pub votes_for: u32,
    pub votes_against: u32,
    pub created_at: Timestamp,
}

impl Report {
    pub(crate) fn new(
        id: ReportId,
        reporter: Address,
        report_type: ReportType,
        target: String,
        content_ref: String,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            reporter,
            report_type,
            target,
            content_ref,
            status: ReportStatus::Pending,
            votes_for: 0,
            votes_against: 0,
            created_at: now,
        }
    }

    pub fn total_votes(&self) -> u32 {
        self.votes_for + self.votes_against
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReportStatus::Pending
    }
}

/// A cast vote. Its existence is the source of truth for "already voted".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub report_id: ReportId,
    pub validator: Address,
    pub support: bool,
    pub cast_at: Timestamp,
}

impl VoteRecord {
    /// Whether this vote agreed with a terminal status. `None` while pending.
    pub fn agreed_with(&self, status: ReportStatus) -> Option<bool> {
        match status {
            ReportStatus::Pending => None,
            ReportStatus::Validated => Some(self.support),
            ReportStatus::Rejected => Some(!self.support),
        }
    }
}
