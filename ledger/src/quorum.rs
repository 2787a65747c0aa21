//! Quorum policy: decides when a pending report leaves `Pending`.
//!
//! Resolution is a pure function of the tallies and the current validator
//! set size, kept apart from vote recording so the threshold can change
//! without touching [`ReportLedger::vote`](crate::ReportLedger::vote).

use phishblock_types::ReportStatus;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Votes needed for an absolute-count quorum.
pub const DEFAULT_THRESHOLD: u32 = 3;

const MAX_BPS: u32 = 10_000;

/// How tallies turn into a terminal status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuorumPolicy {
    /// Fixed vote counts, independent of the validator set size.
    Absolute {
        validate_at: u32,
        /// `None` disables rejection: reports then stay pending until validated.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reject_at: Option<u32>,
    },
    /// Share of the current validator set, in basis points (e.g. 6000 = 60%).
    Proportional {
        threshold_bps: u32,
        /// Apply the same threshold to votes against.
        #[serde(default)]
        symmetric: bool,
    },
}

impl Default for QuorumPolicy {
    fn default() -> Self {
        Self::Absolute {
            validate_at: DEFAULT_THRESHOLD,
            reject_at: Some(DEFAULT_THRESHOLD),
        }
    }
}

impl QuorumPolicy {
    /// Terminal status the tallies call for, or `None` to stay pending.
    ///
    /// Validation is checked before rejection.
    pub fn resolve(
        &self,
        votes_for: u32,
        votes_against: u32,
        validator_count: usize,
    ) -> Option<ReportStatus> {
        match *self {
            Self::Absolute {
                validate_at,
                reject_at,
            } => {
                if votes_for >= validate_at {
                    Some(ReportStatus::Validated)
                } else if reject_at.is_some_and(|n| votes_against >= n) {
                    Some(ReportStatus::Rejected)
                } else {
                    None
                }
            }
            Self::Proportional {
                threshold_bps,
                symmetric,
            } => {
                if validator_count == 0 {
                    return None;
                }
                let reached = |votes: u32| {
                    u64::from(votes) * u64::from(MAX_BPS)
                        >= u64::from(threshold_bps) * validator_count as u64
                };
                if reached(votes_for) {
                    Some(ReportStatus::Validated)
                } else if symmetric && reached(votes_against) {
                    Some(ReportStatus::Rejected)
                } else {
                    None
                }
            }
        }
    }

    /// Whether a report holding `status` could have reached it with these
    /// final tallies.
    ///
    /// Absolute thresholds resolve on the vote that crosses them and take no
    /// votes afterwards, so the status must be exactly what the tallies call
    /// for. Proportional thresholds depend on the validator set at the time
    /// of each vote, which is not recorded; a terminal status only needs at
    /// least one vote on its side.
    pub fn admits(&self, status: ReportStatus, votes_for: u32, votes_against: u32) -> bool {
        match *self {
            Self::Absolute { .. } => {
                let expected = self
                    .resolve(votes_for, votes_against, 0)
                    .unwrap_or(ReportStatus::Pending);
                status == expected
            }
            Self::Proportional { symmetric, .. } => match status {
                ReportStatus::Pending => true,
                ReportStatus::Validated => votes_for > 0,
                ReportStatus::Rejected => symmetric && votes_against > 0,
            },
        }
    }

    /// Reject policies that could never resolve or would resolve on zero votes.
    pub fn validate(&self) -> Result<(), LedgerError> {
        match *self {
            Self::Absolute {
                validate_at,
                reject_at,
            } => {
                if validate_at == 0 {
                    return Err(LedgerError::InvalidPolicy(
                        "validate_at must be at least 1".into(),
                    ));
                }
                if reject_at == Some(0) {
                    return Err(LedgerError::InvalidPolicy(
                        "reject_at must be at least 1".into(),
                    ));
                }
                Ok(())
            }
            Self::Proportional { threshold_bps, .. } => {
                if threshold_bps == 0 || threshold_bps > MAX_BPS {
                    return Err(LedgerError::InvalidPolicy(format!(
                        "threshold_bps must be in 1..={MAX_BPS}, got {threshold_bps}"
                    )));
                }
                Ok(())
            }
        }
    }
}
