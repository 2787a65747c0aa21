//! Ledger snapshots capture every report, registry and vote record so a
//! host can persist and later restore the ledger.
//!
//! The snapshot is a plain serde value; the byte encoding is up to the host.

use std::collections::BTreeMap;

use phishblock_types::{Address, ReportId};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ledger::ReportLedger;
use crate::quorum::QuorumPolicy;
use crate::registry::RoleRegistry;
use crate::report::{Report, VoteRecord};

/// Serializable capture of the full ledger state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Snapshot version for compatibility.
    pub version: u32,
    pub report_count: u64,
    pub reports: Vec<Report>,
    pub admins: RoleRegistry,
    pub validators: RoleRegistry,
    pub votes: Vec<VoteRecord>,
    pub policy: QuorumPolicy,
}

impl LedgerSnapshot {
    pub const CURRENT_VERSION: u32 = 1;
}

impl ReportLedger {
    /// Capture the ledger. Queued events are not part of the snapshot.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            version: LedgerSnapshot::CURRENT_VERSION,
            report_count: self.report_count(),
            reports: self.reports.clone(),
            admins: self.admins.clone(),
            validators: self.validators.clone(),
            votes: self.votes.values().cloned().collect(),
            policy: self.policy,
        }
    }

    /// Rebuild a ledger from a snapshot, checking that it is internally
    /// consistent first.
    pub fn restore(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        if snapshot.version != LedgerSnapshot::CURRENT_VERSION {
            return Err(LedgerError::CorruptSnapshot(format!(
                "unsupported version {}",
                snapshot.version
            )));
        }
        snapshot.policy.validate()?;
        if snapshot.admins.is_empty() {
            return Err(LedgerError::CorruptSnapshot("no admins".into()));
        }
        if snapshot.reports.len() as u64 != snapshot.report_count {
            return Err(LedgerError::CorruptSnapshot(format!(
                "report_count {} but {} reports",
                snapshot.report_count,
                snapshot.reports.len()
            )));
        }
        for (index, report) in snapshot.reports.iter().enumerate() {
            let expected = index as u64 + 1;
            if report.id.as_u64() != expected {
                return Err(LedgerError::CorruptSnapshot(format!(
                    "expected report #{expected}, found {}",
                    report.id
                )));
            }
        }

        let mut votes: BTreeMap<(ReportId, Address), VoteRecord> = BTreeMap::new();
        let mut tallies = vec![(0u32, 0u32); snapshot.reports.len()];
        for vote in snapshot.votes {
            let id = vote.report_id.as_u64();
            if id == 0 || id > snapshot.report_count {
                return Err(LedgerError::CorruptSnapshot(format!(
                    "vote references unknown report {}",
                    vote.report_id
                )));
            }
            let tally = &mut tallies[(id - 1) as usize];
            if vote.support {
                tally.0 += 1;
            } else {
                tally.1 += 1;
            }
            let key = (vote.report_id, vote.validator.clone());
            if votes.insert(key, vote).is_some() {
                return Err(LedgerError::CorruptSnapshot(format!(
                    "duplicate vote on report #{id}"
                )));
            }
        }
        for (report, (votes_for, votes_against)) in snapshot.reports.iter().zip(&tallies) {
            if report.votes_for != *votes_for || report.votes_against != *votes_against {
                return Err(LedgerError::CorruptSnapshot(format!(
                    "tallies of report {} do not match vote records",
                    report.id
                )));
            }
            if !snapshot.policy.admits(report.status, *votes_for, *votes_against) {
                return Err(LedgerError::CorruptSnapshot(format!(
                    "report {} is {} but its tallies are {votes_for} for, {votes_against} against",
                    report.id, report.status
                )));
            }
        }

        Ok(Self::from_parts(
            snapshot.reports,
            ReportId::new(snapshot.report_count),
            snapshot.admins,
            snapshot.validators,
            votes,
            snapshot.policy,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishblock_types::{ReportStatus, Timestamp};

    fn addr(s: &str) -> Address {
        Address::new(s)
    }

    fn sample() -> ReportLedger {
        let owner = addr("owner");
        let mut ledger = ReportLedger::new(owner.clone());
        ledger.add_validator(&owner, &addr("v1")).unwrap();
        ledger.add_validator(&owner, &addr("v2")).unwrap();
        let id = ledger
            .submit_report(&addr("r"), "URL", "https://bad.example", "Qm1", Timestamp::new(5))
            .unwrap();
        ledger.vote(&addr("v1"), id, true, Timestamp::new(6)).unwrap();
        ledger.vote(&addr("v2"), id, false, Timestamp::new(7)).unwrap();
        ledger
    }

    /// Report #1 validated by three supporting votes.
    fn resolved_sample() -> ReportLedger {
        let owner = addr("owner");
        let mut ledger = ReportLedger::new(owner.clone());
        for v in ["v1", "v2", "v3"] {
            ledger.add_validator(&owner, &addr(v)).unwrap();
        }
        let id = ledger
            .submit_report(&addr("r"), "URL", "https://bad.example", "Qm1", Timestamp::new(5))
            .unwrap();
        for v in ["v1", "v2", "v3"] {
            ledger.vote(&addr(v), id, true, Timestamp::new(6)).unwrap();
        }
        ledger
    }

    #[test]
    fn restore_preserves_state_and_vote_history() {
        let ledger = sample();
        let json = serde_json::to_string(&ledger.snapshot()).unwrap();
        let snapshot: LedgerSnapshot = serde_json::from_str(&json).unwrap();
        let mut restored = ReportLedger::restore(snapshot).unwrap();

        assert_eq!(restored.report_count(), 1);
        assert!(restored.is_admin(&addr("owner")));
        assert!(restored.is_validator(&addr("v2")));
        assert!(restored.has_voted(ReportId::new(1), &addr("v1")));
        assert_eq!(restored.get_report(ReportId::new(1)), ledger.get_report(ReportId::new(1)));

        let err = restored
            .vote(&addr("v1"), ReportId::new(1), true, Timestamp::new(8))
            .unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyVoted { .. }));

        let next = restored
            .submit_report(&addr("r"), "WALLET", "0xabc", "Qm2", Timestamp::new(9))
            .unwrap();
        assert_eq!(next, ReportId::new(2));
    }

    #[test]
    fn restore_rejects_count_mismatch() {
        let mut snapshot = sample().snapshot();
        snapshot.report_count = 5;
        assert!(matches!(
            ReportLedger::restore(snapshot),
            Err(LedgerError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn restore_rejects_tampered_tallies() {
        let mut snapshot = sample().snapshot();
        snapshot.reports[0].votes_for = 3;
        assert!(matches!(
            ReportLedger::restore(snapshot),
            Err(LedgerError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn restore_rejects_status_inconsistent_with_tallies() {
        let owner = addr("owner");
        let mut ledger = ReportLedger::new(owner.clone());
        ledger.add_validator(&owner, &addr("v1")).unwrap();
        let id = ledger
            .submit_report(&addr("r"), "URL", "https://bad.example", "Qm1", Timestamp::new(5))
            .unwrap();
        ledger.vote(&addr("v1"), id, false, Timestamp::new(6)).unwrap();

        let mut promoted = ledger.snapshot();
        promoted.reports[0].status = ReportStatus::Validated;
        assert!(matches!(
            ReportLedger::restore(promoted),
            Err(LedgerError::CorruptSnapshot(_))
        ));

        let mut demoted = resolved_sample().snapshot();
        assert_eq!(demoted.reports[0].status, ReportStatus::Validated);
        demoted.reports[0].status = ReportStatus::Pending;
        assert!(matches!(
            ReportLedger::restore(demoted),
            Err(LedgerError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn restore_accepts_resolved_reports() {
        let restored = ReportLedger::restore(resolved_sample().snapshot()).unwrap();
        assert_eq!(
            restored.get_report(ReportId::new(1)).unwrap().status,
            ReportStatus::Validated
        );
    }

    #[test]
    fn restore_rejects_duplicate_votes() {
        let mut snapshot = sample().snapshot();
        let dup = snapshot.votes[0].clone();
        snapshot.votes.push(dup);
        snapshot.reports[0].votes_for += 1;
        assert!(matches!(
            ReportLedger::restore(snapshot),
            Err(LedgerError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn restore_rejects_unknown_version() {
        let mut snapshot = sample().snapshot();
        snapshot.version = 99;
        assert!(ReportLedger::restore(snapshot).is_err());
    }
}
