//! Read-side queries mirrored by the web layer: listings, target checks,
//! and dashboard / per-user statistics.

use phishblock_types::{Address, ReportStatus};
use serde::{Deserialize, Serialize};

use crate::ledger::ReportLedger;
use crate::report::{Report, VoteRecord};

/// What the ledger knows about a URL or wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetVerdict {
    /// At least one report against the target was validated.
    Malicious,
    /// Reports exist but none is validated yet; at least one is pending.
    Suspected,
    /// No reports, or every report was rejected.
    Unknown,
}

/// Result of [`ReportLedger::check_target`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCheck {
    pub target: String,
    pub verdict: TargetVerdict,
    /// Every report filed against the target, by ID.
    pub reports: Vec<Report>,
}

impl TargetCheck {
    pub fn is_malicious(&self) -> bool {
        self.verdict == TargetVerdict::Malicious
    }
}

/// Ledger-wide counters for the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_reports: u64,
    pub pending_reports: u64,
    pub validated_reports: u64,
    pub rejected_reports: u64,
    pub validator_count: u64,
}

/// Activity of one identity as reporter and validator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub reports_submitted: u64,
    pub votes_cast: u64,
    /// Votes on reports that have since been resolved.
    pub resolved_votes: u64,
    /// Resolved votes that agreed with the final status.
    pub correct_votes: u64,
}

impl ParticipantStats {
    /// Share of resolved votes that matched the outcome, in basis points.
    pub fn accuracy_bps(&self) -> Option<u32> {
        if self.resolved_votes == 0 {
            return None;
        }
        Some((self.correct_votes * 10_000 / self.resolved_votes) as u32)
    }
}

impl ReportLedger {
    /// Iterate reports in ID order.
    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.reports.iter()
    }

    pub fn reports_by_status(&self, status: ReportStatus) -> Vec<Report> {
        self.reports
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect()
    }

    pub fn reports_by_reporter(&self, reporter: &Address) -> Vec<Report> {
        self.reports
            .iter()
            .filter(|r| &r.reporter == reporter)
            .cloned()
            .collect()
    }

    /// Every vote a validator has cast, by report ID.
    pub fn votes_by_validator(&self, validator: &Address) -> Vec<VoteRecord> {
        self.votes
            .values()
            .filter(|v| &v.validator == validator)
            .cloned()
            .collect()
    }

    /// Exact-match lookup of reports against a target.
    pub fn check_target(&self, target: &str) -> TargetCheck {
        let reports: Vec<Report> = self
            .reports
            .iter()
            .filter(|r| r.target == target)
            .cloned()
            .collect();

        let verdict = if reports.iter().any(|r| r.status == ReportStatus::Validated) {
            TargetVerdict::Malicious
        } else if reports.iter().any(Report::is_pending) {
            TargetVerdict::Suspected
        } else {
            TargetVerdict::Unknown
        };

        TargetCheck {
            target: target.to_string(),
            verdict,
            reports,
        }
    }

    pub fn stats(&self) -> LedgerStats {
        let mut stats = LedgerStats {
            total_reports: self.report_count(),
            validator_count: self.validators.len() as u64,
            ..LedgerStats::default()
        };
        for report in &self.reports {
            match report.status {
                ReportStatus::Pending => stats.pending_reports += 1,
                ReportStatus::Validated => stats.validated_reports += 1,
                ReportStatus::Rejected => stats.rejected_reports += 1,
            }
        }
        stats
    }

    pub fn participant_stats(&self, address: &Address) -> ParticipantStats {
        let mut stats = ParticipantStats {
            reports_submitted: self
                .reports
                .iter()
                .filter(|r| &r.reporter == address)
                .count() as u64,
            ..ParticipantStats::default()
        };
        for vote in self.votes.values().filter(|v| &v.validator == address) {
            stats.votes_cast += 1;
            let status = self
                .get_report(vote.report_id)
                .map(|r| r.status)
                .unwrap_or(ReportStatus::Pending);
            if let Some(agreed) = vote.agreed_with(status) {
                stats.resolved_votes += 1;
                if agreed {
                    stats.correct_votes += 1;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishblock_types::{ReportId, Timestamp};

    fn addr(s: &str) -> Address {
        Address::new(s)
    }

    /// Three reports: #1 validated, #2 rejected, #3 pending; all against
    /// the same URL except #3.
    fn populated() -> ReportLedger {
        let owner = addr("owner");
        let now = Timestamp::new(10);
        let mut ledger = ReportLedger::new(owner.clone());
        for v in ["v1", "v2", "v3", "v4"] {
            ledger.add_validator(&owner, &addr(v)).unwrap();
        }
        let alice = addr("alice");
        let bob = addr("bob");
        ledger.submit_report(&alice, "URL", "https://bad.example", "Qm1", now).unwrap();
        ledger.submit_report(&bob, "URL", "https://bad.example", "Qm2", now).unwrap();
        ledger.submit_report(&alice, "WALLET", "0xdead", "Qm3", now).unwrap();

        for v in ["v1", "v2", "v3"] {
            ledger.vote(&addr(v), ReportId::new(1), true, now).unwrap();
        }
        ledger.vote(&addr("v1"), ReportId::new(2), true, now).unwrap();
        for v in ["v2", "v3", "v4"] {
            ledger.vote(&addr(v), ReportId::new(2), false, now).unwrap();
        }
        ledger.vote(&addr("v4"), ReportId::new(3), true, now).unwrap();
        ledger
    }

    #[test]
    fn reports_filter_by_status_in_id_order() {
        let ledger = populated();
        let ids = |s| -> Vec<u64> {
            ledger
                .reports_by_status(s)
                .iter()
                .map(|r| r.id.as_u64())
                .collect()
        };
        assert_eq!(ids(ReportStatus::Validated), vec![1]);
        assert_eq!(ids(ReportStatus::Rejected), vec![2]);
        assert_eq!(ids(ReportStatus::Pending), vec![3]);
    }

    #[test]
    fn reports_filter_by_reporter() {
        let ledger = populated();
        let mine: Vec<u64> = ledger
            .reports_by_reporter(&addr("alice"))
            .iter()
            .map(|r| r.id.as_u64())
            .collect();
        assert_eq!(mine, vec![1, 3]);
        assert!(ledger.reports_by_reporter(&addr("nobody")).is_empty());
    }

    #[test]
    fn votes_by_validator_lists_history() {
        let ledger = populated();
        let votes = ledger.votes_by_validator(&addr("v1"));
        assert_eq!(votes.len(), 2);
        assert_eq!(votes[0].report_id, ReportId::new(1));
        assert!(votes[0].support);
        assert_eq!(votes[1].report_id, ReportId::new(2));
    }

    #[test]
    fn check_target_verdicts() {
        let ledger = populated();

        let bad = ledger.check_target("https://bad.example");
        assert_eq!(bad.verdict, TargetVerdict::Malicious);
        assert!(bad.is_malicious());
        assert_eq!(bad.reports.len(), 2);

        assert_eq!(ledger.check_target("0xdead").verdict, TargetVerdict::Suspected);
        assert_eq!(ledger.check_target("0xDEAD").verdict, TargetVerdict::Unknown);
        assert!(ledger.check_target("https://fine.example").reports.is_empty());
    }

    #[test]
    fn rejected_only_target_is_unknown() {
        let owner = addr("owner");
        let now = Timestamp::EPOCH;
        let mut ledger = ReportLedger::new(owner.clone());
        for v in ["v1", "v2", "v3"] {
            ledger.add_validator(&owner, &addr(v)).unwrap();
        }
        let id = ledger.submit_report(&addr("r"), "URL", "https://ok.example", "Qm", now).unwrap();
        for v in ["v1", "v2", "v3"] {
            ledger.vote(&addr(v), id, false, now).unwrap();
        }
        let check = ledger.check_target("https://ok.example");
        assert_eq!(check.verdict, TargetVerdict::Unknown);
        assert_eq!(check.reports.len(), 1);
    }

    #[test]
    fn ledger_stats_count_by_status() {
        let stats = populated().stats();
        assert_eq!(
            stats,
            LedgerStats {
                total_reports: 3,
                pending_reports: 1,
                validated_reports: 1,
                rejected_reports: 1,
                validator_count: 4,
            }
        );
    }

    #[test]
    fn participant_accuracy_counts_only_resolved_reports() {
        let ledger = populated();

        // v1: agreed on #1 (validated), disagreed on #2 (rejected).
        let v1 = ledger.participant_stats(&addr("v1"));
        assert_eq!(v1.votes_cast, 2);
        assert_eq!(v1.resolved_votes, 2);
        assert_eq!(v1.correct_votes, 1);
        assert_eq!(v1.accuracy_bps(), Some(5000));

        // v4: agreed on #2, #3 still pending.
        let v4 = ledger.participant_stats(&addr("v4"));
        assert_eq!(v4.votes_cast, 2);
        assert_eq!(v4.resolved_votes, 1);
        assert_eq!(v4.accuracy_bps(), Some(10_000));

        let alice = ledger.participant_stats(&addr("alice"));
        assert_eq!(alice.reports_submitted, 2);
        assert_eq!(alice.votes_cast, 0);
        assert_eq!(alice.accuracy_bps(), None);
    }
}
