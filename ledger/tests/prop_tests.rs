use proptest::prelude::*;

use phishblock_ledger::{LedgerError, QuorumPolicy, ReportLedger};
use phishblock_types::{Address, ReportId, ReportStatus, Timestamp};

fn owner() -> Address {
    Address::new("owner")
}

fn validator(i: usize) -> Address {
    Address::new(format!("v{i}"))
}

/// Ledger with `n` validators and one pending report.
fn ledger_with_validators(n: usize, policy: QuorumPolicy) -> ReportLedger {
    let mut ledger = ReportLedger::with_policy(owner(), policy).unwrap();
    for i in 0..n {
        ledger.add_validator(&owner(), &validator(i)).unwrap();
    }
    ledger
        .submit_report(&Address::new("r"), "URL", "https://x.example", "Qm", Timestamp::EPOCH)
        .unwrap();
    ledger
}

proptest! {
    /// Every valid submission bumps the count by one and gets ID = old count + 1.
    #[test]
    fn valid_submissions_allocate_sequential_ids(
        targets in prop::collection::vec("[a-z]{1,12}", 1..40),
        wallet_mask in prop::collection::vec(any::<bool>(), 40),
    ) {
        let mut ledger = ReportLedger::new(owner());
        for (i, target) in targets.iter().enumerate() {
            let before = ledger.report_count();
            let ty = if wallet_mask[i] { "WALLET" } else { "URL" };
            let id = ledger
                .submit_report(&Address::new("r"), ty, target, "", Timestamp::new(i as u64))
                .unwrap();
            prop_assert_eq!(id.as_u64(), before + 1);
            prop_assert_eq!(ledger.report_count(), before + 1);
        }
    }

    /// Report types outside {URL, WALLET} never change the count.
    #[test]
    fn invalid_types_never_change_count(ty in "[A-Za-z]{0,8}") {
        prop_assume!(ty != "URL" && ty != "WALLET");
        let mut ledger = ReportLedger::new(owner());
        let err = ledger
            .submit_report(&Address::new("r"), &ty, "https://x.example", "Qm", Timestamp::EPOCH)
            .unwrap_err();
        prop_assert_eq!(err, LedgerError::InvalidReportType(ty.clone()));
        prop_assert_eq!(ledger.report_count(), 0);
        prop_assert!(ledger.drain_events().is_empty());
    }

    /// Tallies always equal the number of successful votes of each kind,
    /// whatever order of (validator, support) attempts arrives, and a
    /// resolved status never changes afterwards.
    #[test]
    fn tallies_match_accepted_votes_and_resolution_is_final(
        attempts in prop::collection::vec((0usize..6, any::<bool>()), 0..40),
    ) {
        let mut ledger = ledger_with_validators(6, QuorumPolicy::default());
        let id = ReportId::new(1);
        let mut accepted_for = 0u32;
        let mut accepted_against = 0u32;
        let mut resolved: Option<ReportStatus> = None;

        for (v, support) in attempts {
            let before = ledger.get_report(id).unwrap().clone();
            match ledger.vote(&validator(v), id, support, Timestamp::EPOCH) {
                Ok(outcome) => {
                    prop_assert!(resolved.is_none());
                    if support { accepted_for += 1 } else { accepted_against += 1 }
                    if outcome.is_some() {
                        resolved = outcome;
                    }
                }
                Err(_) => {
                    prop_assert_eq!(ledger.get_report(id).unwrap(), &before);
                }
            }
            let report = ledger.get_report(id).unwrap();
            prop_assert_eq!(report.votes_for, accepted_for);
            prop_assert_eq!(report.votes_against, accepted_against);
            if let Some(status) = resolved {
                prop_assert_eq!(report.status, status);
            }
        }
    }

    /// The quorum function never resolves below the absolute threshold and
    /// always resolves at it.
    #[test]
    fn absolute_policy_threshold(
        threshold in 1u32..20,
        votes_for in 0u32..40,
        validators in 0usize..50,
    ) {
        let policy = QuorumPolicy::Absolute { validate_at: threshold, reject_at: None };
        let status = policy.resolve(votes_for, 0, validators);
        prop_assert_eq!(status.is_some(), votes_for >= threshold);
    }
}
