//! The report ledger. Owns every report, both role registries, the vote
//! records and the ID counter.
//!
//! Each operation validates all of its preconditions before touching state,
//! so a failed call leaves the ledger exactly as it was.

use std::collections::BTreeMap;

use phishblock_types::{Address, ReportId, ReportStatus, ReportType, Timestamp};

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::quorum::QuorumPolicy;
use crate::registry::RoleRegistry;
use crate::report::{Report, VoteRecord};

/// Append-only registry of abuse reports with role-gated threshold voting.
#[derive(Debug)]
pub struct ReportLedger {
    /// Report `n` lives at index `n - 1`.
    pub(crate) reports: Vec<Report>,
    /// Highest ID allocated so far.
    pub(crate) last_id: ReportId,
    pub(crate) admins: RoleRegistry,
    pub(crate) validators: RoleRegistry,
    /// Lifetime record of who voted on what; never reset.
    pub(crate) votes: BTreeMap<(ReportId, Address), VoteRecord>,
    pub(crate) policy: QuorumPolicy,
    pending_events: Vec<LedgerEvent>,
}

impl ReportLedger {
    /// A ledger whose sole admin is the deploying identity, with the default
    /// quorum policy.
    pub fn new(admin: Address) -> Self {
        Self::from_parts(
            Vec::new(),
            ReportId::NONE,
            std::iter::once(admin).collect(),
            RoleRegistry::new(),
            BTreeMap::new(),
            QuorumPolicy::default(),
        )
    }

    /// A ledger seeded with the deploying admin and a custom quorum policy.
    pub fn with_policy(admin: Address, policy: QuorumPolicy) -> Result<Self, LedgerError> {
        policy.validate()?;
        let mut ledger = Self::new(admin);
        ledger.policy = policy;
        Ok(ledger)
    }

    /// Build a ledger from configuration: the deploying admin, any extra
    /// admins seeded at construction, and the quorum policy.
    pub fn from_config(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let mut ledger = Self::with_policy(config.admin.clone(), config.quorum)?;
        for admin in &config.extra_admins {
            ledger.admins.grant(admin.clone());
        }
        Ok(ledger)
    }

    pub(crate) fn from_parts(
        reports: Vec<Report>,
        last_id: ReportId,
        admins: RoleRegistry,
        validators: RoleRegistry,
        votes: BTreeMap<(ReportId, Address), VoteRecord>,
        policy: QuorumPolicy,
    ) -> Self {
        Self {
            reports,
            last_id,
            admins,
            validators,
            votes,
            policy,
            pending_events: Vec::new(),
        }
    }

    // ── Submission ──────────────────────────────────────────────────────

    /// File a new report. Any identity may report.
    ///
    /// `report_type` must be exactly `"URL"` or `"WALLET"`. The content
    /// reference is stored as given.
    pub fn submit_report(
        &mut self,
        caller: &Address,
        report_type: &str,
        target: &str,
        content_ref: &str,
        now: Timestamp,
    ) -> Result<ReportId, LedgerError> {
        let report_type: ReportType = report_type
            .parse()
            .map_err(|_| LedgerError::InvalidReportType(report_type.to_string()))?;
        if target.is_empty() {
            return Err(LedgerError::EmptyTarget);
        }

        let id = self.last_id.next();
        self.reports.push(Report::new(
            id,
            caller.clone(),
            report_type,
            target.to_string(),
            content_ref.to_string(),
            now,
        ));
        self.last_id = id;

        tracing::info!(report_id = %id, reporter = %caller, %report_type, "report submitted");
        self.pending_events.push(LedgerEvent::ReportSubmitted {
            report_id: id,
            reporter: caller.clone(),
            target: target.to_string(),
        });

        Ok(id)
    }

    // ── Role management ─────────────────────────────────────────────────

    /// Register a validator. Returns `true` if membership changed; adding a
    /// present validator succeeds without effect or event.
    pub fn add_validator(
        &mut self,
        caller: &Address,
        validator: &Address,
    ) -> Result<bool, LedgerError> {
        self.require_admin(caller)?;
        if !self.validators.grant(validator.clone()) {
            tracing::debug!(%validator, "validator already registered");
            return Ok(false);
        }
        tracing::info!(%validator, admin = %caller, "validator added");
        self.pending_events.push(LedgerEvent::ValidatorAdded {
            validator: validator.clone(),
        });
        Ok(true)
    }

    /// Deregister a validator. Returns `true` if membership changed. Votes
    /// already cast by the validator keep counting.
    pub fn remove_validator(
        &mut self,
        caller: &Address,
        validator: &Address,
    ) -> Result<bool, LedgerError> {
        self.require_admin(caller)?;
        if !self.validators.revoke(validator) {
            tracing::debug!(%validator, "validator was not registered");
            return Ok(false);
        }
        tracing::info!(%validator, admin = %caller, "validator removed");
        self.pending_events.push(LedgerEvent::ValidatorRemoved {
            validator: validator.clone(),
        });
        Ok(true)
    }

    // ── Voting ──────────────────────────────────────────────────────────

    /// Cast a validator's vote on a pending report.
    ///
    /// Returns the terminal status if this vote resolved the report.
    /// Checks run in order: caller is a validator, report exists, caller has
    /// not voted on it before, report is still pending.
    pub fn vote(
        &mut self,
        caller: &Address,
        report_id: ReportId,
        support: bool,
        now: Timestamp,
    ) -> Result<Option<ReportStatus>, LedgerError> {
        if !self.validators.contains(caller) {
            return Err(LedgerError::NotValidator(caller.to_string()));
        }
        let index = self.index_of(report_id)?;
        let key = (report_id, caller.clone());
        if self.votes.contains_key(&key) {
            return Err(LedgerError::AlreadyVoted {
                report_id: report_id.as_u64(),
                validator: caller.to_string(),
            });
        }
        if self.reports[index].status.is_terminal() {
            return Err(LedgerError::ReportFinalized(report_id.as_u64()));
        }

        self.votes.insert(
            key,
            VoteRecord {
                report_id,
                validator: caller.clone(),
                support,
                cast_at: now,
            },
        );
        let validator_count = self.validators.len();
        let report = &mut self.reports[index];
        if support {
            report.votes_for += 1;
        } else {
            report.votes_against += 1;
        }
        tracing::debug!(
            report_id = %report_id,
            validator = %caller,
            support,
            votes_for = report.votes_for,
            votes_against = report.votes_against,
            "vote cast"
        );
        self.pending_events.push(LedgerEvent::VoteCast {
            report_id,
            validator: caller.clone(),
            support,
        });

        let resolved = self
            .policy
            .resolve(report.votes_for, report.votes_against, validator_count);
        if let Some(status) = resolved {
            report.status = status;
            tracing::info!(report_id = %report_id, %status, "report resolved");
            self.pending_events
                .push(LedgerEvent::ReportResolved { report_id, status });
        }

        Ok(resolved)
    }

    // ── Read accessors ──────────────────────────────────────────────────

    /// Look up a report. Reports are public; no caller is needed.
    pub fn get_report(&self, report_id: ReportId) -> Result<&Report, LedgerError> {
        let index = self.index_of(report_id)?;
        Ok(&self.reports[index])
    }

    /// Total reports ever submitted (the high-water mark of the ID counter).
    pub fn report_count(&self) -> u64 {
        self.last_id.as_u64()
    }

    pub fn is_validator(&self, address: &Address) -> bool {
        self.validators.contains(address)
    }

    pub fn is_admin(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }

    /// Whether `validator` has ever voted on `report_id`.
    pub fn has_voted(&self, report_id: ReportId, validator: &Address) -> bool {
        self.votes.contains_key(&(report_id, validator.clone()))
    }

    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Current validators in address order.
    pub fn validators(&self) -> Vec<Address> {
        self.validators.iter().cloned().collect()
    }

    pub fn policy(&self) -> QuorumPolicy {
        self.policy
    }

    /// Drain queued events for observers.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn require_admin(&self, caller: &Address) -> Result<(), LedgerError> {
        if self.admins.contains(caller) {
            Ok(())
        } else {
            Err(LedgerError::NotAdmin(caller.to_string()))
        }
    }

    fn index_of(&self, report_id: ReportId) -> Result<usize, LedgerError> {
        if report_id.is_none() || report_id > self.last_id {
            return Err(LedgerError::invalid_report(report_id));
        }
        Ok((report_id.as_u64() - 1) as usize)
    }
}
