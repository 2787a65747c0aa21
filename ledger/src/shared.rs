//! Thread-safe ledger handle.
//!
//! All mutations go through one write lock, giving every call a single
//! total order; reads share the read lock and always see a state between
//! two whole operations.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use phishblock_types::{Address, ReportId, ReportStatus, Timestamp};

use crate::call::{Call, CallOutcome};
use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::ledger::ReportLedger;
use crate::query::{LedgerStats, ParticipantStats, TargetCheck};
use crate::report::{Report, VoteRecord};
use crate::snapshot::LedgerSnapshot;

/// Cloneable handle to a ledger behind a single serialization point.
///
/// Mutating calls are stamped with [`Timestamp::now`].
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<ReportLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: ReportLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ReportLedger>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ReportLedger>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }

    pub fn submit_report(
        &self,
        caller: &Address,
        report_type: &str,
        target: &str,
        content_ref: &str,
    ) -> Result<ReportId, LedgerError> {
        self.write()?
            .submit_report(caller, report_type, target, content_ref, Timestamp::now())
    }

    pub fn add_validator(&self, caller: &Address, validator: &Address) -> Result<bool, LedgerError> {
        self.write()?.add_validator(caller, validator)
    }

    pub fn remove_validator(
        &self,
        caller: &Address,
        validator: &Address,
    ) -> Result<bool, LedgerError> {
        self.write()?.remove_validator(caller, validator)
    }

    pub fn vote(
        &self,
        caller: &Address,
        report_id: ReportId,
        support: bool,
    ) -> Result<Option<ReportStatus>, LedgerError> {
        self.write()?
            .vote(caller, report_id, support, Timestamp::now())
    }

    pub fn apply(&self, call: &Call) -> Result<CallOutcome, LedgerError> {
        self.write()?.apply(call, Timestamp::now())
    }

    pub fn get_report(&self, report_id: ReportId) -> Result<Report, LedgerError> {
        self.read()?.get_report(report_id).cloned()
    }

    pub fn report_count(&self) -> Result<u64, LedgerError> {
        Ok(self.read()?.report_count())
    }

    pub fn is_validator(&self, address: &Address) -> Result<bool, LedgerError> {
        Ok(self.read()?.is_validator(address))
    }

    pub fn is_admin(&self, address: &Address) -> Result<bool, LedgerError> {
        Ok(self.read()?.is_admin(address))
    }

    pub fn reports(&self) -> Result<Vec<Report>, LedgerError> {
        Ok(self.read()?.reports().cloned().collect())
    }

    pub fn reports_by_status(&self, status: ReportStatus) -> Result<Vec<Report>, LedgerError> {
        Ok(self.read()?.reports_by_status(status))
    }

    pub fn reports_by_reporter(&self, reporter: &Address) -> Result<Vec<Report>, LedgerError> {
        Ok(self.read()?.reports_by_reporter(reporter))
    }

    pub fn votes_by_validator(&self, validator: &Address) -> Result<Vec<VoteRecord>, LedgerError> {
        Ok(self.read()?.votes_by_validator(validator))
    }

    pub fn validators(&self) -> Result<Vec<Address>, LedgerError> {
        Ok(self.read()?.validators())
    }

    pub fn check_target(&self, target: &str) -> Result<TargetCheck, LedgerError> {
        Ok(self.read()?.check_target(target))
    }

    pub fn stats(&self) -> Result<LedgerStats, LedgerError> {
        Ok(self.read()?.stats())
    }

    pub fn participant_stats(&self, address: &Address) -> Result<ParticipantStats, LedgerError> {
        Ok(self.read()?.participant_stats(address))
    }

    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        Ok(self.read()?.snapshot())
    }

    pub fn drain_events(&self) -> Result<Vec<LedgerEvent>, LedgerError> {
        Ok(self.write()?.drain_events())
    }
}
