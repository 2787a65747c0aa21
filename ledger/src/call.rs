//! Call envelope: a mutating operation plus the identity that sent it.
//!
//! The host authenticates the caller; the ledger takes `caller` as given.

use phishblock_types::{Address, ReportId, ReportStatus, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ledger::ReportLedger;

/// One mutating ledger operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    SubmitReport {
        report_type: String,
        target: String,
        #[serde(default)]
        content_ref: String,
    },
    AddValidator {
        validator: Address,
    },
    RemoveValidator {
        validator: Address,
    },
    Vote {
        report_id: ReportId,
        support: bool,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitReport { .. } => "submit_report",
            Self::AddValidator { .. } => "add_validator",
            Self::RemoveValidator { .. } => "remove_validator",
            Self::Vote { .. } => "vote",
        }
    }
}

/// An operation attributed to its sender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub caller: Address,
    #[serde(flatten)]
    pub op: Operation,
}

impl Call {
    pub fn new(caller: impl Into<Address>, op: Operation) -> Self {
        Self {
            caller: caller.into(),
            op,
        }
    }
}

/// What a successful call produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CallOutcome {
    ReportSubmitted { report_id: ReportId },
    /// `changed` is false when the call was an idempotent no-op.
    ValidatorsUpdated { changed: bool },
    VoteRecorded { resolved: Option<ReportStatus> },
}

impl ReportLedger {
    /// Dispatch a call to the matching operation.
    pub fn apply(&mut self, call: &Call, now: Timestamp) -> Result<CallOutcome, LedgerError> {
        let caller = &call.caller;
        match &call.op {
            Operation::SubmitReport {
                report_type,
                target,
                content_ref,
            } => self
                .submit_report(caller, report_type, target, content_ref, now)
                .map(|report_id| CallOutcome::ReportSubmitted { report_id }),
            Operation::AddValidator { validator } => self
                .add_validator(caller, validator)
                .map(|changed| CallOutcome::ValidatorsUpdated { changed }),
            Operation::RemoveValidator { validator } => self
                .remove_validator(caller, validator)
                .map(|changed| CallOutcome::ValidatorsUpdated { changed }),
            Operation::Vote { report_id, support } => self
                .vote(caller, *report_id, *support, now)
                .map(|resolved| CallOutcome::VoteRecorded { resolved }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calls_parse_from_json_lines() {
        let call: Call = serde_json::from_str(
            r#"{"caller":"0xabc","op":"submit_report","report_type":"URL","target":"https://x.example","content_ref":"Qm"}"#,
        )
        .unwrap();
        assert_eq!(call.caller, Address::new("0xabc"));
        assert_eq!(call.op.name(), "submit_report");

        let call: Call =
            serde_json::from_str(r#"{"caller":"0xv","op":"vote","report_id":1,"support":true}"#)
                .unwrap();
        assert_eq!(
            call.op,
            Operation::Vote {
                report_id: ReportId::new(1),
                support: true
            }
        );
    }

    #[test]
    fn apply_dispatches_each_operation() {
        let mut ledger = ReportLedger::new(Address::new("owner"));
        let now = Timestamp::new(1);

        let outcome = ledger
            .apply(
                &Call::new(
                    "owner",
                    Operation::AddValidator {
                        validator: Address::new("v"),
                    },
                ),
                now,
            )
            .unwrap();
        assert_eq!(outcome, CallOutcome::ValidatorsUpdated { changed: true });

        let outcome = ledger
            .apply(
                &Call::new(
                    "reporter",
                    Operation::SubmitReport {
                        report_type: "WALLET".into(),
                        target: "0xdead".into(),
                        content_ref: "Qm".into(),
                    },
                ),
                now,
            )
            .unwrap();
        assert_eq!(
            outcome,
            CallOutcome::ReportSubmitted {
                report_id: ReportId::new(1)
            }
        );

        let outcome = ledger
            .apply(
                &Call::new(
                    "v",
                    Operation::Vote {
                        report_id: ReportId::new(1),
                        support: false,
                    },
                ),
                now,
            )
            .unwrap();
        assert_eq!(outcome, CallOutcome::VoteRecorded { resolved: None });

        let err = ledger
            .apply(
                &Call::new(
                    "v",
                    Operation::RemoveValidator {
                        validator: Address::new("v"),
                    },
                ),
                now,
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotAdmin(_)));
    }
}
