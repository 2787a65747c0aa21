//! Report-validation ledger for PhishBlock.
//!
//! An append-only registry of abuse reports (phishing URLs and scam wallets).
//! Each report starts `Pending` and is moved to a terminal status by votes
//! from a dynamic set of validators, which admins manage:
//!
//! - **Submission**: anyone files a report against a target with an opaque
//!   evidence reference.
//! - **Roles**: admins (seeded at construction) add and remove validators.
//! - **Voting**: each validator votes at most once per report, ever. The
//!   [`QuorumPolicy`] decides when tallies resolve the report.
//!
//! The caller identity of every mutating call is supplied by the host and
//! trusted as given.

pub mod call;
pub mod config;
pub mod error;
pub mod event;
pub mod ledger;
pub mod query;
pub mod quorum;
pub mod registry;
pub mod report;
pub mod shared;
pub mod snapshot;

pub use call::{Call, CallOutcome, Operation};
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use event::LedgerEvent;
pub use ledger::ReportLedger;
pub use query::{LedgerStats, ParticipantStats, TargetCheck, TargetVerdict};
pub use quorum::{QuorumPolicy, DEFAULT_THRESHOLD};
pub use registry::RoleRegistry;
pub use report::{Report, VoteRecord};
pub use shared::SharedLedger;
pub use snapshot::LedgerSnapshot;
