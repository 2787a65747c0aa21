//! Replays a JSON-lines call log through a shared ledger.
//!
//! One [`Call`] per line; blank lines and lines starting with `#` are
//! skipped. Rejected calls are logged and counted, never fatal.

use std::io::BufRead;

use anyhow::Context;
use phishblock_ledger::{Call, LedgerEvent, SharedLedger};
use serde::Serialize;

/// Counts of what happened during a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub applied: u64,
    pub rejected: u64,
    pub events: u64,
}

pub fn replay(ledger: &SharedLedger, input: impl BufRead) -> anyhow::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let call: Call = serde_json::from_str(line)
            .with_context(|| format!("line {line_no}: malformed call"))?;

        match ledger.apply(&call) {
            Ok(outcome) => {
                summary.applied += 1;
                tracing::debug!(line = line_no, op = call.op.name(), ?outcome, "call applied");
            }
            Err(e) => {
                summary.rejected += 1;
                tracing::warn!(
                    line = line_no,
                    op = call.op.name(),
                    caller = %call.caller.short(),
                    "call rejected: {e}"
                );
            }
        }

        for event in ledger.drain_events()? {
            summary.events += 1;
            log_event(&event);
        }
    }

    Ok(summary)
}

fn log_event(event: &LedgerEvent) {
    match event {
        LedgerEvent::ReportResolved { report_id, status } => {
            tracing::info!(event = event.name(), %report_id, %status, "report resolved");
        }
        other => tracing::debug!(event = other.name(), ?other, "ledger event"),
    }
}
