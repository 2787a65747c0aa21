//! PhishBlock daemon. Hosts a report ledger and drives it from call logs.

mod config;
mod replay;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use phishblock_ledger::{LedgerSnapshot, ReportLedger, SharedLedger};
use phishblock_types::{Address, Timestamp};
use phishblock_utils::LogFormat;

use crate::config::DaemonConfig;

#[derive(Parser)]
#[command(name = "phishblock-daemon", about = "PhishBlock report-validation ledger host")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "PHISHBLOCK_CONFIG")]
    config: Option<PathBuf>,

    /// Deploying admin identity (required when no config file is given).
    #[arg(long, env = "PHISHBLOCK_ADMIN")]
    admin: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "PHISHBLOCK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "PHISHBLOCK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// JSON ledger snapshot. Restored on start when it exists (taking
    /// precedence over the configured admins and quorum), written back after
    /// the command.
    #[arg(long, env = "PHISHBLOCK_STATE")]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Apply every call in a JSON-lines log, then print ledger statistics.
    Replay {
        /// File with one JSON call per line.
        calls: PathBuf,

        /// Also print every report after the replay.
        #[arg(long)]
        dump: bool,
    },
    /// Replay a call log, then report what the ledger knows about a target.
    Check {
        calls: PathBuf,
        target: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    phishblock_utils::init_logging(config.log_format, &config.log_level)
        .context("failed to initialise logging")?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let ledger = SharedLedger::new(open_ledger(&config, cli.state.as_deref())?);

    match cli.command {
        Command::Replay { calls, dump } => {
            let started = Timestamp::now();
            let summary = replay_file(&ledger, &calls)?;
            tracing::info!(
                applied = summary.applied,
                rejected = summary.rejected,
                events = summary.events,
                elapsed_secs = started.elapsed_since(Timestamp::now()),
                "replay finished"
            );
            print_json(&ledger.stats()?)?;
            if dump {
                for report in ledger.reports()? {
                    print_json(&report)?;
                }
            }
        }
        Command::Check { calls, target } => {
            replay_file(&ledger, &calls)?;
            print_json(&ledger.check_target(&target)?)?;
        }
    }

    if let Some(path) = &cli.state {
        save_state(&ledger, path)?;
    }

    Ok(())
}

fn open_ledger(config: &DaemonConfig, state: Option<&Path>) -> anyhow::Result<ReportLedger> {
    if let Some(path) = state.filter(|p| p.exists()) {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read state {}", path.display()))?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse state {}", path.display()))?;
        let ledger = ReportLedger::restore(snapshot)?;
        tracing::info!(
            reports = ledger.report_count(),
            validators = ledger.validator_count(),
            age_secs = snapshot_age(path),
            "restored ledger from {}",
            path.display()
        );
        return Ok(ledger);
    }

    let ledger = ReportLedger::from_config(&config.ledger)?;
    tracing::info!(
        admin = %config.ledger.admin,
        quorum = ?config.ledger.quorum,
        "ledger initialised"
    );
    Ok(ledger)
}

/// Seconds since the state file was last written, if the filesystem knows.
fn snapshot_age(path: &Path) -> Option<u64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let written = modified.duration_since(std::time::UNIX_EPOCH).ok()?;
    Some(Timestamp::new(written.as_secs()).elapsed_since(Timestamp::now()))
}

fn save_state(ledger: &SharedLedger, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&ledger.snapshot()?)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write state {}", path.display()))?;
    tracing::info!("saved ledger state to {}", path.display());
    Ok(())
}

/// File settings first, then CLI flags and env vars on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<DaemonConfig> {
    let mut config = match (&cli.config, &cli.admin) {
        (Some(path), _) => DaemonConfig::from_toml_file(path)?,
        (None, Some(admin)) => DaemonConfig::with_admin(Address::new(admin.as_str())),
        (None, None) => anyhow::bail!("an admin identity is required: pass --admin or --config"),
    };
    if let Some(admin) = &cli.admin {
        config.ledger.admin = Address::new(admin.as_str());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn replay_file(ledger: &SharedLedger, path: &Path) -> anyhow::Result<replay::ReplaySummary> {
    let file = File::open(path)
        .with_context(|| format!("failed to open call log {}", path.display()))?;
    replay::replay(ledger, BufReader::new(file))
        .with_context(|| format!("failed to replay {}", path.display()))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
