//! Split Ledger command-line front end.
//!
//! Reads the JSON state document configured as `ledger.snapshot_path`
//! (override with `SPLITLEDGER__LEDGER__SNAPSHOT_PATH`) and prints results to
//! stdout. Logs go to stderr.
//!
//! Usage:
//!   splitledger settle [GROUP_ID]  - Who pays whom, for one group or all groups
//!   splitledger summary            - Pending groups, people and newest groups
//!   splitledger migrate            - Print the document in its current shape

mod render;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use splitledger_core::group::{Ledger, LedgerService};
use splitledger_core::snapshot;
use splitledger_shared::config::LogConfig;
use splitledger_shared::types::GroupId;
use splitledger_shared::{AppConfig, AppError, AppResult};

const USAGE: &str = "usage: splitledger <settle [GROUP_ID] | summary | migrate>";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Settle one group, or every group when no id is given.
    Settle(Option<GroupId>),
    /// Print the dashboard summary.
    Summary,
    /// Print the migrated document.
    Migrate,
}

fn parse_command<I>(args: I) -> AppResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = match args.next().as_deref() {
        Some("settle") => match args.next() {
            Some(id) => Command::Settle(Some(
                id.parse::<GroupId>()
                    .map_err(|err| AppError::Validation(format!("group id: {err}")))?,
            )),
            None => Command::Settle(None),
        },
        Some("summary") => Command::Summary,
        Some("migrate") => Command::Migrate,
        _ => return Err(AppError::Validation(USAGE.to_string())),
    };

    if args.next().is_some() {
        return Err(AppError::Validation(USAGE.to_string()));
    }
    Ok(command)
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load();
    init_tracing(config.as_ref().map(|c| &c.log).unwrap_or(&LogConfig::default()));

    let result = config
        .map_err(AppError::from)
        .context("Failed to load configuration")
        .and_then(|config| {
            let command = parse_command(std::env::args().skip(1))?;
            run(&config, command)
        });

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let app_error = err.downcast_ref::<AppError>();
            error!(
                code = app_error.map_or("INTERNAL_ERROR", AppError::error_code),
                error = %format!("{err:#}"),
                "Command failed"
            );
            ExitCode::from(app_error.map_or(1, AppError::exit_code))
        }
    }
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    if log.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn run(config: &AppConfig, command: Command) -> anyhow::Result<String> {
    let path = &config.ledger.snapshot_path;
    let ledger = load_ledger(path)?;

    match command {
        Command::Settle(Some(group_id)) => {
            let report =
                LedgerService::settle_group(&ledger, &group_id).map_err(AppError::from)?;
            Ok(render::settlement(&ledger, &report.transactions))
        }
        Command::Settle(None) => Ok(render::all_settlements(&ledger)),
        Command::Summary => Ok(render::summary(&LedgerService::dashboard(&ledger))),
        Command::Migrate => {
            let mut document = snapshot::export(&ledger).map_err(AppError::from)?;
            document.push('\n');
            Ok(document)
        }
    }
}

fn load_ledger(path: &Path) -> anyhow::Result<Ledger> {
    let json = std::fs::read_to_string(path)
        .map_err(|err| AppError::Storage(err.to_string()))
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let migration = snapshot::import(&json, Utc::now())
        .map_err(AppError::from)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    if migration.changed {
        info!(
            path = %path.display(),
            "Document uses a legacy shape; `splitledger migrate` prints the upgraded form"
        );
    }
    Ok(migration.ledger)
}
