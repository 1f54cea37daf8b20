//! Tally CLI - cash-flow analytics and debt payoff planning
//!
//! Usage:
//!   tally summary --file statement.csv       Income/expense/category totals
//!   tally recurring --file statement.csv     Detect ~monthly charges
//!   tally payoff --file debts.json --extra 150 --method avalanche
//!   tally budget --file statement.csv --rules rules.toml
//!   tally report --file statement.csv --output report.txt

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Summary {
            file,
            column_map,
            json,
        } => commands::cmd_summary(&file, column_map.as_deref(), json),
        Commands::Recurring {
            file,
            column_map,
            json,
        } => commands::cmd_recurring(&file, column_map.as_deref(), json),
        Commands::Payoff {
            file,
            extra,
            method,
            schedule,
            json,
        } => commands::cmd_payoff(&file, &extra, &method, schedule, json),
        Commands::Budget {
            file,
            column_map,
            income,
            rules,
        } => commands::cmd_budget(
            &file,
            column_map.as_deref(),
            income.as_deref(),
            rules.as_deref(),
        ),
        Commands::Report {
            file,
            column_map,
            output,
        } => commands::cmd_report(&file, column_map.as_deref(), output.as_deref()),
    }
}
