//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - cash-flow analytics and debt payoff planning
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal cash-flow analyzer and debt payoff planner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize income, expenses, and category totals
    Summary {
        /// Transactions file: CSV, or a JSON array of raw records
        #[arg(short, long)]
        file: PathBuf,

        /// TOML file mapping CSV headers to canonical field names
        /// (e.g. "Transaction Date" = "date")
        #[arg(long)]
        column_map: Option<PathBuf>,

        /// Emit JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Detect recurring monthly charges
    Recurring {
        /// Transactions file: CSV, or a JSON array of raw records
        #[arg(short, long)]
        file: PathBuf,

        /// TOML file mapping CSV headers to canonical field names
        #[arg(long)]
        column_map: Option<PathBuf>,

        /// Emit JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Simulate a debt payoff schedule
    Payoff {
        /// Debts file: JSON array of {name, balance, apr, min_payment}
        #[arg(short, long)]
        file: PathBuf,

        /// Extra payment applied each month beyond minimums
        #[arg(short, long, default_value = "0.00")]
        extra: String,

        /// Payoff method: avalanche or snowball
        #[arg(short, long, default_value = "avalanche")]
        method: String,

        /// Print the full monthly schedule
        #[arg(long)]
        schedule: bool,

        /// Emit the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Propose a budget allocation from income and current spending
    Budget {
        /// Transactions file: CSV, or a JSON array of raw records
        #[arg(short, long)]
        file: PathBuf,

        /// TOML file mapping CSV headers to canonical field names
        #[arg(long)]
        column_map: Option<PathBuf>,

        /// Monthly net income (defaults to the file's total income)
        #[arg(long)]
        income: Option<String>,

        /// TOML file with [[rule]] entries (category, share); defaults
        /// to the 50/30/20 model
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Render a plain-text financial report
    Report {
        /// Transactions file: CSV, or a JSON array of raw records
        #[arg(short, long)]
        file: PathBuf,

        /// TOML file mapping CSV headers to canonical field names
        #[arg(long)]
        column_map: Option<PathBuf>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
