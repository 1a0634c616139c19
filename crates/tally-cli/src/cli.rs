//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tally - Personal finance insights from your ledger export
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance tracker with spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger export (JSON export of the realtime store)
    #[arg(long, default_value = "tally-export.json", global = true)]
    pub ledger: PathBuf,

    /// Insight threshold config (defaults to the user override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the ledger's display currency (e.g. EUR)
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show insights: badges, recommendations, recurring patterns and velocity
    Insights {
        /// Analyze as of this date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,

        /// Print the full insight structure as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show balance, income, expenses and recent transactions
    Dashboard,

    /// List transactions (newest first)
    Transactions {
        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// List built-in and user categories
    Categories,

    /// Run a single analyzer
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Export transactions to CSV or JSON
    Export {
        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Transaction filters shared by `transactions` and `export`
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Transaction type: income, expense
    #[arg(long = "type")]
    pub tx_type: Option<String>,

    /// Category id (e.g. food)
    #[arg(long)]
    pub category: Option<String>,

    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<String>,

    /// Search descriptions (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Weekly and monthly recurring transactions
    Recurring {
        /// Analyze as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// Unusually large expenses per category
    Anomalies {
        /// Analyze as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// This week and month against the previous ones
    Velocity {
        /// Analyze as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// Income, expenses and savings rate this month
    Monthly {
        /// Analyze as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
}
