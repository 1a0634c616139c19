//! Tally CLI - Personal finance insights
//!
//! Usage:
//!   tally insights                    Show insights for the ledger export
//!   tally dashboard                   Balance, income, expenses, recent activity
//!   tally transactions --type expense List and filter transactions
//!   tally report velocity             Run a single analyzer
//!   tally export --format csv         Export transactions

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let snapshot = commands::load_snapshot(&cli.ledger, cli.currency.as_deref())?;

    match cli.command {
        Commands::Insights { today, json } => {
            let engine = commands::load_engine(cli.config.as_deref())?;
            let today = commands::resolve_today(today.as_deref())?;
            commands::cmd_insights(&snapshot, &engine, today, json)
        }
        Commands::Dashboard => commands::cmd_dashboard(&snapshot),
        Commands::Transactions { filter, limit } => {
            commands::cmd_transactions_list(&snapshot, &filter, limit)
        }
        Commands::Categories => commands::cmd_categories(&snapshot),
        Commands::Report { report_type } => {
            let engine = commands::load_engine(cli.config.as_deref())?;
            match report_type {
                ReportType::Recurring { today } => {
                    let today = commands::resolve_today(today.as_deref())?;
                    commands::cmd_report_recurring(&snapshot, &engine, today)
                }
                ReportType::Anomalies { today } => {
                    let today = commands::resolve_today(today.as_deref())?;
                    commands::cmd_report_anomalies(&snapshot, &engine, today)
                }
                ReportType::Velocity { today } => {
                    let today = commands::resolve_today(today.as_deref())?;
                    commands::cmd_report_velocity(&snapshot, &engine, today)
                }
                ReportType::Monthly { today } => {
                    let today = commands::resolve_today(today.as_deref())?;
                    commands::cmd_report_monthly(&snapshot, &engine, today)
                }
            }
        }
        Commands::Export {
            format,
            output,
            filter,
        } => commands::cmd_export(&snapshot, &format, output.as_deref(), &filter),
    }
}
