//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `categories` - Category taxonomy listing
//! - `export` - Transaction export (CSV, JSON)
//! - `insights` - Full insights view
//! - `reports` - Single-analyzer reports (recurring, anomalies, velocity, monthly)
//! - `status` - Dashboard totals and recent activity
//! - `transactions` - Filtered transaction listing

pub mod categories;
pub mod export;
pub mod insights;
pub mod reports;
pub mod status;
pub mod transactions;

// Re-export command functions for main.rs
pub use categories::*;
pub use export::*;
pub use insights::*;
pub use reports::*;
pub use status::*;
pub use transactions::*;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{InsightConfig, InsightEngine, LedgerSnapshot, TransactionFilter, TransactionType};

use crate::cli::FilterArgs;

/// Load the ledger export, applying a `--currency` override
pub fn load_snapshot(path: &Path, currency: Option<&str>) -> Result<LedgerSnapshot> {
    let mut snapshot = LedgerSnapshot::load(path)
        .with_context(|| format!("Failed to load ledger export {}", path.display()))?;

    if let Some(code) = currency.map(str::trim).filter(|c| !c.is_empty()) {
        tracing::debug!(from = %snapshot.currency, to = %code, "Overriding ledger currency");
        snapshot.currency = code.to_uppercase();
    }
    Ok(snapshot)
}

/// Build the insight engine from the resolved config
pub fn load_engine(config_path: Option<&Path>) -> Result<InsightEngine> {
    let config = InsightConfig::load(config_path).context("Failed to load insight config")?;
    Ok(InsightEngine::new(config))
}

/// Parse a YYYY-MM-DD argument
pub fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

/// `--today` if given, otherwise the local calendar date
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(value) => parse_date(value, "--today"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Turn CLI filter flags into a transaction filter
pub fn build_filter(args: &FilterArgs) -> Result<TransactionFilter<'_>> {
    let tx_type = args
        .tx_type
        .as_deref()
        .map(|t| t.parse::<TransactionType>())
        .transpose()
        .map_err(anyhow::Error::msg)?;
    let from = args.from.as_deref().map(|d| parse_date(d, "--from")).transpose()?;
    let to = args.to.as_deref().map(|d| parse_date(d, "--to")).transpose()?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            anyhow::bail!("--from ({}) is after --to ({})", from, to);
        }
    }

    Ok(TransactionFilter::new()
        .search(args.search.as_deref())
        .tx_type(tx_type)
        .category(args.category.as_deref())
        .from(from)
        .to(to))
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
