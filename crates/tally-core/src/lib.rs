//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Ledger snapshot loading from realtime-store exports
//! - Category resolution over built-in and user categories
//! - Insights engine (recurring patterns, anomalies, velocity, recommendations)
//! - Transaction filtering and CSV/JSON export
//! - Threshold configuration

pub mod categories;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod insights;
pub mod ledger;
pub mod models;

pub use categories::{CategoryResolver, UNCATEGORIZED, UNKNOWN_ICON};
pub use config::{load_config, InsightConfig};
pub use error::{Error, Result};
pub use export::{export_transactions, ExportFormat};
pub use filter::TransactionFilter;
pub use format::money;
pub use insights::{InsightEngine, Insights};
pub use ledger::LedgerSnapshot;
pub use models::{
    Category, LedgerTotals, Transaction, TransactionType, UserCategories, UserCategory,
};
