//! Export functionality for transactions
//!
//! Supports:
//! - CSV with resolved category names (`date,type,category,description,amount`)
//! - Pretty-printed JSON array of the raw transactions

use std::io::Write;

use crate::categories::CategoryResolver;
use crate::error::{Error, Result};
use crate::models::Transaction;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(Error::InvalidData(format!("Unknown export format: {}", s))),
        }
    }
}

const CSV_HEADER: [&str; 5] = ["date", "type", "category", "description", "amount"];

/// Write `transactions` to `writer` in the requested format
pub fn export_transactions<W: Write>(
    transactions: &[&Transaction],
    resolver: &CategoryResolver,
    format: ExportFormat,
    writer: W,
) -> Result<()> {
    match format {
        ExportFormat::Csv => export_csv(transactions, resolver, writer),
        ExportFormat::Json => export_json(transactions, writer),
    }
}

fn export_csv<W: Write>(
    transactions: &[&Transaction],
    resolver: &CategoryResolver,
    writer: W,
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    for tx in transactions {
        let date = tx.date.to_string();
        let amount = format!("{:.2}", tx.amount);
        csv.write_record([
            date.as_str(),
            tx.tx_type.as_str(),
            resolver.display_name(tx.tx_type, &tx.category),
            tx.description.as_str(),
            amount.as_str(),
        ])?;
    }

    csv.flush()?;
    tracing::debug!(count = transactions.len(), "Exported transactions as CSV");
    Ok(())
}

fn export_json<W: Write>(transactions: &[&Transaction], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, transactions)?;
    writeln!(writer)?;
    writer.flush()?;
    tracing::debug!(count = transactions.len(), "Exported transactions as JSON");
    Ok(())
}
