//! Export command implementation

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{export_transactions, ExportFormat, LedgerSnapshot};

use super::build_filter;
use crate::cli::FilterArgs;

pub fn cmd_export(
    snapshot: &LedgerSnapshot,
    format: &str,
    output: Option<&Path>,
    filter: &FilterArgs,
) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let filter = build_filter(filter)?;
    let selected = filter.apply(&snapshot.transactions);
    let resolver = snapshot.resolver();

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            export_transactions(&selected, &resolver, format, BufWriter::new(file))?;
            eprintln!(
                "✅ Exported {} transactions to {} ({})",
                selected.len(),
                path.display(),
                format.as_str()
            );
        }
        None => {
            export_transactions(&selected, &resolver, format, io::stdout().lock())?;
        }
    }

    Ok(())
}
