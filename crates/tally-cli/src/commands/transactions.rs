//! Transaction command implementations

use anyhow::Result;
use tally_core::LedgerSnapshot;

use super::{build_filter, transaction_row};
use crate::cli::FilterArgs;

pub fn cmd_transactions_list(
    snapshot: &LedgerSnapshot,
    filter: &FilterArgs,
    limit: usize,
) -> Result<()> {
    let filter = build_filter(filter)?;
    let mut matched = filter.apply(&snapshot.transactions);
    matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    if matched.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let total = matched.len();
    matched.truncate(limit);

    println!();
    println!("📝 Transactions ({} of {})", matched.len(), total);
    println!("   ─────────────────────────────────────────────────────────────");

    let resolver = snapshot.resolver();
    for tx in matched {
        println!("{}", transaction_row(tx, &resolver, &snapshot.currency));
    }

    Ok(())
}
