//! Dashboard command implementation

use anyhow::Result;
use tally_core::{money, CategoryResolver, LedgerSnapshot, Transaction};

use super::truncate;

/// Transactions listed under "Recent Transactions"
pub const DASHBOARD_RECENT: usize = 5;

pub fn cmd_dashboard(snapshot: &LedgerSnapshot) -> Result<()> {
    let totals = snapshot.totals();
    let currency = snapshot.currency.as_str();

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           💰 Tally Dashboard            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Total Balance:   {}", money(totals.balance, currency));
    println!("  Income:          {}", money(totals.income, currency));
    println!("  Expenses:        {}", money(totals.expenses, currency));
    println!("  Transactions:    {}", snapshot.transactions.len());
    println!();

    let recent = snapshot.recent(DASHBOARD_RECENT);
    if recent.is_empty() {
        println!("  No transactions yet. Add some in the app, then export the ledger.");
        return Ok(());
    }

    println!("  📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");
    let resolver = snapshot.resolver();
    for tx in recent {
        println!("{}", transaction_row(tx, &resolver, currency));
    }
    println!();

    Ok(())
}

/// One listing row: date, signed amount, category, description
pub fn transaction_row(tx: &Transaction, resolver: &CategoryResolver, currency: &str) -> String {
    let amount = money(tx.amount, currency);
    let amount_str = if tx.is_income() {
        format!("\x1b[32m+{:>12}\x1b[0m", amount) // Green for income
    } else {
        format!("\x1b[31m-{:>12}\x1b[0m", amount) // Red for expenses
    };

    format!(
        "   {} │ {} │ {} {:16} │ {}",
        tx.date,
        amount_str,
        resolver.icon_or_placeholder(tx.tx_type, &tx.category),
        truncate(resolver.display_name(tx.tx_type, &tx.category), 16),
        truncate(&tx.description, 40)
    )
}
