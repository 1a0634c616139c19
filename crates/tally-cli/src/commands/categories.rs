//! Category command implementation

use anyhow::Result;
use tally_core::{LedgerSnapshot, TransactionType};

pub fn cmd_categories(snapshot: &LedgerSnapshot) -> Result<()> {
    let resolver = snapshot.resolver();

    for &tx_type in TransactionType::all() {
        let title = match tx_type {
            TransactionType::Income => "💵 Income Categories",
            TransactionType::Expense => "🧾 Expense Categories",
        };

        println!();
        println!("{}", title);
        println!("   ─────────────────────────────");
        for category in resolver.categories(tx_type) {
            let origin = if category.is_base { "" } else { "  (custom)" };
            println!(
                "   {} {:18} {}{}",
                category.icon, category.name, category.id, origin
            );
        }
    }
    println!();

    Ok(())
}
