//! Insights command implementation

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::insights::{Insights, PeriodVelocity, Trend};
use tally_core::{money, CategoryResolver, InsightEngine, LedgerSnapshot};

use super::truncate;

/// Fewer transactions than this and the insights view only shows a hint
pub const MIN_TRANSACTIONS_FOR_INSIGHTS: usize = 3;

/// Recurring patterns shown in the insights view
const MAX_PATTERNS_SHOWN: usize = 3;

pub fn cmd_insights(
    snapshot: &LedgerSnapshot,
    engine: &InsightEngine,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let insights = engine.analyze(snapshot, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!();
    println!("🧠 Insights ({})", today);
    println!("   ─────────────────────────────────────────────────────────────");

    if snapshot.transactions.len() < MIN_TRANSACTIONS_FOR_INSIGHTS {
        println!("   Add more transactions to unlock insights.");
        return Ok(());
    }

    let badges = insight_badges(&insights);
    if !badges.is_empty() {
        println!("   {}", badges.join("  "));
    }

    println!();
    println!("   RECOMMENDATIONS");
    if insights.recommendations.is_empty() {
        println!("   No specific recommendations right now. Keep up the good work!");
    }
    for rec in &insights.recommendations {
        println!("   {} {} [{}]", rec.icon, rec.title, rec.kind.as_str());
        println!("      {}", rec.message);
    }

    println!();
    println!("   PATTERNS DETECTED");
    let resolver = snapshot.resolver();
    if insights.recurring.is_empty() {
        println!("   No recurring patterns detected yet.");
    }
    for pattern in insights.recurring.iter().take(MAX_PATTERNS_SHOWN) {
        let tx = &pattern.transaction;
        println!(
            "   {} {:30} {} • {:>12}   Next: {}",
            resolver.icon_or_placeholder(tx.tx_type, &tx.category),
            truncate(&pattern_title(&resolver, tx), 30),
            pattern.frequency,
            money(tx.amount, &snapshot.currency),
            pattern.next_date
        );
    }

    println!();
    println!("   SPENDING VELOCITY");
    println!(
        "   This Week:  {}",
        velocity_line(&insights.velocity.weekly, &snapshot.currency)
    );
    println!(
        "   This Month: {}",
        velocity_line(&insights.velocity.monthly, &snapshot.currency)
    );
    println!();

    Ok(())
}

/// Summary badges: savings or overspending, weekly trend, recurring count
pub fn insight_badges(insights: &Insights) -> Vec<String> {
    let mut badges = Vec::new();

    if let Some(analysis) = &insights.analysis {
        if analysis.balance >= 0.0 {
            badges.push(format!("✅ {:.0}% Saved", analysis.savings_rate));
        } else {
            badges.push("❌ Overspending".to_string());
        }
    }

    match insights.velocity.weekly.trend {
        Trend::Up => badges.push("📈 Spending Up".to_string()),
        Trend::Down => badges.push("📉 Spending Down".to_string()),
        Trend::Stable => {}
    }

    if !insights.recurring.is_empty() {
        badges.push(format!("🔁 {} Recurring", insights.recurring.len()));
    }

    badges
}

/// Description, else category name, else "Recurring"
fn pattern_title(resolver: &CategoryResolver, tx: &tally_core::Transaction) -> String {
    if !tx.description.trim().is_empty() {
        return tx.description.clone();
    }
    resolver
        .name_or(tx.tx_type, &tx.category, "Recurring")
        .to_string()
}

pub fn velocity_line(period: &PeriodVelocity, currency: &str) -> String {
    format!(
        "{:>12}  {} {:.0}%",
        money(period.current, currency),
        period.trend.arrow(),
        period.change.abs()
    )
}
