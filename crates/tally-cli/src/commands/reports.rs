//! Report command implementations
//!
//! Each report runs one analyzer against the snapshot.

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::insights::{
    analyze_month, calculate_velocity, detect_anomalies, detect_recurring, AnalysisContext,
    CalendarWindows,
};
use tally_core::{money, InsightEngine, LedgerSnapshot};

use super::{truncate, velocity_line};

pub fn cmd_report_recurring(
    snapshot: &LedgerSnapshot,
    engine: &InsightEngine,
    today: NaiveDate,
) -> Result<()> {
    let resolver = snapshot.resolver();
    let ctx = AnalysisContext::new(&snapshot.transactions, &resolver, today, engine.config());
    let patterns: Vec<_> = detect_recurring(&ctx).collect();

    println!();
    println!("🔁 Recurring Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    if patterns.is_empty() {
        println!("   No recurring patterns detected yet.");
        return Ok(());
    }

    println!(
        "   {:24} │ {:7} │ {:>12} │ {:>5} │ {:>6} │ {}",
        "Series", "Every", "Amount", "Count", "Days", "Next"
    );
    println!("   ─────────────────────────┼─────────┼──────────────┼───────┼────────┼────────────");

    for p in &patterns {
        let tx = &p.transaction;
        let label = if tx.description.trim().is_empty() {
            resolver.display_name(tx.tx_type, &tx.category).to_string()
        } else {
            tx.description.clone()
        };
        println!(
            "   {:24} │ {:7} │ {:>12} │ {:>5} │ {:>6.1} │ {}",
            truncate(&label, 24),
            p.frequency,
            money(tx.amount, &snapshot.currency),
            p.occurrences,
            p.average_interval_days,
            p.next_date
        );
    }

    Ok(())
}

pub fn cmd_report_anomalies(
    snapshot: &LedgerSnapshot,
    engine: &InsightEngine,
    today: NaiveDate,
) -> Result<()> {
    let resolver = snapshot.resolver();
    let ctx = AnalysisContext::new(&snapshot.transactions, &resolver, today, engine.config());
    let anomalies = detect_anomalies(&ctx);

    println!();
    println!("🔍 Unusual Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    if anomalies.is_empty() {
        let cfg = engine.config();
        println!(
            "   Nothing unusual. Anomaly detection needs at least {} expenses,",
            cfg.anomaly_min_expenses
        );
        println!("   and {} in a category.", cfg.anomaly_min_category_samples);
        return Ok(());
    }

    for a in &anomalies {
        let tx = &a.transaction;
        println!(
            "   {} │ {:>12} │ {:16} │ {} ({}% above typical {})",
            tx.date,
            money(tx.amount, &snapshot.currency),
            truncate(resolver.display_name(tx.tx_type, &tx.category), 16),
            a.reason,
            a.percent_above,
            money(a.typical, &snapshot.currency)
        );
    }

    Ok(())
}

pub fn cmd_report_velocity(
    snapshot: &LedgerSnapshot,
    engine: &InsightEngine,
    today: NaiveDate,
) -> Result<()> {
    let resolver = snapshot.resolver();
    let ctx = AnalysisContext::new(&snapshot.transactions, &resolver, today, engine.config());
    let report = calculate_velocity(&ctx);
    let windows = CalendarWindows::for_day(today);
    let currency = snapshot.currency.as_str();

    println!();
    println!("🚀 Spending Velocity");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   This Week  (since {}):  {}",
        windows.week_start,
        velocity_line(&report.weekly, currency)
    );
    println!(
        "   Last Week  (since {}):  {:>12}",
        windows.previous_week_start,
        money(report.weekly.previous, currency)
    );
    println!(
        "   This Month (since {}):  {}",
        windows.month_start,
        velocity_line(&report.monthly, currency)
    );
    println!(
        "   Last Month (since {}):  {:>12}",
        windows.previous_month_start,
        money(report.monthly.previous, currency)
    );

    Ok(())
}

pub fn cmd_report_monthly(
    snapshot: &LedgerSnapshot,
    engine: &InsightEngine,
    today: NaiveDate,
) -> Result<()> {
    let resolver = snapshot.resolver();
    let ctx = AnalysisContext::new(&snapshot.transactions, &resolver, today, engine.config());
    let currency = snapshot.currency.as_str();

    println!();
    println!("📅 Monthly Analysis ({})", today.format("%B %Y"));
    println!("   ─────────────────────────────────────────────────────────────");

    let Some(analysis) = analyze_month(&ctx) else {
        println!("   No transactions yet.");
        return Ok(());
    };

    println!("   Income:        {:>12}", money(analysis.income, currency));
    println!("   Expenses:      {:>12}", money(analysis.expenses, currency));
    println!("   Balance:       {:>12}", money(analysis.balance, currency));
    println!("   Savings Rate:  {:>11.1}%", analysis.savings_rate);

    Ok(())
}
