//! Current calendar month income, expenses and savings rate

use chrono::Datelike;

use crate::models::LedgerTotals;

use super::engine::AnalysisContext;
use super::types::MonthlyAnalysis;

/// Analyze the calendar month containing `ctx.today`.
///
/// Returns `None` only when the ledger has no transactions at all; a month
/// without activity still yields an all-zero analysis.
pub fn analyze_month(ctx: &AnalysisContext<'_>) -> Option<MonthlyAnalysis> {
    if ctx.transactions.is_empty() {
        return None;
    }

    let (year, month) = (ctx.today.year(), ctx.today.month());
    let totals = LedgerTotals::from_transactions(
        ctx.transactions
            .iter()
            .filter(|t| t.date.year() == year && t.date.month() == month),
    );

    let savings_rate = if totals.income > 0.0 {
        totals.balance / totals.income * 100.0
    } else {
        0.0
    };

    Some(MonthlyAnalysis {
        income: totals.income,
        expenses: totals.expenses,
        balance: totals.balance,
        savings_rate,
    })
}
