//! Spending velocity: this week vs. last week, this month vs. last month
//!
//! Only expenses count. The current windows are open-ended, so a future-dated
//! expense is counted in the current week and month.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::engine::AnalysisContext;
use super::types::{PeriodVelocity, Trend, VelocityReport};

/// First day of the calendar week
pub const WEEK_STARTS_ON: Weekday = Weekday::Sun;

/// Length of the comparison week, in days
pub const WEEK_LENGTH_DAYS: i64 = 7;

/// Change reported when there was no prior spending but there is now
const NEW_SPENDING_CHANGE: f64 = 100.0;

/// Calendar boundaries relative to a given day (all inclusive starts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindows {
    pub week_start: NaiveDate,
    pub previous_week_start: NaiveDate,
    pub month_start: NaiveDate,
    pub previous_month_start: NaiveDate,
    /// Last day of the previous month (inclusive)
    pub previous_month_end: NaiveDate,
}

impl CalendarWindows {
    pub fn for_day(today: NaiveDate) -> Self {
        let week_start = today.week(WEEK_STARTS_ON).first_day();
        let month_start = today.with_day(1).unwrap_or(today);
        let previous_month_end = month_start.pred_opt().unwrap_or(month_start);
        let previous_month_start = previous_month_end.with_day(1).unwrap_or(previous_month_end);

        Self {
            week_start,
            previous_week_start: week_start - Duration::days(WEEK_LENGTH_DAYS),
            month_start,
            previous_month_start,
            previous_month_end,
        }
    }

    pub fn in_current_week(&self, date: NaiveDate) -> bool {
        date >= self.week_start
    }

    pub fn in_previous_week(&self, date: NaiveDate) -> bool {
        date >= self.previous_week_start && date < self.week_start
    }

    pub fn in_current_month(&self, date: NaiveDate) -> bool {
        date >= self.month_start
    }

    pub fn in_previous_month(&self, date: NaiveDate) -> bool {
        date >= self.previous_month_start && date <= self.previous_month_end
    }
}

/// Percent change from `previous` to `current`
///
/// With no prior spending the change is 100% if anything was spent now,
/// otherwise 0%.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        NEW_SPENDING_CHANGE
    } else {
        0.0
    }
}

pub fn trend_for(change: f64, dead_band: f64) -> Trend {
    if change > dead_band {
        Trend::Up
    } else if change < -dead_band {
        Trend::Down
    } else {
        Trend::Stable
    }
}

fn period(current: f64, previous: f64, dead_band: f64) -> PeriodVelocity {
    let change = percent_change(current, previous);
    PeriodVelocity {
        current,
        previous,
        change,
        trend: trend_for(change, dead_band),
    }
}

pub fn calculate_velocity(ctx: &AnalysisContext<'_>) -> VelocityReport {
    let windows = CalendarWindows::for_day(ctx.today);

    let (mut this_week, mut last_week, mut this_month, mut last_month) = (0.0, 0.0, 0.0, 0.0);
    for tx in ctx.transactions.iter().filter(|t| t.is_expense()) {
        if windows.in_current_week(tx.date) {
            this_week += tx.amount;
        } else if windows.in_previous_week(tx.date) {
            last_week += tx.amount;
        }

        if windows.in_current_month(tx.date) {
            this_month += tx.amount;
        } else if windows.in_previous_month(tx.date) {
            last_month += tx.amount;
        }
    }

    let dead_band = ctx.config.trend_threshold_percent;
    VelocityReport {
        weekly: period(this_week, last_week, dead_band),
        monthly: period(this_month, last_month, dead_band),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryResolver;
    use crate::config::InsightConfig;
    use crate::models::{Transaction, TransactionType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: f64, on: NaiveDate) -> Transaction {
        Transaction {
            id: String::new(),
            tx_type: TransactionType::Expense,
            amount,
            category: "food".to_string(),
            description: String::new(),
            date: on,
            timestamp: 0,
        }
    }

    fn run(transactions: &[Transaction], today: NaiveDate) -> VelocityReport {
        let resolver = CategoryResolver::builtin();
        let config = InsightConfig::default();
        let ctx = AnalysisContext::new(transactions, &resolver, today, &config);
        calculate_velocity(&ctx)
    }

    #[test]
    fn test_windows_start_on_sunday() {
        // 2024-05-15 is a Wednesday
        let w = CalendarWindows::for_day(date(2024, 5, 15));
        assert_eq!(w.week_start, date(2024, 5, 12));
        assert_eq!(w.previous_week_start, date(2024, 5, 5));
        assert_eq!(w.month_start, date(2024, 5, 1));
        assert_eq!(w.previous_month_start, date(2024, 4, 1));
        assert_eq!(w.previous_month_end, date(2024, 4, 30));

        // A Sunday starts its own week
        let sunday = CalendarWindows::for_day(date(2024, 5, 12));
        assert_eq!(sunday.week_start, date(2024, 5, 12));
    }

    #[test]
    fn test_windows_across_year_boundary() {
        let w = CalendarWindows::for_day(date(2024, 1, 2));
        assert_eq!(w.week_start, date(2023, 12, 31));
        assert_eq!(w.previous_month_start, date(2023, 12, 1));
        assert_eq!(w.previous_month_end, date(2023, 12, 31));
    }

    #[test]
    fn test_percent_change_rules() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(100.0, 0.0), 100.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
    }

    #[test]
    fn test_trend_dead_band() {
        assert_eq!(trend_for(50.0, 10.0), Trend::Up);
        assert_eq!(trend_for(10.0, 10.0), Trend::Stable);
        assert_eq!(trend_for(-10.5, 10.0), Trend::Down);
        assert_eq!(trend_for(0.0, 10.0), Trend::Stable);
    }

    #[test]
    fn test_weekly_surge() {
        let today = date(2024, 5, 15);
        let txs = vec![
            expense(100.0, date(2024, 5, 12)),
            expense(50.0, date(2024, 5, 14)),
            expense(100.0, date(2024, 5, 6)),
        ];
        let report = run(&txs, today);

        assert_eq!(report.weekly.current, 150.0);
        assert_eq!(report.weekly.previous, 100.0);
        assert_eq!(report.weekly.change, 50.0);
        assert_eq!(report.weekly.trend, Trend::Up);
    }

    #[test]
    fn test_no_prior_spending() {
        let today = date(2024, 5, 15);
        let report = run(&[expense(100.0, date(2024, 5, 13))], today);
        assert_eq!(report.weekly.change, 100.0);
        assert_eq!(report.weekly.trend, Trend::Up);

        let empty = run(&[], today);
        assert_eq!(empty.weekly.change, 0.0);
        assert_eq!(empty.weekly.trend, Trend::Stable);
        assert_eq!(empty.monthly.trend, Trend::Stable);
    }

    #[test]
    fn test_monthly_windows_and_income_excluded() {
        let today = date(2024, 5, 15);
        let mut salary = expense(3000.0, date(2024, 5, 1));
        salary.tx_type = TransactionType::Income;
        let txs = vec![
            expense(200.0, date(2024, 5, 2)),
            expense(400.0, date(2024, 4, 30)),
            expense(999.0, date(2024, 3, 31)),
            salary,
        ];
        let report = run(&txs, today);

        assert_eq!(report.monthly.current, 200.0);
        assert_eq!(report.monthly.previous, 400.0);
        assert_eq!(report.monthly.change, -50.0);
        assert_eq!(report.monthly.trend, Trend::Down);
    }

    #[test]
    fn test_previous_week_starts_inclusive() {
        // Saturday; last week runs 05-05 (Sunday) through 05-11
        let today = date(2024, 5, 18);
        let txs = vec![
            expense(5.0, date(2024, 5, 5)),
            expense(7.0, date(2024, 5, 4)),
        ];
        let report = run(&txs, today);

        assert_eq!(report.weekly.previous, 5.0);
        assert_eq!(report.weekly.current, 0.0);
    }
}
