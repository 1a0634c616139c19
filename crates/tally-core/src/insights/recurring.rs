//! Recurring pattern detection
//!
//! Groups transactions by (type, category, whole-unit amount) and keeps the
//! groups whose average gap between occurrences lands in the weekly or
//! monthly band. No other cadence is recognized.

use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::HashMap;

use crate::models::{Transaction, TransactionType};

use super::engine::AnalysisContext;
use super::types::{Frequency, RecurrencePattern};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Grouping key; rounding the amount absorbs small drift between charges
type GroupKey<'a> = (TransactionType, &'a str, i64);

/// Transactions sharing a key, in input order
struct Group<'a> {
    members: Vec<&'a Transaction>,
}

/// Detect recurring series. Groups are yielded lazily in order of their
/// first appearance in the input.
pub fn detect_recurring<'a>(
    ctx: &'a AnalysisContext<'a>,
) -> impl Iterator<Item = RecurrencePattern> + 'a {
    let groups = if ctx.transactions.len() < 2 {
        Vec::new()
    } else {
        group_transactions(ctx.transactions)
    };

    groups
        .into_iter()
        .filter(|g| g.members.len() >= 2)
        .filter_map(move |g| classify_group(&g, ctx))
}

fn group_transactions(transactions: &[Transaction]) -> Vec<Group<'_>> {
    let mut index: HashMap<GroupKey<'_>, usize> = HashMap::new();
    let mut groups: Vec<Group<'_>> = Vec::new();

    for tx in transactions {
        let key = (tx.tx_type, tx.category.as_str(), tx.amount.round() as i64);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Group {
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(tx);
    }

    groups
}

fn classify_group(group: &Group<'_>, ctx: &AnalysisContext<'_>) -> Option<RecurrencePattern> {
    let mut dates: Vec<NaiveDate> = group.members.iter().map(|t| t.date).collect();
    dates.sort();

    let gaps: Vec<i64> = dates
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .collect();
    let avg_days = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;

    let frequency = classify_interval(avg_days, ctx)?;
    let last = *dates.last()?;

    Some(RecurrencePattern {
        transaction: group.members[0].clone(),
        frequency,
        next_date: advance(last, avg_days),
        average_interval_days: avg_days,
        occurrences: group.members.len(),
    })
}

fn classify_interval(avg_days: f64, ctx: &AnalysisContext<'_>) -> Option<Frequency> {
    let cfg = ctx.config;
    if (cfg.monthly_min_days..=cfg.monthly_max_days).contains(&avg_days) {
        Some(Frequency::Monthly)
    } else if (cfg.weekly_min_days..=cfg.weekly_max_days).contains(&avg_days) {
        Some(Frequency::Weekly)
    } else {
        None
    }
}

/// Add a fractional number of days to midnight of `date`; the calendar day
/// reached is the result (partial days truncate).
fn advance(date: NaiveDate, days: f64) -> NaiveDate {
    let seconds = (days * SECONDS_PER_DAY).round() as i64;
    (date.and_time(NaiveTime::MIN) + Duration::seconds(seconds)).date()
}
