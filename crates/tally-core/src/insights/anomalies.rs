//! Spending anomaly detection
//!
//! Flags expenses whose amount is strictly above mean + k·σ (population
//! standard deviation) for their category.

use std::collections::HashMap;

use crate::models::Transaction;

use super::engine::AnalysisContext;
use super::types::{Anomaly, ANOMALY_REASON};

/// Mean and population standard deviation of a category's amounts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl CategoryStats {
    pub fn from_amounts(amounts: &[f64]) -> Option<Self> {
        if amounts.is_empty() {
            return None;
        }
        let n = amounts.len() as f64;
        let mean = amounts.iter().sum::<f64>() / n;
        let variance = amounts.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Percent above the mean, rounded; zero when the mean is not positive
    pub fn percent_above(&self, amount: f64) -> i64 {
        if self.mean <= 0.0 {
            return 0;
        }
        ((amount - self.mean) / self.mean * 100.0).round() as i64
    }
}

/// Detect anomalous expenses, grouped by category in order of each
/// category's first appearance, then in input order within a category.
pub fn detect_anomalies(ctx: &AnalysisContext<'_>) -> Vec<Anomaly> {
    let expenses: Vec<&Transaction> = ctx.transactions.iter().filter(|t| t.is_expense()).collect();
    if expenses.len() < ctx.config.anomaly_min_expenses {
        return Vec::new();
    }

    let mut order: Vec<&str> = Vec::new();
    let mut by_category: HashMap<&str, Vec<&Transaction>> = HashMap::new();
    for &tx in &expenses {
        let members = by_category.entry(tx.category.as_str()).or_insert_with(|| {
            order.push(tx.category.as_str());
            Vec::new()
        });
        members.push(tx);
    }

    let mut anomalies = Vec::new();
    for category in order {
        let members = &by_category[category];
        if members.len() < ctx.config.anomaly_min_category_samples {
            continue;
        }

        let amounts: Vec<f64> = members.iter().map(|t| t.amount).collect();
        let Some(stats) = CategoryStats::from_amounts(&amounts) else {
            continue;
        };
        let threshold = stats.mean + ctx.config.anomaly_stddev_multiplier * stats.std_dev;

        for tx in members.iter().filter(|t| t.amount > threshold) {
            anomalies.push(Anomaly {
                transaction: (*tx).clone(),
                reason: ANOMALY_REASON.to_string(),
                typical: stats.mean,
                percent_above: stats.percent_above(tx.amount),
            });
        }
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryResolver;
    use crate::config::InsightConfig;
    use crate::models::TransactionType;
    use chrono::NaiveDate;

    fn tx(id: &str, category: &str, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            tx_type: TransactionType::Expense,
            amount,
            category: category.to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            timestamp: 0,
        }
    }

    fn run(transactions: &[Transaction]) -> Vec<Anomaly> {
        let resolver = CategoryResolver::builtin();
        let config = InsightConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let ctx = AnalysisContext::new(transactions, &resolver, today, &config);
        detect_anomalies(&ctx)
    }

    #[test]
    fn test_population_stats() {
        let stats = CategoryStats::from_amounts(&[10.0, 10.0, 10.0, 10.0, 100.0]).unwrap();
        assert_eq!(stats.mean, 28.0);
        assert_eq!(stats.std_dev, 36.0);
        assert!(CategoryStats::from_amounts(&[]).is_none());
    }

    #[test]
    fn test_boundary_is_strict() {
        // mean 28, σ 36: threshold is exactly 100, and 100 is not above it
        let txs: Vec<_> = [10.0, 10.0, 10.0, 10.0, 100.0]
            .iter()
            .enumerate()
            .map(|(i, a)| tx(&i.to_string(), "food", *a))
            .collect();
        assert!(run(&txs).is_empty());
    }

    #[test]
    fn test_flags_outlier() {
        let mut txs: Vec<_> = (0..7).map(|i| tx(&i.to_string(), "food", 10.0)).collect();
        txs.push(tx("big", "food", 100.0));

        let anomalies = run(&txs);
        assert_eq!(anomalies.len(), 1);
        let a = &anomalies[0];
        assert_eq!(a.transaction.id, "big");
        assert_eq!(a.reason, ANOMALY_REASON);
        assert_eq!(a.typical, 21.25);
        assert_eq!(a.percent_above, 371);
    }

    #[test]
    fn test_requires_five_expenses() {
        let txs = vec![
            tx("a", "food", 1.0),
            tx("b", "food", 1.0),
            tx("c", "food", 1.0),
            tx("d", "food", 500.0),
        ];
        assert!(run(&txs).is_empty());
    }

    #[test]
    fn test_income_is_ignored() {
        let mut txs: Vec<_> = (0..7).map(|i| tx(&i.to_string(), "food", 10.0)).collect();
        let mut salary = tx("salary", "food", 5000.0);
        salary.tx_type = TransactionType::Income;
        txs.push(salary);
        assert!(run(&txs).is_empty());
    }

    #[test]
    fn test_small_categories_skipped() {
        let mut txs: Vec<_> = (0..7).map(|i| tx(&i.to_string(), "food", 10.0)).collect();
        txs.push(tx("h1", "health", 5.0));
        txs.push(tx("h2", "health", 900.0));
        assert!(run(&txs).is_empty());
    }

    #[test]
    fn test_zero_mean_percentage_is_zero() {
        let stats = CategoryStats {
            mean: 0.0,
            std_dev: 0.0,
        };
        assert_eq!(stats.percent_above(10.0), 0);
    }
}
