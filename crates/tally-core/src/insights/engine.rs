//! Insight Engine - runs every analyzer over one ledger snapshot

use chrono::NaiveDate;

use crate::categories::CategoryResolver;
use crate::config::InsightConfig;
use crate::ledger::LedgerSnapshot;
use crate::models::Transaction;

use super::anomalies::detect_anomalies;
use super::monthly::analyze_month;
use super::recommendations::{recommend, RecommendationInputs};
use super::recurring::detect_recurring;
use super::types::Insights;
use super::velocity::calculate_velocity;

/// Context shared by all insight analyzers
pub struct AnalysisContext<'a> {
    /// Every transaction in the ledger, in storage order
    pub transactions: &'a [Transaction],
    /// Category lookup for the snapshot being analyzed
    pub resolver: &'a CategoryResolver,
    /// The calendar day treated as "now"
    pub today: NaiveDate,
    pub config: &'a InsightConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        resolver: &'a CategoryResolver,
        today: NaiveDate,
        config: &'a InsightConfig,
    ) -> Self {
        Self {
            transactions,
            resolver,
            today,
            config,
        }
    }
}

/// The main insight engine that orchestrates analysis
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: InsightConfig,
}

impl InsightEngine {
    pub fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Run every analyzer against `snapshot` as of `today`.
    ///
    /// Recurrence, anomalies, velocity and the monthly analysis only read the
    /// snapshot; recommendations are derived from their outputs. The same
    /// snapshot and day always produce an equal `Insights`.
    pub fn analyze(&self, snapshot: &LedgerSnapshot, today: NaiveDate) -> Insights {
        let resolver = snapshot.resolver();
        let ctx = AnalysisContext::new(&snapshot.transactions, &resolver, today, &self.config);

        let recurring: Vec<_> = detect_recurring(&ctx).collect();
        tracing::debug!(count = recurring.len(), "Recurring detection complete");

        let anomalies = detect_anomalies(&ctx);
        tracing::debug!(count = anomalies.len(), "Anomaly detection complete");

        let velocity = calculate_velocity(&ctx);
        tracing::debug!(
            weekly_change = velocity.weekly.change,
            monthly_change = velocity.monthly.change,
            "Velocity calculation complete"
        );

        let analysis = analyze_month(&ctx);
        tracing::debug!(present = analysis.is_some(), "Monthly analysis complete");

        let recommendations = recommend(&RecommendationInputs {
            velocity: &velocity,
            anomalies: &anomalies,
            analysis: analysis.as_ref(),
            resolver: &resolver,
            currency: &snapshot.currency,
            config: &self.config,
        });

        tracing::info!(
            transactions = snapshot.transactions.len(),
            recurring = recurring.len(),
            anomalies = anomalies.len(),
            recommendations = recommendations.len(),
            %today,
            "Insight analysis complete"
        );

        Insights {
            recurring,
            anomalies,
            velocity,
            analysis,
            recommendations,
        }
    }

    /// Analyze as of the local calendar date
    pub fn analyze_today(&self, snapshot: &LedgerSnapshot) -> Insights {
        self.analyze(snapshot, chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionType, UserCategories};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(
        id: &str,
        tx_type: TransactionType,
        category: &str,
        amount: f64,
        on: NaiveDate,
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            tx_type,
            amount,
            category: category.to_string(),
            description: String::new(),
            date: on,
            timestamp: 0,
        }
    }

    fn snapshot(transactions: Vec<Transaction>) -> LedgerSnapshot {
        LedgerSnapshot {
            transactions,
            categories: UserCategories::default(),
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let engine = InsightEngine::default();
        let insights = engine.analyze(&snapshot(vec![]), date(2024, 5, 15));

        assert!(insights.recurring.is_empty());
        assert!(insights.anomalies.is_empty());
        assert!(insights.analysis.is_none());
        assert!(insights.recommendations.is_empty());
        assert_eq!(insights.velocity.weekly.change, 0.0);
    }

    #[test]
    fn test_analyze_today_on_empty_snapshot() {
        // Nothing to analyze, so the result does not depend on the date
        let engine = InsightEngine::default();
        let snap = snapshot(vec![]);
        assert_eq!(engine.analyze_today(&snap), engine.analyze(&snap, date(2000, 1, 1)));
    }

    #[test]
    fn test_overspent_month_recommends_negative_balance() {
        let engine = InsightEngine::default();
        let today = date(2024, 5, 20);
        let snap = snapshot(vec![
            tx("i", TransactionType::Income, "salary", 1000.0, date(2024, 5, 1)),
            tx("e", TransactionType::Expense, "bills", 1200.0, date(2024, 5, 2)),
        ]);
        let insights = engine.analyze(&snap, today);

        let analysis = insights.analysis.unwrap();
        assert_eq!(analysis.balance, -200.0);
        assert_eq!(analysis.savings_rate, -20.0);

        let negative = insights
            .recommendations
            .iter()
            .find(|r| r.title == "Negative Balance")
            .unwrap();
        assert!(negative.message.contains("200"));
    }

    #[test]
    fn test_idempotent() {
        let engine = InsightEngine::default();
        let today = date(2024, 5, 15);
        let mut txs: Vec<_> = (0..7)
            .map(|i| {
                tx(
                    &format!("f{}", i),
                    TransactionType::Expense,
                    "food",
                    10.0,
                    date(2024, 5, 1 + i),
                )
            })
            .collect();
        txs.push(tx("big", TransactionType::Expense, "food", 100.0, date(2024, 5, 13)));
        txs.push(tx("r1", TransactionType::Expense, "bills", 80.0, date(2024, 3, 1)));
        txs.push(tx("r2", TransactionType::Expense, "bills", 80.0, date(2024, 4, 1)));
        txs.push(tx("r3", TransactionType::Expense, "bills", 80.0, date(2024, 5, 1)));
        let snap = snapshot(txs);

        let first = engine.analyze(&snap, today);
        let second = engine.analyze(&snap, today);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.recurring.len(), 1);
        assert_eq!(first.anomalies.len(), 1);
    }
}
