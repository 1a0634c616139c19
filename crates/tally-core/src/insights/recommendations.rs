//! Recommendation rules
//!
//! Rules are evaluated in a fixed priority order and the first few that fire
//! are kept. There is no scoring: when more rules fire than the cap allows,
//! the later ones are dropped.

use crate::categories::CategoryResolver;
use crate::config::InsightConfig;
use crate::format::money;
use crate::models::TransactionType;

use super::types::{
    Anomaly, MonthlyAnalysis, Recommendation, RecommendationType, VelocityReport,
};

/// Category label used when an anomaly's category no longer exists
const UNRESOLVED_EXPENSE_LABEL: &str = "expense";

/// Analyzer outputs the rules read from
pub struct RecommendationInputs<'a> {
    pub velocity: &'a VelocityReport,
    pub anomalies: &'a [Anomaly],
    pub analysis: Option<&'a MonthlyAnalysis>,
    pub resolver: &'a CategoryResolver,
    pub currency: &'a str,
    pub config: &'a InsightConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationRule {
    SpendingSurge,
    UnusualTransaction,
    NegativeBalance,
    LowSavingsRate,
}

impl RecommendationRule {
    /// Evaluation order, highest priority first
    pub const PRIORITY: [RecommendationRule; 4] = [
        RecommendationRule::SpendingSurge,
        RecommendationRule::UnusualTransaction,
        RecommendationRule::NegativeBalance,
        RecommendationRule::LowSavingsRate,
    ];

    pub fn evaluate(&self, inputs: &RecommendationInputs<'_>) -> Option<Recommendation> {
        let cfg = inputs.config;
        match self {
            RecommendationRule::SpendingSurge => {
                let change = inputs.velocity.weekly.change;
                (change > cfg.surge_threshold_percent).then(|| {
                    recommendation(
                        RecommendationType::Warning,
                        "⚠️",
                        "Spending Surge",
                        format!("Spending is up {}% this week.", whole_percent(change)),
                    )
                })
            }
            RecommendationRule::UnusualTransaction => {
                let top = inputs.anomalies.first()?;
                let category = inputs.resolver.name_or(
                    TransactionType::Expense,
                    &top.transaction.category,
                    UNRESOLVED_EXPENSE_LABEL,
                );
                Some(recommendation(
                    RecommendationType::Info,
                    "🔍",
                    "Unusual Transaction",
                    format!(
                        "{} on {} was {}% higher than usual.",
                        money(top.transaction.amount, inputs.currency),
                        category,
                        top.percent_above
                    ),
                ))
            }
            RecommendationRule::NegativeBalance => {
                let analysis = inputs.analysis?;
                (analysis.balance < 0.0).then(|| {
                    recommendation(
                        RecommendationType::Danger,
                        "🚨",
                        "Negative Balance",
                        format!(
                            "You've spent {} more than your income this month.",
                            money(analysis.balance.abs(), inputs.currency)
                        ),
                    )
                })
            }
            RecommendationRule::LowSavingsRate => {
                let rate = inputs.analysis?.savings_rate;
                (rate > 0.0 && rate < cfg.low_savings_rate_percent).then(|| {
                    recommendation(
                        RecommendationType::Warning,
                        "💸",
                        "Low Savings Rate",
                        format!(
                            "Your savings rate is {}% this month. Aim for {}%!",
                            whole_percent(rate),
                            whole_percent(cfg.savings_target_percent)
                        ),
                    )
                })
            }
        }
    }
}

fn recommendation(
    kind: RecommendationType,
    icon: &str,
    title: &str,
    message: String,
) -> Recommendation {
    Recommendation {
        kind,
        icon: icon.to_string(),
        title: title.to_string(),
        message,
    }
}

fn whole_percent(value: f64) -> i64 {
    value.round() as i64
}

/// Evaluate every rule in priority order and keep the first `max_recommendations`
pub fn recommend(inputs: &RecommendationInputs<'_>) -> Vec<Recommendation> {
    RecommendationRule::PRIORITY
        .iter()
        .filter_map(|rule| rule.evaluate(inputs))
        .take(inputs.config.max_recommendations)
        .collect()
}
