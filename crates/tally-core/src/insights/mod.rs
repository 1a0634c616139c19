//! Insight Engine - derived analytics over a ledger snapshot
//!
//! Four independent analyzers read the same snapshot and a final rule list
//! turns their outputs into recommendations:
//!
//! - **Recurring** - weekly and monthly series of same-category, same-amount transactions
//! - **Anomalies** - expenses far above their category's typical amount
//! - **Velocity** - this week and month against the previous ones
//! - **Monthly** - income, expenses, balance and savings rate this month
//! - **Recommendations** - at most a few prioritized, human-readable messages
//!
//! Nothing here performs I/O or keeps state between runs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new(config);
//! let insights = engine.analyze(&snapshot, today);
//! ```

pub mod anomalies;
pub mod engine;
pub mod monthly;
pub mod recommendations;
pub mod recurring;
pub mod types;
pub mod velocity;

pub use anomalies::{detect_anomalies, CategoryStats};
pub use engine::{AnalysisContext, InsightEngine};
pub use monthly::analyze_month;
pub use recommendations::{recommend, RecommendationInputs, RecommendationRule};
pub use recurring::detect_recurring;
pub use types::{
    Anomaly, Frequency, Insights, MonthlyAnalysis, PeriodVelocity, Recommendation,
    RecommendationType, RecurrencePattern, Trend, VelocityReport, ANOMALY_REASON,
};
pub use velocity::{calculate_velocity, CalendarWindows, WEEK_STARTS_ON};
