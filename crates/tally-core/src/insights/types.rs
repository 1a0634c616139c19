//! Core types for the Insights Engine
//!
//! Everything here is derived data: recomputed on every run, never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Transaction;

/// Fixed reason attached to every anomaly
pub const ANOMALY_REASON: &str = "Unusually high";

/// Recognized recurrence cadences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected recurring series of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    /// First member of the group in input order (not necessarily the latest)
    pub transaction: Transaction,
    pub frequency: Frequency,
    /// Last occurrence plus the average interval
    pub next_date: NaiveDate,
    pub average_interval_days: f64,
    pub occurrences: usize,
}

/// An expense that is a statistical outlier within its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub transaction: Transaction,
    pub reason: String,
    /// Category mean
    pub typical: f64,
    pub percent_above: i64,
}

/// Direction of a period-over-period change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Stable => "→",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expense totals for one period compared with the one before it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodVelocity {
    pub current: f64,
    pub previous: f64,
    /// Percent change vs. the previous period
    pub change: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityReport {
    pub weekly: PeriodVelocity,
    pub monthly: PeriodVelocity,
}

/// Current calendar month income vs. expenses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAnalysis {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub savings_rate: f64,
}

/// Presentation tone of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    Info,
    Warning,
    Danger,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Info => "info",
            RecommendationType::Warning => "warning",
            RecommendationType::Danger => "danger",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A human-readable, actionable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub icon: String,
    pub title: String,
    pub message: String,
}

/// Full output of one engine run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub recurring: Vec<RecurrencePattern>,
    pub anomalies: Vec<Anomaly>,
    pub velocity: VelocityReport,
    /// `None` when the ledger is empty ("not enough data yet")
    pub analysis: Option<MonthlyAnalysis>,
    pub recommendations: Vec<Recommendation>,
}
