//! Insight engine configuration
//!
//! Thresholds are loaded with a two-layer resolution:
//! 1. An override file (explicit path, or ~/.local/share/tally/config/insights.toml)
//! 2. Embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

/// Upper bound on `max_recommendations`
pub const RECOMMENDATION_LIMIT: usize = 3;

/// Thresholds used by the analyzers and the recommendation rules
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    /// Weekly cadence band for the average gap, in days (inclusive)
    pub weekly_min_days: f64,
    pub weekly_max_days: f64,
    /// Monthly cadence band for the average gap, in days (inclusive)
    pub monthly_min_days: f64,
    pub monthly_max_days: f64,

    /// Minimum expenses in the ledger before anomaly detection runs
    pub anomaly_min_expenses: usize,
    /// Minimum expenses within a category to evaluate that category
    pub anomaly_min_category_samples: usize,
    /// Outlier threshold is mean + this many population standard deviations
    pub anomaly_stddev_multiplier: f64,

    /// Dead-band for up/down trends (percent)
    pub trend_threshold_percent: f64,

    /// Weekly change above this fires the spending surge rule (percent)
    pub surge_threshold_percent: f64,
    /// Savings rates strictly between zero and this fire the low savings rule
    pub low_savings_rate_percent: f64,
    /// Target mentioned in the low savings message (percent)
    pub savings_target_percent: f64,
    /// Cap on the number of recommendations returned
    pub max_recommendations: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            weekly_min_days: 6.0,
            weekly_max_days: 8.0,
            monthly_min_days: 25.0,
            monthly_max_days: 35.0,
            anomaly_min_expenses: 5,
            anomaly_min_category_samples: 3,
            anomaly_stddev_multiplier: 2.0,
            trend_threshold_percent: 10.0,
            surge_threshold_percent: 20.0,
            low_savings_rate_percent: 10.0,
            savings_target_percent: 20.0,
            max_recommendations: 3,
        }
    }
}

impl InsightConfig {
    /// Load config, preferring `override_path`, then the user override, then defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        load_config(override_path)
    }

    /// Parse config from TOML content layered over the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("insights.toml"))
}

/// Load configuration (override first, then default)
pub fn load_config(override_path: Option<&Path>) -> Result<InsightConfig> {
    let candidate = override_path
        .map(Path::to_path_buf)
        .or_else(default_config_path);

    let content = match candidate {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading insight config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    recurring: Option<RawRecurring>,
    anomalies: Option<RawAnomalies>,
    velocity: Option<RawVelocity>,
    recommendations: Option<RawRecommendations>,
}

#[derive(Debug, Deserialize)]
struct RawRecurring {
    weekly_min_days: Option<f64>,
    weekly_max_days: Option<f64>,
    monthly_min_days: Option<f64>,
    monthly_max_days: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawAnomalies {
    min_expenses: Option<usize>,
    min_category_samples: Option<usize>,
    stddev_multiplier: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawVelocity {
    trend_threshold_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRecommendations {
    surge_threshold_percent: Option<f64>,
    low_savings_rate_percent: Option<f64>,
    savings_target_percent: Option<f64>,
    max_recommendations: Option<usize>,
}

fn parse_config(content: &str) -> Result<InsightConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = InsightConfig::default();

    if let Some(r) = raw.recurring {
        if let Some(v) = r.weekly_min_days {
            config.weekly_min_days = v;
        }
        if let Some(v) = r.weekly_max_days {
            config.weekly_max_days = v;
        }
        if let Some(v) = r.monthly_min_days {
            config.monthly_min_days = v;
        }
        if let Some(v) = r.monthly_max_days {
            config.monthly_max_days = v;
        }
    }

    if let Some(a) = raw.anomalies {
        if let Some(v) = a.min_expenses {
            config.anomaly_min_expenses = v;
        }
        if let Some(v) = a.min_category_samples {
            config.anomaly_min_category_samples = v;
        }
        if let Some(v) = a.stddev_multiplier {
            config.anomaly_stddev_multiplier = v;
        }
    }

    if let Some(v) = raw.velocity.and_then(|v| v.trend_threshold_percent) {
        config.trend_threshold_percent = v;
    }

    if let Some(r) = raw.recommendations {
        if let Some(v) = r.surge_threshold_percent {
            config.surge_threshold_percent = v;
        }
        if let Some(v) = r.low_savings_rate_percent {
            config.low_savings_rate_percent = v;
        }
        if let Some(v) = r.savings_target_percent {
            config.savings_target_percent = v;
        }
        if let Some(v) = r.max_recommendations {
            config.max_recommendations = v;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &InsightConfig) -> Result<()> {
    if config.weekly_min_days > config.weekly_max_days {
        return Err(Error::Config(
            "recurring.weekly_min_days exceeds weekly_max_days".to_string(),
        ));
    }
    if config.monthly_min_days > config.monthly_max_days {
        return Err(Error::Config(
            "recurring.monthly_min_days exceeds monthly_max_days".to_string(),
        ));
    }
    if config.max_recommendations > RECOMMENDATION_LIMIT {
        return Err(Error::Config(format!(
            "recommendations.max_recommendations must be at most {}",
            RECOMMENDATION_LIMIT
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, InsightConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config(
            r#"
            [recommendations]
            max_recommendations = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.max_recommendations, 2);
        assert_eq!(config.monthly_min_days, 25.0);
        assert_eq!(config.anomaly_min_expenses, 5);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config("[recurring\nweekly_min_days = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_inverted_band_rejected() {
        let err = parse_config("[recurring]\nweekly_min_days = 9.0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_recommendation_cap_bounded() {
        let err = parse_config("[recommendations]\nmax_recommendations = 10").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let at_limit = parse_config("[recommendations]\nmax_recommendations = 3").unwrap();
        assert_eq!(at_limit.max_recommendations, RECOMMENDATION_LIMIT);
    }

    #[test]
    fn test_load_through_insight_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[anomalies]\nstddev_multiplier = 3.0").unwrap();

        let config = InsightConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.anomaly_stddev_multiplier, 3.0);
        assert_eq!(config.max_recommendations, 3);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[velocity]\ntrend_threshold_percent = 5.0").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.trend_threshold_percent, 5.0);
    }
}
