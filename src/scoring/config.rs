use serde::{Deserialize, Serialize};

use super::benchmark::DEFAULT_INDUSTRY;

/// Upper bounds for the result lists; config may lower them, never raise them.
pub const INSIGHTS_CAP: usize = 3;
pub const RISKS_CAP: usize = 2;
pub const OPPORTUNITIES_CAP: usize = 2;

/// Scoring rule configuration.
///
/// Every field is optional; unset fields fall back to the built-in rules.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   risk_max_weight: 3
///   opportunity_min_weight: 8
///   high_band_min: 80
///   medium_band_min: 60
///   max_insights: 3
///   fallback_industry: tech
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Answers weighted at or below this are flagged as risks (default: 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_max_weight: Option<u32>,

    /// Answers weighted at or above this are flagged as opportunities (default: 8)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity_min_weight: Option<u32>,

    /// Percentage answers at or above this use the high insight (default: 80)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_band_min: Option<u8>,

    /// Percentage answers at or above this use the medium insight (default: 60)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_band_min: Option<u8>,

    /// At most this many insights are kept (default and maximum: 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_insights: Option<usize>,

    /// Default and maximum: 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_risks: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_opportunities: Option<usize>,

    /// Industry used for benchmarks when none is answered (default: tech)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_industry: Option<String>,
}

impl ScoringConfig {
    /// Config with every field set to the built-in value
    pub fn builtin() -> Self {
        Self {
            risk_max_weight: Some(3),
            opportunity_min_weight: Some(8),
            high_band_min: Some(80),
            medium_band_min: Some(60),
            max_insights: Some(INSIGHTS_CAP),
            max_risks: Some(RISKS_CAP),
            max_opportunities: Some(OPPORTUNITIES_CAP),
            fallback_industry: Some(DEFAULT_INDUSTRY.to_string()),
        }
    }

    pub fn risk_max_weight(&self) -> u32 {
        self.risk_max_weight.unwrap_or(3)
    }

    pub fn opportunity_min_weight(&self) -> u32 {
        self.opportunity_min_weight.unwrap_or(8)
    }

    pub fn high_band_min(&self) -> u8 {
        self.high_band_min.unwrap_or(80)
    }

    pub fn medium_band_min(&self) -> u8 {
        self.medium_band_min.unwrap_or(60)
    }

    pub fn max_insights(&self) -> usize {
        self.max_insights.unwrap_or(INSIGHTS_CAP).min(INSIGHTS_CAP)
    }

    pub fn max_risks(&self) -> usize {
        self.max_risks.unwrap_or(RISKS_CAP).min(RISKS_CAP)
    }

    pub fn max_opportunities(&self) -> usize {
        self.max_opportunities.unwrap_or(OPPORTUNITIES_CAP).min(OPPORTUNITIES_CAP)
    }

    pub fn fallback_industry(&self) -> &str {
        self.fallback_industry.as_deref().unwrap_or(DEFAULT_INDUSTRY)
    }
}
