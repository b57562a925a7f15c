//! Probability → verdict tier classification
//!
//! Thresholds are exclusive lower bounds evaluated high to low, so each
//! boundary value (0.75, 0.5, 0.1) belongs to the lower tier.

use serde::Serialize;

const HIGH_THRESHOLD: f64 = 0.75;
const MODERATE_THRESHOLD: f64 = 0.5;
const LOW_THRESHOLD: f64 = 0.1;

/// Ordered verdict tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    VeryLow,
    Low,
    Moderate,
    High,
}

/// Alert banner style used to present a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Banner {
    Success,
    Info,
    Warning,
}

impl Tier {
    /// Classify a probability. The value is not clamped.
    pub fn classify(probability: f64) -> Self {
        if probability > HIGH_THRESHOLD {
            Tier::High
        } else if probability > MODERATE_THRESHOLD {
            Tier::Moderate
        } else if probability > LOW_THRESHOLD {
            Tier::Low
        } else {
            Tier::VeryLow
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Tier::High => "High probability of being AI-generated.",
            Tier::Moderate => "Moderate probability of being AI-generated.",
            Tier::Low => "Low probability of being AI-generated.",
            Tier::VeryLow => "Very low probability of being AI-generated (likely human-created).",
        }
    }

    pub fn banner(&self) -> Banner {
        match self {
            Tier::High => Banner::Warning,
            Tier::Moderate | Tier::Low => Banner::Info,
            Tier::VeryLow => Banner::Success,
        }
    }
}

/// Classified detection result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub probability: f64,
    pub tier: Tier,
    /// Probability as a percentage with two decimals, e.g. "83.00%"
    pub display_percent: String,
}

impl Verdict {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            tier: Tier::classify(probability),
            display_percent: format!("{:.2}%", probability * 100.0),
        }
    }
}
