//! Risk Rules & Thresholds
//!
//! Thresholds, weights, and the trend score table for risk
//! classification. No classification logic here - only constants and
//! config.

use serde::{Deserialize, Serialize};

// ============================================================================
// TREND SCORE TABLE (risk level -> chart y-value)
// ============================================================================

pub const TREND_SCORE_LOW: f64 = 20.0;
pub const TREND_SCORE_MEDIUM: f64 = 50.0;
pub const TREND_SCORE_HIGH: f64 = 85.0;

// ============================================================================
// THRESHOLDS (on the weighted composite score, 0.0 - 1.0)
// ============================================================================

/// At or above this score = Medium
pub const MEDIUM_THRESHOLD: f64 = 0.35;

/// At or above this score = High
pub const HIGH_THRESHOLD: f64 = 0.65;

// ============================================================================
// WEIGHTS (How much each metric contributes to the composite score)
// ============================================================================

/// Weight of the contamination index (40%)
pub const CONTAMINATION_WEIGHT: f64 = 0.40;

/// Weight of reported cases (25%)
pub const CASES_WEIGHT: f64 = 0.25;

/// Weight of rainfall (20%)
pub const RAINFALL_WEIGHT: f64 = 0.20;

/// Weight of pH deviation from neutral (15%)
pub const PH_WEIGHT: f64 = 0.15;

// ============================================================================
// NORMALIZATION CAPS (raw metric -> 0..1 contribution)
// ============================================================================

/// Case counts at or above this saturate their contribution
pub const CASES_SATURATION: f64 = 100.0;

/// Rainfall (mm) at or above this saturates its contribution
pub const RAINFALL_SATURATION: f64 = 300.0;

/// Neutral pH; deviation in either direction raises risk
pub const PH_NEUTRAL: f64 = 7.0;

// ============================================================================
// CONFIDENCE SHAPE
// ============================================================================

/// Confidence reported when the composite score is far from the thresholds
pub const CONFIDENCE_EXTREME: f64 = 0.9;

/// Confidence reported in the ambiguous middle band
pub const CONFIDENCE_MIDBAND: f64 = 0.65;

/// Composite scores below this (or above 1 - this from the top) count as extreme
pub const CONFIDENCE_EXTREME_MARGIN: f64 = 0.25;

// ============================================================================
// SEVERITY ESCALATION
// ============================================================================

/// High-risk observations at or above this confidence escalate to Critical
pub const CRITICAL_CONFIDENCE_MIN: f64 = 0.9;

// ============================================================================
// CONFIGURABLE THRESHOLDS (for runtime adjustment)
// ============================================================================

/// Thresholds for classification (configurable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// At or above this = Medium
    pub medium_min: f64,
    /// At or above this = High
    pub high_min: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium_min: MEDIUM_THRESHOLD,
            high_min: HIGH_THRESHOLD,
        }
    }
}

impl RiskThresholds {
    /// High sensitivity - lower thresholds, more alerts
    pub fn high_sensitivity() -> Self {
        Self {
            medium_min: 0.25,
            high_min: 0.55,
        }
    }

    /// Low sensitivity - higher thresholds, fewer alerts
    pub fn low_sensitivity() -> Self {
        Self {
            medium_min: 0.45,
            high_min: 0.75,
        }
    }
}
