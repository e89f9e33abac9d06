//! Risk Types
//!
//! Core types for risk classification. No logic here - just data
//! structures.

use serde::{Deserialize, Serialize};

use super::rules::{TREND_SCORE_HIGH, TREND_SCORE_LOW, TREND_SCORE_MEDIUM};

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Risk classification levels. Ordering is meaningful: `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskLevel {
    /// Routine conditions, no action needed
    Low,
    /// Elevated conditions, increase monitoring
    Medium,
    /// Outbreak conditions, immediate action
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Numeric y-value used for the trend chart.
    /// One table, defined in `rules.rs` - never a magic literal at a call site.
    pub fn trend_score(&self) -> f64 {
        match self {
            RiskLevel::Low => TREND_SCORE_LOW,
            RiskLevel::Medium => TREND_SCORE_MEDIUM,
            RiskLevel::High => TREND_SCORE_HIGH,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#22c55e",    // Green
            RiskLevel::Medium => "#f59e0b", // Amber
            RiskLevel::High => "#ef4444",   // Red
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Result of classifying one MetricsRecord
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub risk_level: RiskLevel,
    /// Confidence of the prediction (0.0 - 1.0)
    pub confidence: f64,
}

impl Classification {
    pub fn new(risk_level: RiskLevel, confidence: f64) -> Self {
        Self {
            risk_level,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_trend_score_table() {
        assert_eq!(RiskLevel::Low.trend_score(), 20.0);
        assert_eq!(RiskLevel::Medium.trend_score(), 50.0);
        assert_eq!(RiskLevel::High.trend_score(), 85.0);
    }

    #[test]
    fn test_classification_clamps_confidence() {
        let c = Classification::new(RiskLevel::High, 1.3);
        assert_eq!(c.confidence, 1.0);
    }
}
