//! Risk Classifier
//!
//! The classifier contract plus the built-in heuristic fallback.
//! Live ingestion and simulation MUST share one classifier instance so
//! projected and real risk levels are always comparable.

use crate::logic::error::EngineResult;
use crate::logic::metrics::MetricsRecord;

use super::rules::{
    RiskThresholds, CASES_SATURATION, CASES_WEIGHT, CONFIDENCE_EXTREME,
    CONFIDENCE_EXTREME_MARGIN, CONFIDENCE_MIDBAND, CONTAMINATION_WEIGHT, PH_NEUTRAL, PH_WEIGHT,
    RAINFALL_SATURATION, RAINFALL_WEIGHT,
};
use super::types::{Classification, RiskLevel};

// ============================================================================
// CLASSIFIER CONTRACT
// ============================================================================

/// External collaborator contract: metrics in, risk level + confidence out.
///
/// A real deployment injects an ML-backed implementation; when that is
/// unavailable the implementation fails with
/// `EngineError::ClassifierUnavailable` and the engine stays on
/// last-known-good data.
pub trait RiskClassifier {
    fn classify(&self, metrics: &MetricsRecord) -> EngineResult<Classification>;
}

// ============================================================================
// HEURISTIC FALLBACK
// ============================================================================

/// Deterministic weighted-score classifier used when no model is loaded.
///
/// Composite score = contamination * 0.40 + cases * 0.25
///                 + rainfall * 0.20 + pH deviation * 0.15,
/// each input normalized into 0..1 first (weights in `rules.rs`).
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    thresholds: RiskThresholds,
}

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Weighted composite score in 0..1
    fn composite_score(metrics: &MetricsRecord) -> f64 {
        let contamination = metrics.contamination.clamp(0.0, 1.0);
        let cases = (metrics.cases_count as f64 / CASES_SATURATION).min(1.0);
        let rainfall = (metrics.rainfall / RAINFALL_SATURATION).min(1.0);
        let ph_deviation = ((metrics.ph_level - PH_NEUTRAL).abs() / PH_NEUTRAL).min(1.0);

        contamination * CONTAMINATION_WEIGHT
            + cases * CASES_WEIGHT
            + rainfall * RAINFALL_WEIGHT
            + ph_deviation * PH_WEIGHT
    }

    /// High confidence at the extremes, lower in the ambiguous middle band
    fn confidence_for(score: f64) -> f64 {
        if score < CONFIDENCE_EXTREME_MARGIN || score > 1.0 - CONFIDENCE_EXTREME_MARGIN {
            CONFIDENCE_EXTREME
        } else {
            CONFIDENCE_MIDBAND
        }
    }
}

impl RiskClassifier for HeuristicClassifier {
    fn classify(&self, metrics: &MetricsRecord) -> EngineResult<Classification> {
        let score = Self::composite_score(metrics);

        let risk_level = if score >= self.thresholds.high_min {
            RiskLevel::High
        } else if score >= self.thresholds.medium_min {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        Ok(Classification::new(risk_level, Self::confidence_for(score)))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(rainfall: f64, ph: f64, contamination: f64, cases: u32) -> MetricsRecord {
        MetricsRecord::new(rainfall, ph, contamination, cases, "Test Zone").unwrap()
    }

    #[test]
    fn test_clean_conditions_classify_low() {
        let classifier = HeuristicClassifier::new();
        let result = classifier.classify(&metrics(20.0, 7.2, 0.05, 2)).unwrap();
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.confidence, CONFIDENCE_EXTREME);
    }

    #[test]
    fn test_outbreak_conditions_classify_high() {
        // Flood + toxic water + active outbreak
        let classifier = HeuristicClassifier::new();
        let result = classifier.classify(&metrics(400.0, 4.5, 0.9, 120)).unwrap();
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.confidence, CONFIDENCE_EXTREME);
    }

    #[test]
    fn test_boundary_conditions_classify_medium_with_lower_confidence() {
        // Moderate contamination, mild rainfall: lands in the middle band
        let classifier = HeuristicClassifier::new();
        let result = classifier.classify(&metrics(100.0, 6.5, 0.5, 30)).unwrap();
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.confidence, CONFIDENCE_MIDBAND);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = HeuristicClassifier::new();
        let m = metrics(250.0, 5.5, 0.8, 45);
        assert_eq!(
            classifier.classify(&m).unwrap(),
            classifier.classify(&m).unwrap()
        );
    }

    #[test]
    fn test_high_sensitivity_lowers_the_bar() {
        let strict = HeuristicClassifier::with_thresholds(RiskThresholds::high_sensitivity());
        let relaxed = HeuristicClassifier::with_thresholds(RiskThresholds::low_sensitivity());
        // Score lands between the two high thresholds
        let m = metrics(200.0, 5.5, 0.7, 60);
        assert_eq!(strict.classify(&m).unwrap().risk_level, RiskLevel::High);
        assert!(relaxed.classify(&m).unwrap().risk_level < RiskLevel::High);
    }
}
