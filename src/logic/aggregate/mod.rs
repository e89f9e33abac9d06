//! Aggregator
//!
//! Pure functions from an observation snapshot to derived views. The
//! aggregator holds no state of its own, so there is no cache to
//! invalidate and no way for stats, alerts and the store to drift apart:
//! re-invoke after every store mutation and the views always match.

pub mod types;

pub use types::{AggregateStats, Alert, RiskHistogram, Severity, TrendPoint};

use crate::constants::DEFAULT_ALERT_THRESHOLD;
use crate::logic::risk::RiskLevel;
use crate::logic::store::Observation;

// ============================================================================
// STATS
// ============================================================================

/// Headline numbers for the dashboard. O(n) over the snapshot, reads no
/// hidden state.
pub fn compute_stats(observations: &[Observation]) -> AggregateStats {
    let mut histogram = RiskHistogram::default();
    let mut confidence_sum = 0.0;

    for obs in observations {
        histogram.increment(obs.risk_level);
        confidence_sum += obs.confidence;
    }

    let total = observations.len() as u32;
    let avg_confidence = if observations.is_empty() {
        0.0
    } else {
        confidence_sum / observations.len() as f64
    };

    AggregateStats {
        total,
        risk_histogram: histogram,
        active_alerts: count_at_or_above(observations, DEFAULT_ALERT_THRESHOLD),
        avg_confidence,
    }
}

fn count_at_or_above(observations: &[Observation], threshold: RiskLevel) -> u32 {
    observations
        .iter()
        .filter(|o| o.risk_level >= threshold)
        .count() as u32
}

// ============================================================================
// ALERTS
// ============================================================================

/// One alert per observation at or above `threshold`, most-recent-first.
/// Equal timestamps tie-break on territory key for determinism.
pub fn compute_alerts(observations: &[Observation], threshold: RiskLevel) -> Vec<Alert> {
    let mut flagged: Vec<&Observation> = observations
        .iter()
        .filter(|o| o.risk_level >= threshold)
        .collect();
    flagged.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.territory_key.cmp(&b.territory_key))
    });

    flagged
        .into_iter()
        .map(|obs| Alert {
            severity: Severity::from_risk(obs.risk_level, obs.confidence),
            message: alert_message(obs),
            territory_key: obs.territory_key.clone(),
            source_observation_id: obs.id,
            created_at: obs.timestamp,
        })
        .collect()
}

/// Alert text in the format the dashboard has always shown:
/// location, readings, confidence.
fn alert_message(obs: &Observation) -> String {
    let m = &obs.metrics;
    format!(
        "{} RISK detected at {}! Rainfall={}mm, pH={}, Contamination={}, Cases={}. Confidence: {:.1}%",
        obs.risk_level.as_str().to_uppercase(),
        m.location,
        m.rainfall,
        m.ph_level,
        m.contamination,
        m.cases_count,
        obs.confidence * 100.0
    )
}

// ============================================================================
// TREND
// ============================================================================

/// Time-ordered trend series over the last `window` observations.
/// Oldest-first (chart order); y-values come from the trend score table.
pub fn compute_trend(observations: &[Observation], window: usize) -> Vec<TrendPoint> {
    let mut ordered: Vec<&Observation> = observations.iter().collect();
    ordered.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.territory_key.cmp(&b.territory_key))
    });

    let start = ordered.len().saturating_sub(window);
    ordered[start..]
        .iter()
        .map(|obs| TrendPoint {
            timestamp: obs.timestamp,
            score: obs.risk_level.trend_score(),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
