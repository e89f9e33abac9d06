//! Aggregate Types
//!
//! Derived views over the observation store: stats, alerts, trend
//! points. All of these are recomputed from a snapshot, never patched
//! incrementally, so they can never diverge from the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::risk::rules::CRITICAL_CONFIDENCE_MIN;
use crate::logic::risk::RiskLevel;

// ============================================================================
// SEVERITY
// ============================================================================

/// Canonical alert severity vocabulary. Risk levels map onto it through
/// `Severity::from_risk` - one table, no ad hoc severities anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    /// High risk confirmed with very high confidence
    Critical,
}

impl Severity {
    /// The one documented risk -> severity mapping:
    ///
    /// | risk   | confidence        | severity |
    /// |--------|-------------------|----------|
    /// | Low    | any               | Low      |
    /// | Medium | any               | Medium   |
    /// | High   | < 0.9             | High     |
    /// | High   | >= 0.9            | Critical |
    pub fn from_risk(risk: RiskLevel, confidence: f64) -> Self {
        match risk {
            RiskLevel::Low => Severity::Low,
            RiskLevel::Medium => Severity::Medium,
            RiskLevel::High => {
                if confidence >= CRITICAL_CONFIDENCE_MIN {
                    Severity::Critical
                } else {
                    Severity::High
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }
}

// ============================================================================
// ALERT
// ============================================================================

/// Auto-generated alert for an at-or-above-threshold observation.
///
/// Alerts are derived, never independently authored: the alert list is a
/// pure function of the current store snapshot, regenerated on every
/// aggregation pass. `created_at` mirrors the source observation's
/// timestamp so two passes over the same snapshot yield identical alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
    pub territory_key: String,
    pub source_observation_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// RISK HISTOGRAM
// ============================================================================

/// Per-level observation counts. Invariant: `low + medium + high == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskHistogram {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl RiskHistogram {
    pub fn increment(&mut self, risk: RiskLevel) {
        match risk {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }

    pub fn count(&self, risk: RiskLevel) -> u32 {
        match risk {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }

    pub fn sum(&self) -> u32 {
        self.low + self.medium + self.high
    }
}

// ============================================================================
// AGGREGATE STATS
// ============================================================================

/// Dashboard headline numbers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total: u32,
    pub risk_histogram: RiskHistogram,
    pub active_alerts: u32,
    pub avg_confidence: f64,
}

// ============================================================================
// TREND POINT
// ============================================================================

/// One point on the risk trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    /// Numeric risk score from the trend score table (20/50/85)
    pub score: f64,
}
