//! Observation Types
//!
//! Immutable, timestamped classified readings per territory. An
//! Observation is never mutated after creation - a changed reading
//! produces a new one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::metrics::MetricsRecord;
use crate::logic::risk::{Classification, RiskLevel};

// ============================================================================
// OBSERVATION
// ============================================================================

/// One classified reading for one territory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Unique observation ID
    pub id: Uuid,
    /// Dedup key: one live Observation per territory
    pub territory_key: String,
    pub metrics: MetricsRecord,
    pub risk_level: RiskLevel,
    /// Classifier confidence (0.0 - 1.0)
    pub confidence: f64,
    /// When the reading was taken (UTC)
    pub timestamp: DateTime<Utc>,
}

impl Observation {
    pub fn new(
        territory_key: &str,
        metrics: MetricsRecord,
        classification: Classification,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            territory_key: territory_key.to_string(),
            metrics,
            risk_level: classification.risk_level,
            confidence: classification.confidence,
            timestamp,
        }
    }
}

// ============================================================================
// INGEST OUTCOME
// ============================================================================

/// What happened to an ingest call. `Stale` is a logged no-op, not an
/// error: it is the store's only concurrency guard against out-of-order
/// network responses overwriting fresher data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IngestOutcome {
    /// First observation for this territory
    Inserted(Observation),
    /// Superseded an older observation for the same territory
    Replaced(Observation),
    /// Rejected: the stored observation is newer or equal
    Stale {
        territory_key: String,
        rejected_timestamp: DateTime<Utc>,
        stored_timestamp: DateTime<Utc>,
    },
}

impl IngestOutcome {
    /// The observation now stored, if this ingest changed the store
    pub fn observation(&self) -> Option<&Observation> {
        match self {
            IngestOutcome::Inserted(obs) | IngestOutcome::Replaced(obs) => Some(obs),
            IngestOutcome::Stale { .. } => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, IngestOutcome::Stale { .. })
    }
}
