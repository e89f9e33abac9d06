//! Observation Store
//!
//! Ordered collection of classified observations, one per territory.
//! Append-only with replace-on-refresh semantics: re-ingestion for a
//! known territory supersedes the stored observation ("last write wins"
//! by timestamp), it never accumulates history. Store size is therefore
//! bounded by territory count.

pub mod types;

pub use types::{IngestOutcome, Observation};

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::logic::error::{EngineError, EngineResult};
use crate::logic::metrics::MetricsRecord;
use crate::logic::risk::RiskClassifier;

// ============================================================================
// OBSERVATION STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct ObservationStore {
    by_territory: HashMap<String, Observation>,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a reading and upsert it keyed by territory.
    ///
    /// Atomic: validation or classifier failure leaves the store
    /// unchanged. A timestamp older than (or equal to) the stored
    /// observation's is rejected as stale BEFORE the classifier runs -
    /// out-of-order network responses must not overwrite fresher data.
    pub fn ingest(
        &mut self,
        territory_key: &str,
        metrics: MetricsRecord,
        timestamp: DateTime<Utc>,
        classifier: &dyn RiskClassifier,
    ) -> EngineResult<IngestOutcome> {
        metrics.validate()?;
        let key = territory_key.trim();
        if key.is_empty() {
            return Err(EngineError::Validation {
                field: "territory_key",
                reason: "must not be empty".to_string(),
            });
        }

        if let Some(existing) = self.by_territory.get(key) {
            if existing.timestamp >= timestamp {
                log::debug!(
                    "[Store] Stale write rejected for {}: {} <= stored {}",
                    key,
                    timestamp,
                    existing.timestamp
                );
                return Ok(IngestOutcome::Stale {
                    territory_key: key.to_string(),
                    rejected_timestamp: timestamp,
                    stored_timestamp: existing.timestamp,
                });
            }
        }

        let classification = classifier.classify(&metrics)?;
        let observation = Observation::new(key, metrics, classification, timestamp);

        let replaced = self
            .by_territory
            .insert(key.to_string(), observation.clone())
            .is_some();

        if replaced {
            log::debug!(
                "[Store] {} superseded ({} at {})",
                key,
                observation.risk_level,
                observation.timestamp
            );
            Ok(IngestOutcome::Replaced(observation))
        } else {
            log::debug!(
                "[Store] {} inserted ({} at {})",
                key,
                observation.risk_level,
                observation.timestamp
            );
            Ok(IngestOutcome::Inserted(observation))
        }
    }

    /// Snapshot of all live observations, most-recent-first.
    /// Equal timestamps tie-break on territory key for determinism.
    pub fn all(&self) -> Vec<Observation> {
        let mut list: Vec<Observation> = self.by_territory.values().cloned().collect();
        list.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.territory_key.cmp(&b.territory_key))
        });
        list
    }

    pub fn get(&self, territory_key: &str) -> Option<&Observation> {
        self.by_territory.get(territory_key.trim())
    }

    pub fn len(&self) -> usize {
        self.by_territory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_territory.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::error::EngineError;
    use crate::logic::risk::{Classification, HeuristicClassifier, RiskLevel};
    use chrono::TimeZone;

    struct FailingClassifier;
    impl RiskClassifier for FailingClassifier {
        fn classify(&self, _: &MetricsRecord) -> EngineResult<Classification> {
            Err(EngineError::ClassifierUnavailable("model not loaded".into()))
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn low_metrics(location: &str) -> MetricsRecord {
        MetricsRecord::new(10.0, 7.0, 0.05, 1, location).unwrap()
    }

    fn high_metrics(location: &str) -> MetricsRecord {
        MetricsRecord::new(400.0, 4.5, 0.9, 120, location).unwrap()
    }

    #[test]
    fn test_ingest_inserts_then_replaces() {
        let classifier = HeuristicClassifier::new();
        let mut store = ObservationStore::new();

        let first = store
            .ingest("Zone A", low_metrics("Zone A"), at(1), &classifier)
            .unwrap();
        assert!(matches!(first, IngestOutcome::Inserted(_)));

        let second = store
            .ingest("Zone A", high_metrics("Zone A"), at(2), &classifier)
            .unwrap();
        assert!(matches!(second, IngestOutcome::Replaced(_)));

        // Re-ingestion supersedes: one observation, the newer one
        let all = store.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].risk_level, RiskLevel::High);
        assert_eq!(all[0].timestamp, at(2));
    }

    #[test]
    fn test_stale_write_rejected() {
        let classifier = HeuristicClassifier::new();
        let mut store = ObservationStore::new();

        store
            .ingest("Zone T", high_metrics("Zone T"), at(10), &classifier)
            .unwrap();

        let outcome = store
            .ingest("Zone T", low_metrics("Zone T"), at(5), &classifier)
            .unwrap();
        assert!(outcome.is_stale());
        assert_eq!(store.get("Zone T").unwrap().timestamp, at(10));
        assert_eq!(store.get("Zone T").unwrap().risk_level, RiskLevel::High);

        // Equal timestamp is also a no-op
        let outcome = store
            .ingest("Zone T", low_metrics("Zone T"), at(10), &classifier)
            .unwrap();
        assert!(outcome.is_stale());

        // A newer write goes through
        let outcome = store
            .ingest("Zone T", low_metrics("Zone T"), at(15), &classifier)
            .unwrap();
        assert!(matches!(outcome, IngestOutcome::Replaced(_)));
        assert_eq!(store.get("Zone T").unwrap().risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_invalid_metrics_leave_store_unchanged() {
        let classifier = HeuristicClassifier::new();
        let mut store = ObservationStore::new();

        let bad = MetricsRecord {
            rainfall: -4.0,
            ph_level: 7.0,
            contamination: 0.1,
            cases_count: 0,
            location: "Zone A".into(),
        };
        let err = store.ingest("Zone A", bad, at(1), &classifier).unwrap_err();
        assert!(matches!(err, EngineError::Validation { field: "rainfall", .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_classifier_failure_leaves_store_on_last_known_good() {
        let good = HeuristicClassifier::new();
        let mut store = ObservationStore::new();
        store
            .ingest("Zone A", low_metrics("Zone A"), at(1), &good)
            .unwrap();

        let err = store
            .ingest("Zone A", high_metrics("Zone A"), at(2), &FailingClassifier)
            .unwrap_err();
        assert!(matches!(err, EngineError::ClassifierUnavailable(_)));

        // Still the t=1 observation
        let stored = store.get("Zone A").unwrap();
        assert_eq!(stored.timestamp, at(1));
        assert_eq!(stored.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_all_is_most_recent_first_with_key_tiebreak() {
        let classifier = HeuristicClassifier::new();
        let mut store = ObservationStore::new();

        store.ingest("Zone B", low_metrics("Zone B"), at(5), &classifier).unwrap();
        store.ingest("Zone C", low_metrics("Zone C"), at(9), &classifier).unwrap();
        store.ingest("Zone A", low_metrics("Zone A"), at(5), &classifier).unwrap();

        let all = store.all();
        let keys: Vec<&str> = all.iter().map(|o| o.territory_key.as_str()).collect();
        assert_eq!(keys, vec!["Zone C", "Zone A", "Zone B"]);
    }

    #[test]
    fn test_empty_territory_key_rejected() {
        let classifier = HeuristicClassifier::new();
        let mut store = ObservationStore::new();
        let err = store
            .ingest("  ", low_metrics("Zone A"), at(1), &classifier)
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation { field: "territory_key", .. }));
    }

    #[test]
    fn test_observation_serializes_for_the_ui() {
        let classifier = HeuristicClassifier::new();
        let mut store = ObservationStore::new();
        store
            .ingest("Zone A", high_metrics("Zone A"), at(1), &classifier)
            .unwrap();

        let json = serde_json::to_string(&store.all()).unwrap();
        assert!(json.contains("\"territory_key\":\"Zone A\""));
        assert!(json.contains("\"risk_level\":\"High\""));
    }
}
