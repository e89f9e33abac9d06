//! Risk Engine Facade
//!
//! Bundles the store with the injected classifier and coordinate
//! resolver and exposes the operations the UI layer binds against:
//! ingest / all / get / stats / alerts / trend / simulate / map_markers.
//! Everything here is synchronous over already-fetched data.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::constants::DEFAULT_ALERT_THRESHOLD;
use crate::logic::aggregate::{self, AggregateStats, Alert, TrendPoint};
use crate::logic::error::{EngineError, EngineResult};
use crate::logic::metrics::MetricsRecord;
use crate::logic::projector::{self, CoordinateResolver, MapMarker};
use crate::logic::risk::RiskClassifier;
use crate::logic::simulation::{self, SimulationResult};
use crate::logic::source::{self, DataSource, RefreshSummary};
use crate::logic::store::{IngestOutcome, Observation, ObservationStore};

// ============================================================================
// RISK ENGINE
// ============================================================================

pub struct RiskEngine {
    store: ObservationStore,
    classifier: Arc<dyn RiskClassifier + Send + Sync>,
    resolver: Arc<dyn CoordinateResolver + Send + Sync>,
}

impl RiskEngine {
    pub fn new(
        classifier: Arc<dyn RiskClassifier + Send + Sync>,
        resolver: Arc<dyn CoordinateResolver + Send + Sync>,
    ) -> Self {
        Self {
            store: ObservationStore::new(),
            classifier,
            resolver,
        }
    }

    // ------------------------------------------------------------------
    // Store operations
    // ------------------------------------------------------------------

    pub fn ingest(
        &mut self,
        territory_key: &str,
        metrics: MetricsRecord,
        timestamp: DateTime<Utc>,
    ) -> EngineResult<IngestOutcome> {
        self.store
            .ingest(territory_key, metrics, timestamp, self.classifier.as_ref())
    }

    /// Ingest with the current wall-clock timestamp
    pub fn ingest_now(
        &mut self,
        territory_key: &str,
        metrics: MetricsRecord,
    ) -> EngineResult<IngestOutcome> {
        self.ingest(territory_key, metrics, Utc::now())
    }

    /// Apply one fetched batch from a data source
    pub fn refresh(&mut self, data_source: &dyn DataSource) -> EngineResult<RefreshSummary> {
        source::refresh_once(&mut self.store, data_source, self.classifier.as_ref())
    }

    pub fn all(&self) -> Vec<Observation> {
        self.store.all()
    }

    pub fn get(&self, territory_key: &str) -> Option<&Observation> {
        self.store.get(territory_key)
    }

    // ------------------------------------------------------------------
    // Derived views (recomputed per call; nothing cached, nothing stale)
    // ------------------------------------------------------------------

    pub fn stats(&self) -> AggregateStats {
        aggregate::compute_stats(&self.store.all())
    }

    pub fn alerts(&self) -> Vec<Alert> {
        aggregate::compute_alerts(&self.store.all(), DEFAULT_ALERT_THRESHOLD)
    }

    pub fn trend(&self, window: usize) -> Vec<TrendPoint> {
        aggregate::compute_trend(&self.store.all(), window)
    }

    pub fn map_markers(&self, simulation: Option<&SimulationResult>) -> Vec<MapMarker> {
        projector::to_map_markers(&self.store.all(), self.resolver.as_ref(), simulation)
    }

    // ------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------

    /// Run a what-if scenario against the stored baseline for a
    /// territory. Read-only on the store; the result is ephemeral.
    pub fn simulate(
        &self,
        territory_key: &str,
        deltas: &BTreeMap<String, f64>,
    ) -> EngineResult<SimulationResult> {
        let baseline = self
            .store
            .get(territory_key)
            .ok_or_else(|| EngineError::UnknownTerritory(territory_key.to_string()))?;
        simulation::simulate(baseline, deltas, self.classifier.as_ref())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::projector::Coordinates;
    use crate::logic::risk::{HeuristicClassifier, RiskLevel};
    use chrono::TimeZone;

    struct FixedResolver;
    impl CoordinateResolver for FixedResolver {
        fn resolve(&self, _territory_key: &str) -> Option<Coordinates> {
            Some(Coordinates { lat: 11.0168, lng: 76.9558 })
        }
    }

    fn engine() -> RiskEngine {
        RiskEngine::new(Arc::new(HeuristicClassifier::new()), Arc::new(FixedResolver))
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn clean(location: &str) -> MetricsRecord {
        MetricsRecord::new(20.0, 7.2, 0.05, 2, location).unwrap()
    }

    fn outbreak(location: &str) -> MetricsRecord {
        MetricsRecord::new(400.0, 4.5, 0.9, 120, location).unwrap()
    }

    #[test]
    fn test_end_to_end_dashboard_cycle() {
        let mut engine = engine();
        engine.ingest("Zone A", clean("Zone A"), at(1)).unwrap();
        engine.ingest("Zone B", outbreak("Zone B"), at(2)).unwrap();
        engine.ingest("Zone C", outbreak("Zone C"), at(3)).unwrap();

        let stats = engine.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.risk_histogram.sum(), 3);
        assert_eq!(stats.active_alerts, 2);

        let alerts = engine.alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].territory_key, "Zone C");

        let trend = engine.trend(10);
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].score, RiskLevel::Low.trend_score());

        let markers = engine.map_markers(None);
        assert_eq!(markers.len(), 3);
    }

    #[test]
    fn test_simulation_does_not_perturb_the_store() {
        let mut engine = engine();
        engine.ingest("Zone A", clean("Zone A"), at(1)).unwrap();
        let before = engine.get("Zone A").unwrap().clone();

        let deltas: BTreeMap<String, f64> = [
            ("contamination_multiplier".to_string(), 10.0),
            ("cases_offset".to_string(), 200.0),
        ]
        .into_iter()
        .collect();
        let result = engine.simulate("Zone A", &deltas).unwrap();

        assert_eq!(result.baseline, before);
        assert_eq!(engine.get("Zone A").unwrap(), &before);
        assert_eq!(engine.stats().total, 1);
        // Projection escalated but the live view did not
        assert!(result.projected.risk_level > before.risk_level);
        assert_eq!(engine.alerts().len(), 0);
    }

    #[test]
    fn test_simulating_unknown_territory_is_its_own_error() {
        let engine = engine();
        let deltas: BTreeMap<String, f64> =
            [("rainfall_multiplier".to_string(), 2.0)].into_iter().collect();
        let err = engine.simulate("Atlantis", &deltas).unwrap_err();
        assert_eq!(err, EngineError::UnknownTerritory("Atlantis".into()));
    }

    #[test]
    fn test_simulated_marker_overlays_without_merging() {
        let mut engine = engine();
        engine.ingest("Zone A", clean("Zone A"), at(1)).unwrap();

        let deltas: BTreeMap<String, f64> =
            [("cases_offset".to_string(), 150.0)].into_iter().collect();
        let sim = engine.simulate("Zone A", &deltas).unwrap();

        let overlaid = engine.map_markers(Some(&sim));
        assert_eq!(overlaid.len(), 2);
        assert!(overlaid[0].is_simulated);

        // Dropping the overlay restores the live-only set
        assert_eq!(engine.map_markers(None).len(), 1);
    }

    #[test]
    fn test_reingestion_supersedes_in_derived_views() {
        let mut engine = engine();
        engine.ingest("Zone A", clean("Zone A"), at(1)).unwrap();
        assert_eq!(engine.alerts().len(), 0);

        engine.ingest("Zone A", outbreak("Zone A"), at(2)).unwrap();
        let stats = engine.stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.risk_histogram.high, 1);
        assert_eq!(engine.alerts().len(), 1);
    }
}
