//! View Projector
//!
//! Maps the observation store (plus an optional simulation result) into
//! UI-ready map markers and chart series. Read-only: never mutates the
//! store, never merges simulated markers into the live set.

use serde::{Deserialize, Serialize};

use crate::logic::aggregate::{self, TrendPoint};
use crate::logic::risk::RiskLevel;
use crate::logic::simulation::SimulationResult;
use crate::logic::store::Observation;

// ============================================================================
// COORDINATE RESOLVER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// External geolocation collaborator: territory key -> coordinates.
///
/// A territory the resolver does not know is SKIPPED, never defaulted to
/// a fallback coordinate - rendering phantom risk at a wrong location is
/// worse than rendering nothing.
pub trait CoordinateResolver {
    fn resolve(&self, territory_key: &str) -> Option<Coordinates>;
}

// ============================================================================
// MAP MARKER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub territory_key: String,
    pub coordinates: Coordinates,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    /// True only for the projected observation of a simulation result;
    /// the UI renders these visually distinct from live markers
    pub is_simulated: bool,
}

impl MapMarker {
    fn from_observation(obs: &Observation, coordinates: Coordinates, is_simulated: bool) -> Self {
        Self {
            territory_key: obs.territory_key.clone(),
            coordinates,
            risk_level: obs.risk_level,
            confidence: obs.confidence,
            is_simulated,
        }
    }
}

// ============================================================================
// PROJECTIONS
// ============================================================================

/// Build the marker set for the map. If a simulation result is supplied,
/// its projected observation is prepended as an `is_simulated` marker; it
/// is never part of the persistent set.
pub fn to_map_markers(
    observations: &[Observation],
    resolver: &dyn CoordinateResolver,
    simulation: Option<&SimulationResult>,
) -> Vec<MapMarker> {
    let mut markers = Vec::with_capacity(observations.len() + 1);

    if let Some(sim) = simulation {
        match resolver.resolve(&sim.projected.territory_key) {
            Some(coords) => markers.push(MapMarker::from_observation(&sim.projected, coords, true)),
            None => log::debug!(
                "[Projector] No coordinates for simulated territory {}, skipped",
                sim.projected.territory_key
            ),
        }
    }

    for obs in observations {
        match resolver.resolve(&obs.territory_key) {
            Some(coords) => markers.push(MapMarker::from_observation(obs, coords, false)),
            None => log::debug!(
                "[Projector] No coordinates for territory {}, skipped",
                obs.territory_key
            ),
        }
    }

    markers
}

/// Chart series for the trend widget. Delegates to the aggregator so the
/// chart and the stats can never disagree on scoring.
pub fn to_trend_series(observations: &[Observation], window: usize) -> Vec<TrendPoint> {
    aggregate::compute_trend(observations, window)
}

// ============================================================================
// TESTS
// ============================================================================
