//! Simulation Engine
//!
//! Digital-twin "what-if" projection: apply hypothetical deltas to a
//! baseline observation's metrics, reclassify, and return the projection
//! paired with the untouched baseline. Never writes to the observation
//! store - persisting a scenario as a real observation is a distinct,
//! explicit caller action, not a side effect of simulating.

pub mod deltas;

pub use deltas::{parse_deltas, DeltaField, DeltaKind, ScenarioDelta, KNOWN_DELTAS};

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::logic::error::EngineResult;
use crate::logic::metrics::MetricsRecord;
use crate::logic::risk::RiskClassifier;
use crate::logic::store::Observation;

// ============================================================================
// SIMULATION RESULT
// ============================================================================

/// Ephemeral projection result. Consumed by the caller, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// The observation the scenario started from, bit-for-bit unchanged
    pub baseline: Observation,
    /// The hypothetical observation after deltas + reclassification
    pub projected: Observation,
    /// The deltas that were applied, for display alongside the result
    pub deltas_applied: BTreeMap<String, f64>,
}

// ============================================================================
// SIMULATE
// ============================================================================

/// Run a scenario against a baseline observation.
///
/// Order of operations is fixed and documented in `deltas.rs`:
/// every multiplier first, then every offset, alphabetical within each
/// kind. Afterwards every field is clamped back into its valid domain -
/// "what if rainfall were driven unrealistically high" is a legitimate
/// question, so out-of-domain intermediate values clamp rather than fail.
///
/// Classification goes through the same `RiskClassifier` as live
/// ingestion so projected and real risk levels are always comparable.
pub fn simulate(
    baseline: &Observation,
    deltas: &BTreeMap<String, f64>,
    classifier: &dyn RiskClassifier,
) -> EngineResult<SimulationResult> {
    // Validate the whole delta set before touching anything
    let parsed = parse_deltas(deltas)?;

    let base = &baseline.metrics;
    let mut rainfall = base.rainfall;
    let mut ph_level = base.ph_level;
    let mut contamination = base.contamination;
    let mut cases_count = base.cases_count as f64;

    for delta in &parsed {
        let target = match delta.field {
            DeltaField::Rainfall => &mut rainfall,
            DeltaField::PhLevel => &mut ph_level,
            DeltaField::Contamination => &mut contamination,
            DeltaField::CasesCount => &mut cases_count,
        };
        match delta.kind {
            DeltaKind::Multiplier => *target *= delta.value,
            DeltaKind::Offset => *target += delta.value,
        }
    }

    let projected_metrics = MetricsRecord::clamped(
        rainfall,
        ph_level,
        contamination,
        cases_count,
        &base.location,
    );

    let classification = classifier.classify(&projected_metrics)?;
    let projected = Observation::new(
        &baseline.territory_key,
        projected_metrics,
        classification,
        Utc::now(),
    );

    log::debug!(
        "[Simulation] {} projected {} -> {} ({} deltas)",
        baseline.territory_key,
        baseline.risk_level,
        projected.risk_level,
        parsed.len()
    );

    Ok(SimulationResult {
        baseline: baseline.clone(),
        projected,
        deltas_applied: deltas.clone(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
