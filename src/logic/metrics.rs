//! Metrics Record
//!
//! Normalized input unit for the risk engine: one environmental reading
//! for one territory. Immutable once constructed - a changed reading is a
//! new record, never an edit.

use serde::{Deserialize, Serialize};

use crate::logic::error::{EngineError, EngineResult};

// ============================================================================
// FIELD DOMAINS
// ============================================================================

/// Water pH scale bounds
pub const PH_MIN: f64 = 0.0;
pub const PH_MAX: f64 = 14.0;

/// Contamination index bounds (normalized)
pub const CONTAMINATION_MIN: f64 = 0.0;
pub const CONTAMINATION_MAX: f64 = 1.0;

// ============================================================================
// METRICS RECORD
// ============================================================================

/// One normalized environmental reading.
///
/// - `rainfall`: millimeters, >= 0
/// - `ph_level`: water pH, 0..=14
/// - `contamination`: contamination index, 0..=1
/// - `cases_count`: reported disease cases
/// - `location`: human-readable place name (display field; the territory
///   key used for dedup is supplied separately at ingest time)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub rainfall: f64,
    pub ph_level: f64,
    pub contamination: f64,
    pub cases_count: u32,
    pub location: String,
}

impl MetricsRecord {
    /// Construct a validated record. Rejects the first out-of-domain field
    /// with a `Validation` error naming it.
    pub fn new(
        rainfall: f64,
        ph_level: f64,
        contamination: f64,
        cases_count: u32,
        location: &str,
    ) -> EngineResult<Self> {
        let record = Self {
            rainfall,
            ph_level,
            contamination,
            cases_count,
            location: location.trim().to_string(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Re-check every field domain. Used by the store so that ingest stays
    /// atomic even for records deserialized from outside.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.rainfall.is_finite() || self.rainfall < 0.0 {
            return Err(EngineError::Validation {
                field: "rainfall",
                reason: format!("{} must be a finite value >= 0", self.rainfall),
            });
        }
        if !self.ph_level.is_finite() || !(PH_MIN..=PH_MAX).contains(&self.ph_level) {
            return Err(EngineError::Validation {
                field: "ph_level",
                reason: format!("{} is outside [{}, {}]", self.ph_level, PH_MIN, PH_MAX),
            });
        }
        if !self.contamination.is_finite()
            || !(CONTAMINATION_MIN..=CONTAMINATION_MAX).contains(&self.contamination)
        {
            return Err(EngineError::Validation {
                field: "contamination",
                reason: format!(
                    "{} is outside [{}, {}]",
                    self.contamination, CONTAMINATION_MIN, CONTAMINATION_MAX
                ),
            });
        }
        if self.location.trim().is_empty() {
            return Err(EngineError::Validation {
                field: "location",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Construct a record by clamping every field into its domain instead
    /// of rejecting. Simulation-only path: "what if rainfall were driven
    /// unrealistically high" is a legitimate scenario, so out-of-domain
    /// values are clamped, never errors.
    pub(crate) fn clamped(
        rainfall: f64,
        ph_level: f64,
        contamination: f64,
        cases_count: f64,
        location: &str,
    ) -> Self {
        Self {
            rainfall: rainfall.max(0.0),
            ph_level: ph_level.clamp(PH_MIN, PH_MAX),
            contamination: contamination.clamp(CONTAMINATION_MIN, CONTAMINATION_MAX),
            cases_count: cases_count.round().clamp(0.0, u32::MAX as f64) as u32,
            location: location.to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
