//! Scenario Deltas
//!
//! The recognized "what-if" parameters and their parse/ordering rules.
//! No projection logic here - only the parameter table.

use std::collections::BTreeMap;

use crate::logic::error::{EngineError, EngineResult};

// ============================================================================
// PARAMETER TABLE
// ============================================================================

/// Which MetricsRecord field a delta targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaField {
    Rainfall,
    PhLevel,
    Contamination,
    CasesCount,
}

/// How a delta is applied. Multipliers always apply before offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeltaKind {
    Multiplier,
    Offset,
}

/// Every delta key the simulation engine accepts. Anything else is an
/// `UnknownParameter` error - silently ignoring a key would let a caller
/// believe a simulation ran when it had no effect.
pub const KNOWN_DELTAS: &[(&str, DeltaField, DeltaKind)] = &[
    ("cases_multiplier", DeltaField::CasesCount, DeltaKind::Multiplier),
    ("cases_offset", DeltaField::CasesCount, DeltaKind::Offset),
    ("contamination_multiplier", DeltaField::Contamination, DeltaKind::Multiplier),
    ("contamination_offset", DeltaField::Contamination, DeltaKind::Offset),
    ("ph_multiplier", DeltaField::PhLevel, DeltaKind::Multiplier),
    ("ph_offset", DeltaField::PhLevel, DeltaKind::Offset),
    ("rainfall_multiplier", DeltaField::Rainfall, DeltaKind::Multiplier),
    ("rainfall_offset", DeltaField::Rainfall, DeltaKind::Offset),
];

// ============================================================================
// PARSED DELTA
// ============================================================================

/// One validated delta, ready to apply
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDelta {
    pub key: String,
    pub field: DeltaField,
    pub kind: DeltaKind,
    pub value: f64,
}

/// Validate every key and fix the application order: multiplicative
/// deltas before additive, alphabetical among the same kind. Results are
/// reproducible regardless of how the caller built the map.
pub fn parse_deltas(deltas: &BTreeMap<String, f64>) -> EngineResult<Vec<ScenarioDelta>> {
    let mut parsed = Vec::with_capacity(deltas.len());
    for (key, value) in deltas {
        let (_, field, kind) = KNOWN_DELTAS
            .iter()
            .find(|(name, _, _)| name == key)
            .ok_or_else(|| EngineError::UnknownParameter(key.clone()))?;
        if !value.is_finite() {
            return Err(EngineError::Validation {
                field: "deltas",
                reason: format!("`{}` must be finite, got {}", key, value),
            });
        }
        parsed.push(ScenarioDelta {
            key: key.clone(),
            field: *field,
            kind: *kind,
            value: *value,
        });
    }
    // BTreeMap iteration is already alphabetical; a stable sort on kind
    // keeps that order within each group.
    parsed.sort_by_key(|d| d.kind);
    Ok(parsed)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn deltas(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_deltas(&deltas(&[("bogus_param", 2.0)])).unwrap_err();
        assert_eq!(err, EngineError::UnknownParameter("bogus_param".into()));
    }

    #[test]
    fn test_multipliers_order_before_offsets() {
        let parsed = parse_deltas(&deltas(&[
            ("rainfall_offset", 10.0),
            ("contamination_multiplier", 1.5),
            ("rainfall_multiplier", 2.0),
            ("cases_offset", 5.0),
        ]))
        .unwrap();
        let keys: Vec<&str> = parsed.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "contamination_multiplier",
                "rainfall_multiplier",
                "cases_offset",
                "rainfall_offset",
            ]
        );
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let err = parse_deltas(&deltas(&[("rainfall_multiplier", f64::NAN)])).unwrap_err();
        assert!(matches!(err, EngineError::Validation { field: "deltas", .. }));
    }
}
