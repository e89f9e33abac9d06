//! Error handling
//!
//! One taxonomy for every failure the engine can surface. The UI layer
//! needs to distinguish "bad input" from "classifier is down" from
//! "unknown simulation parameter" from "no such territory" - each gets
//! its own variant. Stale writes are deliberately NOT here: a rejected
//! stale ingest is a logged no-op (`IngestOutcome::Stale`), not an error.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed MetricsRecord - rejected, state unchanged
    #[error("invalid value for `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Simulation called with an unsupported delta key
    #[error("unknown simulation parameter `{0}`")]
    UnknownParameter(String),

    /// Simulation requested against a territory the store has never seen
    #[error("unknown territory `{0}`")]
    UnknownTerritory(String),

    /// The injected classifier could not produce a result.
    /// Store and aggregates stay on last-known-good data.
    #[error("risk classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Data source transport failure - treated as "no update this cycle"
    #[error("transport error: {0}")]
    Transport(String),
}

impl EngineError {
    /// Short machine-readable code for UI dispatch
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation { .. } => "validation",
            EngineError::UnknownParameter(_) => "unknown_parameter",
            EngineError::UnknownTerritory(_) => "unknown_territory",
            EngineError::ClassifierUnavailable(_) => "classifier_unavailable",
            EngineError::Transport(_) => "transport",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_field() {
        let err = EngineError::Validation {
            field: "ph_level",
            reason: "15 is outside [0, 14]".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ph_level"));
        assert!(msg.contains("15"));
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            EngineError::Validation { field: "rainfall", reason: "negative".into() },
            EngineError::UnknownParameter("bogus".into()),
            EngineError::UnknownTerritory("Atlantis".into()),
            EngineError::ClassifierUnavailable("model not loaded".into()),
            EngineError::Transport("connection refused".into()),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }
}
