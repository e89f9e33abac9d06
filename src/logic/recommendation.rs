//! Recommendation Engine
//!
//! Maps risk levels and environmental conditions to actionable
//! recommendations. Pure table lookup plus condition extras - no state,
//! no side effects.

use crate::logic::metrics::MetricsRecord;
use crate::logic::risk::RiskLevel;

// ============================================================================
// BASE ACTIONS (per risk level)
// ============================================================================

const HIGH_ACTIONS: &[&str] = &[
    "Immediate water supply shutdown recommended",
    "Deploy medical response team to affected area",
    "Emergency chlorination of water sources",
    "Issue public boil-water advisory",
    "Collect water samples for lab analysis",
    "Activate emergency water distribution points",
];

const MEDIUM_ACTIONS: &[&str] = &[
    "Increase water quality monitoring frequency",
    "Precautionary chlorination of water supply",
    "Alert local health authorities",
    "Schedule water quality testing",
    "Issue precautionary hygiene advisory",
];

const LOW_ACTIONS: &[&str] = &[
    "Continue routine water quality monitoring",
    "Log data for trend analysis",
    "Maintain standard purification protocols",
];

// ============================================================================
// CONDITION EXTRAS (appended regardless of level)
// ============================================================================

/// pH below this suggests industrial contamination
const CRITICAL_PH: f64 = 5.0;

/// Contamination above this warrants evacuation
const EXTREME_CONTAMINATION: f64 = 0.85;

/// Case counts above this strain hospital capacity
const HOSPITAL_CAPACITY_CASES: u32 = 80;

/// Rainfall (mm) above this means flooding risk
const SEVERE_FLOOD_RAINFALL: f64 = 300.0;

// ============================================================================
// RECOMMENDATION
// ============================================================================

/// Context-aware recommended actions for a classified reading
pub fn recommend(risk: RiskLevel, metrics: &MetricsRecord) -> Vec<String> {
    let base = match risk {
        RiskLevel::High => HIGH_ACTIONS,
        RiskLevel::Medium => MEDIUM_ACTIONS,
        RiskLevel::Low => LOW_ACTIONS,
    };
    let mut actions: Vec<String> = base.iter().map(|s| s.to_string()).collect();

    if metrics.ph_level < CRITICAL_PH {
        actions.push("Critical pH detected - investigate industrial contamination".to_string());
    }
    if metrics.contamination > EXTREME_CONTAMINATION {
        actions.push("Extreme contamination - evacuate nearby residents".to_string());
    }
    if metrics.cases_count > HOSPITAL_CAPACITY_CASES {
        actions.push("Hospital capacity alert - prepare overflow facilities".to_string());
    }
    if metrics.rainfall > SEVERE_FLOOD_RAINFALL {
        actions.push("Severe flooding risk - deploy flood barriers".to_string());
    }

    actions
}

/// Single display string, pipe-joined as the dashboard renders it
pub fn recommend_joined(risk: RiskLevel, metrics: &MetricsRecord) -> String {
    recommend(risk, metrics).join(" | ")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_risk_gets_routine_actions_only() {
        let metrics = MetricsRecord::new(20.0, 7.2, 0.1, 2, "Zone A").unwrap();
        let actions = recommend(RiskLevel::Low, &metrics);
        assert_eq!(actions.len(), LOW_ACTIONS.len());
        assert!(actions[0].contains("routine"));
    }

    #[test]
    fn test_conditions_append_extras() {
        // Toxic spill scenario: acidic, extreme contamination, outbreak, flood
        let metrics = MetricsRecord::new(400.0, 4.0, 0.95, 100, "Zone B").unwrap();
        let actions = recommend(RiskLevel::High, &metrics);
        assert_eq!(actions.len(), HIGH_ACTIONS.len() + 4);
        assert!(actions.iter().any(|a| a.contains("industrial contamination")));
        assert!(actions.iter().any(|a| a.contains("evacuate")));
        assert!(actions.iter().any(|a| a.contains("overflow facilities")));
        assert!(actions.iter().any(|a| a.contains("flood barriers")));
    }

    #[test]
    fn test_joined_output_is_pipe_separated() {
        let metrics = MetricsRecord::new(20.0, 7.2, 0.1, 2, "Zone A").unwrap();
        let joined = recommend_joined(RiskLevel::Medium, &metrics);
        assert_eq!(joined.matches(" | ").count(), MEDIUM_ACTIONS.len() - 1);
    }
}
