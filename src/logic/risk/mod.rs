//! Risk Module
//!
//! Risk levels, the classifier contract, and the heuristic fallback.
//! This is the CORE STEP - where a raw reading becomes Low/Medium/High.
//!
//! ## Structure
//! - `types`: Core types (RiskLevel, Classification)
//! - `rules`: Thresholds, score weights, trend score table
//! - `classifier`: Classifier trait + heuristic fallback implementation
//!
//! ## Usage
//! ```ignore
//! use aquasentinel_core::logic::risk::{HeuristicClassifier, RiskClassifier};
//!
//! let classifier = HeuristicClassifier::default();
//! let result = classifier.classify(&metrics)?;
//! match result.risk_level {
//!     RiskLevel::Low => println!("Routine monitoring"),
//!     RiskLevel::Medium => println!("Increase monitoring"),
//!     RiskLevel::High => println!("Action needed"),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod classifier;

// Re-export main types for convenience
pub use types::{Classification, RiskLevel};

pub use rules::{
    RiskThresholds,
    TREND_SCORE_LOW,
    TREND_SCORE_MEDIUM,
    TREND_SCORE_HIGH,
};

pub use classifier::{HeuristicClassifier, RiskClassifier};
