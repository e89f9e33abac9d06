//! Logic Module - Risk Engine Components
//!
//! Contains the engines that make up the risk pipeline:
//! ingest -> classify -> store -> aggregate -> project.
//!
//! ## Structure
//! - `metrics` - Normalized input records + validation
//! - `risk/` - Risk levels, classifier contract, heuristic fallback
//! - `store/` - Observation store (upsert by territory, stale-write guard)
//! - `aggregate/` - Stats, alerts, trend series (pure functions)
//! - `simulation/` - Digital-twin scenario projection
//! - `projector` - Map markers & chart series for the UI
//! - `source` - Data source contract + periodic refresh loop
//! - `recommendation` - Actionable recommendations per risk level
//! - `engine` - Facade bundling the above for the UI layer

pub mod error;
pub mod metrics;
pub mod risk;
pub mod store;
pub mod aggregate;
pub mod simulation;
pub mod projector;
pub mod source;
pub mod recommendation;
pub mod engine;
