//! AquaSentinel Core - Territory Risk State Engine
//!
//! Ingests raw environmental/epidemiological metrics per territory,
//! classifies them into risk levels, and maintains a consistent aggregate
//! view (stats, alerts, map markers, trend series) over the territory
//! collection. Supports non-destructive "digital twin" simulation against
//! a stored baseline.
//!
//! The engine is transport-agnostic: the data source, risk classifier, and
//! coordinate resolver are injected collaborators. Everything exposed here
//! is synchronous over already-fetched data.

pub mod constants;
pub mod logic;

// Re-export the surface the UI layer binds against.
pub use logic::aggregate::{
    compute_alerts, compute_stats, compute_trend, AggregateStats, Alert, RiskHistogram, Severity,
    TrendPoint,
};
pub use logic::engine::RiskEngine;
pub use logic::error::{EngineError, EngineResult};
pub use logic::metrics::MetricsRecord;
pub use logic::projector::{
    to_map_markers, to_trend_series, CoordinateResolver, Coordinates, MapMarker,
};
pub use logic::risk::{Classification, HeuristicClassifier, RiskClassifier, RiskLevel};
pub use logic::recommendation::{recommend, recommend_joined};
pub use logic::simulation::{simulate, SimulationResult};
pub use logic::source::{
    refresh_once, start_refresh_loop, DataSource, MetricsSample, RefreshHandle, RefreshSummary,
};
pub use logic::store::{IngestOutcome, Observation, ObservationStore};
