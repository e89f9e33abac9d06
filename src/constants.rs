//! Central Configuration Constants
//!
//! Single source of truth for engine defaults. To change a default refresh
//! cadence or chart window, only edit this file.

use crate::logic::risk::RiskLevel;

/// Default interval between periodic data-source refreshes (seconds)
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

/// Default number of observations shown in the trend chart
pub const DEFAULT_TREND_WINDOW: usize = 20;

/// Risk level at or above which an alert is generated
pub const DEFAULT_ALERT_THRESHOLD: RiskLevel = RiskLevel::High;

/// Engine version
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name
pub const ENGINE_NAME: &str = "AquaSentinel";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get refresh interval from environment or use default
pub fn get_refresh_interval_secs() -> u64 {
    std::env::var("AQUASENTINEL_REFRESH_INTERVAL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
}

/// Get trend window from environment or use default
pub fn get_trend_window() -> usize {
    std::env::var("AQUASENTINEL_TREND_WINDOW")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TREND_WINDOW)
}
