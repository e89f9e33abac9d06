//! Data Source & Refresh Loop
//!
//! The external data-source contract plus the periodic refresh machinery.
//! Transport (HTTP, websocket, file replay) lives entirely behind the
//! `DataSource` trait; a transport failure means "no update this cycle",
//! never a crash. The refresh loop is a cancellable background thread -
//! cancellation is explicit on teardown (and automatic on drop) so an
//! orphaned timer can never keep mutating a discarded store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::logic::error::EngineResult;
use crate::logic::metrics::MetricsRecord;
use crate::logic::risk::RiskClassifier;
use crate::logic::store::{IngestOutcome, ObservationStore};

/// How often the loop re-checks its stop flag while waiting out the interval
const STOP_POLL_MS: u64 = 100;

// ============================================================================
// DATA SOURCE CONTRACT
// ============================================================================

/// One fetched reading, as delivered by the external data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSample {
    pub territory_key: String,
    pub metrics: MetricsRecord,
    pub timestamp: DateTime<Utc>,
}

/// External data-source collaborator. Implementations do their own
/// awaiting/retries; the engine only sees the completed batch.
pub trait DataSource {
    fn fetch_latest(&self) -> EngineResult<Vec<MetricsSample>>;
}

// ============================================================================
// REFRESH
// ============================================================================

/// Per-cycle outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub inserted: usize,
    pub replaced: usize,
    pub stale: usize,
    /// Samples rejected by validation or classifier failure
    pub rejected: usize,
}

/// Fetch one batch and apply it to the store. Each sample is atomic: a
/// rejected sample is counted and logged, the rest of the batch still
/// applies. A transport error propagates so the caller can distinguish
/// "no new data this cycle" from an applied (possibly empty) batch.
pub fn refresh_once(
    store: &mut ObservationStore,
    source: &dyn DataSource,
    classifier: &dyn RiskClassifier,
) -> EngineResult<RefreshSummary> {
    let samples = source.fetch_latest()?;
    Ok(apply_samples(store, samples, classifier))
}

/// Apply an already-fetched batch. Public so hosts that own their fetch
/// scheduling can still reuse the per-sample accounting.
pub fn apply_samples(
    store: &mut ObservationStore,
    samples: Vec<MetricsSample>,
    classifier: &dyn RiskClassifier,
) -> RefreshSummary {
    let mut summary = RefreshSummary::default();
    for sample in samples {
        match store.ingest(
            &sample.territory_key,
            sample.metrics,
            sample.timestamp,
            classifier,
        ) {
            Ok(IngestOutcome::Inserted(_)) => summary.inserted += 1,
            Ok(IngestOutcome::Replaced(_)) => summary.replaced += 1,
            Ok(IngestOutcome::Stale { .. }) => summary.stale += 1,
            Err(e) => {
                summary.rejected += 1;
                log::warn!("[Refresh] Sample for {} rejected: {}", sample.territory_key, e);
            }
        }
    }

    log::debug!(
        "[Refresh] Cycle applied: {} inserted, {} replaced, {} stale, {} rejected",
        summary.inserted,
        summary.replaced,
        summary.stale,
        summary.rejected
    );
    summary
}

// ============================================================================
// PERIODIC REFRESH LOOP
// ============================================================================

/// Handle to a running refresh loop. `stop()` (or dropping the handle)
/// halts the loop and joins the thread.
pub struct RefreshHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Signal the loop to stop and wait for it to exit
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start a periodic refresh: fetch + apply every `interval`.
///
/// The fetch runs outside the store lock, so in-flight simulations and
/// reads are never blocked by a slow source. Transport failures are
/// logged and the loop keeps going on last-known-good data.
pub fn start_refresh_loop(
    store: Arc<Mutex<ObservationStore>>,
    source: Arc<dyn DataSource + Send + Sync>,
    classifier: Arc<dyn RiskClassifier + Send + Sync>,
    interval: Duration,
) -> RefreshHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);

    let thread = thread::spawn(move || {
        log::info!("[Refresh] Loop started (interval {:?})", interval);
        while !stop_flag.load(Ordering::Relaxed) {
            match source.fetch_latest() {
                Ok(samples) => {
                    // Lock only while applying; the fetch already completed
                    let summary = apply_samples(&mut store.lock(), samples, classifier.as_ref());
                    if summary != RefreshSummary::default() {
                        log::info!(
                            "[Refresh] {} inserted, {} replaced, {} stale, {} rejected",
                            summary.inserted,
                            summary.replaced,
                            summary.stale,
                            summary.rejected
                        );
                    }
                }
                Err(e) => {
                    // No update this cycle; stay on last-known-good data
                    log::warn!("[Refresh] Fetch failed, skipping cycle: {}", e);
                }
            }

            // Sleep in short ticks so stop() is responsive
            let mut waited = Duration::ZERO;
            while waited < interval && !stop_flag.load(Ordering::Relaxed) {
                let tick = Duration::from_millis(STOP_POLL_MS).min(interval - waited);
                thread::sleep(tick);
                waited += tick;
            }
        }
        log::info!("[Refresh] Loop stopped");
    });

    RefreshHandle {
        stop,
        thread: Some(thread),
    }
}

// ============================================================================
// TESTS
// ============================================================================
