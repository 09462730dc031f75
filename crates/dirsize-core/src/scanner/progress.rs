/// Scan progress reporting: the observer seam between the worker thread
/// and whoever presents the results.
///
/// The frontend uses the `Sender<ScanEvent>` observer and drains the
/// channel once per frame. Tests can implement [`ScanObserver`] directly.
use crate::error::ScanError;
use crate::model::DirectorySizeResult;
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Terminal state of a scan. Exactly one is produced per scan.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Every subdirectory was processed. Results are sorted by size,
    /// largest first; equal sizes keep enumeration order.
    Completed {
        results: Vec<DirectorySizeResult>,
        duration: Duration,
    },
    /// Cancellation was requested. Partial results are discarded.
    Cancelled,
    /// An unexpected error ended the scan. Partial results are discarded.
    Failed(ScanError),
}

/// Receives notifications from the scan worker.
///
/// Both methods run on the worker thread. Implementations that must touch
/// UI state should forward to that thread rather than do it here.
pub trait ScanObserver: Send + 'static {
    /// Called once per processed subdirectory, in processing order.
    /// `percent` is in `0..=100`.
    fn on_progress(&self, percent: u8, result: &DirectorySizeResult);

    /// Called exactly once, after the last progress notification.
    fn on_finished(&self, outcome: ScanOutcome);
}

/// Messages sent from the scan thread to the UI.
#[derive(Debug)]
pub enum ScanEvent {
    Progress {
        percent: u8,
        result: DirectorySizeResult,
    },
    Finished(ScanOutcome),
}

impl ScanObserver for Sender<ScanEvent> {
    fn on_progress(&self, percent: u8, result: &DirectorySizeResult) {
        // A dropped receiver just means nobody is listening any more.
        let _ = self.send(ScanEvent::Progress {
            percent,
            result: result.clone(),
        });
    }

    fn on_finished(&self, outcome: ScanOutcome) {
        let _ = self.send(ScanEvent::Finished(outcome));
    }
}

/// Cooperative cancellation flag shared between the requester and the
/// worker. Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the scan to stop at its next checkpoint.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// `round(processed * 100 / total)`, with `total == 0` reported as done.
pub fn percent_complete(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let processed = processed.min(total) as u64;
    let total = total as u64;
    ((processed * 100 + total / 2) / total) as u8
}
