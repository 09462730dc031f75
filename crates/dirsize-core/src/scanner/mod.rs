/// Scanner module, orchestrates folder size scans.
///
/// A scan runs on a dedicated worker thread and walks the direct
/// subdirectories of the root one at a time. The requesting side keeps a
/// [`ScanController`], which owns the only state shared with the worker:
/// the slot describing the active scan.
///
/// ```text
/// Idle --start_scan--> Running --{Completed | Cancelled | Failed}--> Idle
/// ```
///
/// The controller only returns to Idle once the terminal outcome has been
/// delivered, so a new scan never overlaps the delivery of the previous one.
pub mod calculator;
pub mod progress;
pub mod scan;

pub use calculator::DirectorySizeCalculator;
pub use progress::{CancelToken, ScanEvent, ScanObserver, ScanOutcome};
pub use scan::scan;

use crate::error::ScanError;
use crate::fs::{FileSystem, LocalFs};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

/// Maximum number of progress messages that may queue up in a channel
/// observer before the worker blocks on `send`.
///
/// One message is produced per top-level folder, so this only fills when
/// the consumer stops draining entirely.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 1_024;

/// What [`ScanController::start_scan`] did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new scan is now running.
    Started,
    /// A scan was already running. Cancellation was requested for it and
    /// no new scan was started.
    CancellingPrevious,
}

/// The scan currently occupying the controller.
struct ActiveScan {
    cancel: CancelToken,
}

/// Starts, cancels, and tracks the single active scan.
pub struct ScanController<F: FileSystem + 'static = LocalFs> {
    fs: Arc<F>,
    active: Arc<Mutex<Option<ActiveScan>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ScanController<LocalFs> {
    /// Controller over the local filesystem.
    pub fn new() -> Self {
        Self::with_fs(Arc::new(LocalFs))
    }
}

impl Default for ScanController<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem + 'static> ScanController<F> {
    pub fn with_fs(fs: Arc<F>) -> Self {
        Self {
            fs,
            active: Arc::new(Mutex::new(None)),
            worker: Mutex::new(None),
        }
    }

    /// Start scanning `root` on a background thread.
    ///
    /// An empty or non-directory root is rejected with
    /// [`ScanError::InvalidRoot`] before anything is scheduled; the observer
    /// is never called. If a scan is already running, this requests its
    /// cancellation and returns [`StartOutcome::CancellingPrevious`]
    /// without starting another one.
    pub fn start_scan<O: ScanObserver>(
        &self,
        root: impl AsRef<Path>,
        observer: O,
    ) -> Result<StartOutcome, ScanError> {
        let root = root.as_ref();
        if root.as_os_str().is_empty() || !self.fs.is_dir(root) {
            return Err(ScanError::InvalidRoot {
                path: root.to_path_buf(),
            });
        }

        // Held until the new slot is stored, so the worker cannot clear
        // the slot before it exists.
        let mut active = self.active.lock();
        if let Some(running) = active.as_ref() {
            info!("Scan already running, requesting cancellation");
            running.cancel.cancel();
            return Ok(StartOutcome::CancellingPrevious);
        }

        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let worker_slot = Arc::clone(&self.active);
        let fs = Arc::clone(&self.fs);
        let root = root.to_path_buf();

        info!("Starting scan of {}", root.display());
        let handle = thread::Builder::new()
            .name("dirsize-scanner".into())
            .spawn(move || {
                let outcome = scan::scan(&*fs, &root, &observer, &worker_cancel);
                // Still Running during delivery: a start_scan issued from
                // on_finished only cancels.
                observer.on_finished(outcome);
                worker_slot.lock().take();
            })
            .map_err(ScanError::Spawn)?;

        *active = Some(ActiveScan { cancel });
        // Any previous handle belongs to a worker that has already left
        // the slot, so dropping it only detaches a finishing thread.
        *self.worker.lock() = Some(handle);
        Ok(StartOutcome::Started)
    }

    /// Request cancellation of the running scan. No-op when idle.
    pub fn cancel_scan(&self) {
        if let Some(running) = self.active.lock().as_ref() {
            info!("Cancellation requested");
            running.cancel.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.lock().is_some()
    }

    /// Block until the last worker thread has exited.
    ///
    /// Once the terminal outcome has been received this returns almost
    /// immediately, and afterwards the controller is Idle. Returns at once
    /// when called from the worker itself (from an observer callback).
    pub fn wait_idle(&self) {
        let Some(handle) = self.worker.lock().take() else {
            return;
        };
        if handle.thread().id() == thread::current().id() {
            *self.worker.lock() = Some(handle);
            return;
        }
        if handle.join().is_err() {
            warn!("Scan worker panicked");
        }
    }
}
