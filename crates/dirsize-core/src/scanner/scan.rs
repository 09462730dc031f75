/// The scan loop that runs on the worker thread.
use super::calculator::DirectorySizeCalculator;
use super::progress::{percent_complete, CancelToken, ScanObserver, ScanOutcome};
use crate::error::FsError;
use crate::fs::FileSystem;
use crate::model::{DirTotals, DirectorySizeResult};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Size every direct subdirectory of `root`, one at a time.
///
/// Progress goes to `observer` after each processed subdirectory.
/// Cancellation is checked before each subdirectory, never during one. The
/// outcome is returned rather than delivered, so the caller decides when
/// `on_finished` fires.
pub fn scan<F, O>(fs: &F, root: &Path, observer: &O, cancel: &CancelToken) -> ScanOutcome
where
    F: FileSystem + ?Sized,
    O: ScanObserver + ?Sized,
{
    let calculator = DirectorySizeCalculator::new(fs);
    scan_with(fs, root, |dir| calculator.compute(dir), observer, cancel)
}

/// [`scan`] with the per-folder sizing supplied by the caller.
pub(crate) fn scan_with<F, C, O>(
    fs: &F,
    root: &Path,
    mut compute: C,
    observer: &O,
    cancel: &CancelToken,
) -> ScanOutcome
where
    F: FileSystem + ?Sized,
    C: FnMut(&Path) -> Result<DirTotals, FsError>,
    O: ScanObserver + ?Sized,
{
    let start = Instant::now();

    let subdirs = match fs.list_direct_subdirectories(root) {
        Ok(subdirs) => subdirs,
        Err(err) if err.is_access_denied() => {
            warn!("Cannot list {}: treating as empty", root.display());
            Vec::new()
        }
        Err(err) => return ScanOutcome::Failed(err.into()),
    };

    let total = subdirs.len();
    info!("Scanning {} subdirectories of {}", total, root.display());

    let mut results: Vec<DirectorySizeResult> = Vec::with_capacity(total);
    let mut processed = 0usize;

    for dir in subdirs {
        if cancel.is_cancelled() {
            info!("Scan of {} cancelled after {processed}/{total}", root.display());
            return ScanOutcome::Cancelled;
        }

        match compute(&dir) {
            Ok(totals) => {
                processed += 1;
                let result = DirectorySizeResult::new(&dir, totals);
                debug!(
                    "{}: {} bytes in {} files",
                    dir.display(),
                    result.size_bytes,
                    result.file_count
                );
                observer.on_progress(percent_complete(processed, total), &result);
                results.push(result);
            }
            Err(err) if err.is_access_denied() => {
                // The calculator absorbs these; other sizers may not.
                debug!("Skipping {}: {err}", dir.display());
                processed += 1;
            }
            Err(err) => {
                warn!("Scan of {} failed: {err}", root.display());
                return ScanOutcome::Failed(err.into());
            }
        }
    }

    // sort_by is stable, so equal sizes keep enumeration order.
    results.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));

    let duration = start.elapsed();
    info!(
        "Scan of {} complete: {} folders in {duration:?}",
        root.display(),
        results.len()
    );
    ScanOutcome::Completed { results, duration }
}
