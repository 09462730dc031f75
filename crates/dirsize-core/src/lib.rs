/// DirSize Core, folder size scanning with no UI dependencies.
///
/// # Modules
///
/// - [`fs`]: Filesystem access trait and the local implementation.
/// - [`model`]: Per-folder results and size formatting.
/// - [`scanner`]: Size calculator, background scan controller, progress events.
/// - [`report`]: CSV export of results.
/// - [`error`]: Error types.
pub mod error;
pub mod fs;
pub mod model;
pub mod report;
pub mod scanner;

pub use error::{FsError, ReportError, ScanError};
pub use model::{DirTotals, DirectorySizeResult};
pub use scanner::{ScanController, ScanEvent, ScanObserver, ScanOutcome, StartOutcome};
