/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes.
/// The scan thread communicates via a channel; state updates happen
/// in `process_scan_messages()` which runs once per frame.
use crate::settings::{Settings, WindowGeometry};
use crossbeam_channel::Receiver;
use dirsize_core::model::size::format_size;
use dirsize_core::report;
use dirsize_core::scanner::{ScanEvent, ScanOutcome, PROGRESS_CHANNEL_CAPACITY};
use dirsize_core::{DirectorySizeResult, ScanController, ScanError, StartOutcome};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Nothing has been analysed yet.
    Idle,
    /// A scan is running; progress bar and status text are live.
    Scanning,
    /// Cancellation was requested; waiting for the worker to stop.
    Cancelling,
    /// The last scan reached a terminal outcome.
    Finished,
}

/// How the status line should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Maximum number of scan messages drained from the channel per frame.
///
/// Prevents a backlog (e.g. after the window was hidden) from blocking the
/// render thread for a perceptible duration when it is eventually shown again.
const MAX_MESSAGES_PER_FRAME: usize = 300;

pub const INVALID_FOLDER_MESSAGE: &str = "Please select a valid folder.";

/// All application state.
pub struct AppState {
    // ── Scan ───────────────────────────────────────────
    pub phase: AppPhase,
    /// Contents of the folder path text field.
    pub path_input: String,
    controller: ScanController,
    events_rx: Option<Receiver<ScanEvent>>,
    pub progress_percent: u8,
    pub status_text: String,
    pub status_kind: StatusKind,

    // ── Results ────────────────────────────────────────
    /// Sorted largest first; empty until a scan completes.
    pub results: Vec<DirectorySizeResult>,
    pub scan_duration: Option<Duration>,
    pub finished_at: Option<chrono::DateTime<chrono::Local>>,
    pub last_export: Option<PathBuf>,

    // ── Dialogs ────────────────────────────────────────
    /// Message for the modal error dialog, if one is open.
    pub error_dialog: Option<String>,

    // ── Settings ───────────────────────────────────────
    pub settings: Settings,
    settings_path: Option<PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// State with default settings that are never written to disk.
    pub fn new() -> Self {
        Self::with_settings(Settings::default(), None)
    }

    /// State restored from `settings`, saved back to `settings_path`.
    pub fn with_settings(settings: Settings, settings_path: Option<PathBuf>) -> Self {
        let path_input = settings
            .restorable_directory()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            phase: AppPhase::Idle,
            path_input,
            controller: ScanController::new(),
            events_rx: None,
            progress_percent: 0,
            status_text: String::new(),
            status_kind: StatusKind::Info,
            results: Vec::new(),
            scan_duration: None,
            finished_at: None,
            last_export: None,
            error_dialog: None,
            settings,
            settings_path,
        }
    }

    /// Handle a click on the Analyze button.
    ///
    /// While a scan is running the button reads Cancel, so the click only
    /// requests cancellation and the path field is not looked at. Otherwise
    /// an invalid path opens the error dialog and changes nothing else.
    pub fn analyze(&mut self) {
        match self.phase {
            AppPhase::Scanning => {
                self.cancel_scan();
                return;
            }
            AppPhase::Cancelling => return,
            AppPhase::Idle | AppPhase::Finished => {}
        }
        // The previous outcome has been received; let its worker leave the
        // controller before asking for a new scan.
        self.controller.wait_idle();

        let path = PathBuf::from(self.path_input.trim());
        let (tx, rx) = crossbeam_channel::bounded(PROGRESS_CHANNEL_CAPACITY);

        let started = match self.controller.start_scan(&path, tx) {
            Ok(started) => started,
            Err(ScanError::InvalidRoot { .. }) => {
                self.error_dialog = Some(INVALID_FOLDER_MESSAGE.to_string());
                return;
            }
            Err(e) => {
                tracing::error!("Could not start scan: {e}");
                self.error_dialog = Some(format!("An error occurred: {e}"));
                return;
            }
        };

        self.settings.remember_directory(&path);
        self.save_settings();

        match started {
            StartOutcome::Started => {
                self.phase = AppPhase::Scanning;
                self.events_rx = Some(rx);
                self.results.clear();
                self.scan_duration = None;
                self.finished_at = None;
                self.last_export = None;
                self.progress_percent = 0;
                self.set_status("Analysis in progress...", StatusKind::Info);
            }
            StartOutcome::CancellingPrevious => {
                tracing::warn!("Previous scan still registered after its outcome");
                self.set_status("Previous analysis is still finishing.", StatusKind::Warning);
            }
        }
    }

    /// Cancel any running scan.
    pub fn cancel_scan(&mut self) {
        if self.phase == AppPhase::Scanning {
            self.controller.cancel_scan();
            self.phase = AppPhase::Cancelling;
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, AppPhase::Scanning | AppPhase::Cancelling)
    }

    /// Label of the combined Analyze / Cancel button.
    pub fn analyze_button_label(&self) -> &'static str {
        match self.phase {
            AppPhase::Scanning => "Cancel",
            AppPhase::Cancelling => "Cancelling...",
            AppPhase::Idle | AppPhase::Finished => "Analyze",
        }
    }

    /// Progress bar opacity: faint at the start, solid when done.
    pub fn progress_opacity(&self) -> f32 {
        0.2 + 0.8 * (self.progress_percent as f32 / 100.0)
    }

    pub fn total_size(&self) -> u64 {
        self.results.iter().map(|r| r.size_bytes).sum()
    }

    /// Drain pending scan messages and update state.
    ///
    /// Called once per frame; returns `true` if the UI should repaint.
    pub fn process_scan_messages(&mut self) -> bool {
        let mut repaint = false;
        for _ in 0..MAX_MESSAGES_PER_FRAME {
            let msg = match self.events_rx.as_ref().map(|rx| rx.try_recv()) {
                Some(Ok(msg)) => msg,
                _ => break,
            };
            repaint = true;
            match msg {
                ScanEvent::Progress { percent, result } => {
                    self.progress_percent = percent;
                    self.status_text =
                        format!("Analysis in progress... {percent}% - {}", result.name);
                }
                ScanEvent::Finished(outcome) => {
                    self.finish(outcome);
                    break;
                }
            }
        }
        repaint
    }

    fn finish(&mut self, outcome: ScanOutcome) {
        self.events_rx = None;
        self.progress_percent = 0;
        self.phase = AppPhase::Finished;

        match outcome {
            ScanOutcome::Completed { results, duration } => {
                self.results = results;
                self.scan_duration = Some(duration);
                self.finished_at = Some(chrono::Local::now());
                if self.results.is_empty() {
                    self.set_status("No folder found or accessible.", StatusKind::Warning);
                } else {
                    let text = format!(
                        "Analysis complete - {} folders analysed - Total size: {}",
                        self.results.len(),
                        format_size(self.total_size())
                    );
                    self.set_status(&text, StatusKind::Success);
                }
            }
            ScanOutcome::Cancelled => {
                self.set_status("Analysis cancelled by user.", StatusKind::Warning);
            }
            ScanOutcome::Failed(e) => {
                self.set_status(&format!("Error: {e}"), StatusKind::Error);
                self.error_dialog = Some(format!("An error occurred: {e}"));
            }
        }
    }

    fn set_status(&mut self, text: &str, kind: StatusKind) {
        self.status_text = text.to_string();
        self.status_kind = kind;
    }

    /// Export the current results as CSV into `dir`.
    pub fn export_results_to(&mut self, dir: &Path) {
        if self.results.is_empty() {
            return;
        }
        match report::export_csv(&self.results, dir) {
            Ok(path) => {
                self.set_status(
                    &format!("Exported to {}", path.display()),
                    StatusKind::Success,
                );
                self.last_export = Some(path);
            }
            Err(e) => {
                tracing::warn!("Export failed: {e}");
                self.error_dialog = Some(format!("Export failed: {e}"));
            }
        }
    }

    /// Export into the user's documents folder (home as a fallback).
    pub fn export_results(&mut self) {
        let dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);
        self.export_results_to(&dir);
    }

    /// Record the current window bounds.
    ///
    /// While maximized only the flag changes, so the normal bounds survive
    /// for the next start-up.
    pub fn track_window(&mut self, left: f32, top: f32, width: f32, height: f32, maximized: bool) {
        match (&mut self.settings.window, maximized) {
            (Some(geometry), true) => geometry.maximized = true,
            (None, true) => {}
            (slot, false) => {
                *slot = Some(WindowGeometry {
                    left,
                    top,
                    width,
                    height,
                    maximized: false,
                });
            }
        }
    }

    /// Write settings to disk, if this state has a settings file.
    pub fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save_to(path) {
            tracing::warn!("Could not save settings: {e:#}");
        }
    }
}
