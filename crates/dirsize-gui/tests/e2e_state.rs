/// End-to-end tests for `AppState`: the GUI application state machine.
///
/// These tests exercise the real business-logic paths of `AppState` without
/// spinning up an egui window, keeping them fast and deterministic.
///
/// **Scope:** All user-visible state transitions are covered:
///   - Path validation and the error dialog
///   - Scan lifecycle (start, progress messages, completion, cancellation)
///   - Status texts for each terminal outcome
///   - CSV export and remembered settings
///
/// The real scanner runs against `tempfile` trees, so no mocking is needed.
use dirsize_gui::settings::Settings;
use dirsize_gui::state::{AppPhase, AppState, StatusKind, INVALID_FOLDER_MESSAGE};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

/// ```text
/// root/
///   small/  a.txt (100)
///   large/  b.bin (200), sub/c.rs (300)
///   top.txt (50, ignored: not in a folder)
/// ```
fn make_temp_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let small = tmp.path().join("small");
    let sub = tmp.path().join("large").join("sub");
    fs::create_dir_all(&small).unwrap();
    fs::create_dir_all(&sub).unwrap();
    write_bytes(&small.join("a.txt"), 100);
    write_bytes(&tmp.path().join("large").join("b.bin"), 200);
    write_bytes(&sub.join("c.rs"), 300);
    write_bytes(&tmp.path().join("top.txt"), 50);
    tmp
}

/// Pump `process_scan_messages()` until the scan is over or the deadline
/// expires.
fn pump_until_done(state: &mut AppState) {
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    while state.is_busy() {
        assert!(
            std::time::Instant::now() < deadline,
            "scan did not complete within 30 seconds"
        );
        state.process_scan_messages();
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn analyze(state: &mut AppState, path: &Path) {
    state.path_input = path.to_string_lossy().into_owned();
    state.analyze();
}

// ── Validation ────────────────────────────────────────────────────────────────

/// An empty or missing path opens the error dialog and changes nothing else.
#[test]
fn invalid_path_shows_dialog_without_state_change() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing").to_string_lossy().into_owned();
    let mut state = AppState::new();

    for input in ["", "   ", missing.as_str()] {
        state.error_dialog = None;
        state.path_input = input.to_string();
        state.analyze();

        assert_eq!(state.error_dialog.as_deref(), Some(INVALID_FOLDER_MESSAGE));
        assert_eq!(state.phase, AppPhase::Idle);
        assert!(state.status_text.is_empty());
        assert_eq!(state.settings.last_directory, None);
    }
}

/// Surrounding whitespace in the path field is ignored.
#[test]
fn path_is_trimmed() {
    let tmp = make_temp_tree();
    let mut state = AppState::new();
    state.path_input = format!("  {}  ", tmp.path().display());
    state.analyze();
    assert_eq!(state.error_dialog, None);
    pump_until_done(&mut state);
    assert_eq!(state.results.len(), 2);
}

// ── Scan lifecycle ─────────────────────────────────────────────────────────────

/// After `analyze`, the phase is `Scanning` and the button turns into Cancel.
#[test]
fn analyze_sets_scanning_phase() {
    let tmp = make_temp_tree();
    let mut state = AppState::new();
    analyze(&mut state, tmp.path());

    assert_eq!(state.phase, AppPhase::Scanning);
    assert_eq!(state.analyze_button_label(), "Cancel");
    assert_eq!(state.status_text, "Analysis in progress...");
    pump_until_done(&mut state);
}

/// Completion publishes sorted results and a summary status line.
#[test]
fn scan_completes_with_sorted_results() {
    let tmp = make_temp_tree();
    let mut state = AppState::new();
    analyze(&mut state, tmp.path());
    pump_until_done(&mut state);

    assert_eq!(state.phase, AppPhase::Finished);
    assert_eq!(state.analyze_button_label(), "Analyze");
    assert_eq!(state.progress_percent, 0, "progress bar resets at the end");

    let names: Vec<&str> = state.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["large", "small"]);
    assert_eq!(state.results[0].size_bytes, 500);
    assert_eq!(state.results[0].file_count, 2);
    assert_eq!(state.total_size(), 600);

    assert_eq!(state.status_kind, StatusKind::Success);
    assert_eq!(
        state.status_text,
        "Analysis complete - 2 folders analysed - Total size: 600 bytes"
    );
    assert!(state.scan_duration.is_some());
    assert!(state.finished_at.is_some());
}

/// A folder without subfolders gets its own status message.
#[test]
fn scan_without_folders_reports_nothing_found() {
    let tmp = TempDir::new().unwrap();
    write_bytes(&tmp.path().join("lonely.txt"), 10);
    let mut state = AppState::new();
    analyze(&mut state, tmp.path());
    pump_until_done(&mut state);

    assert!(state.results.is_empty());
    assert_eq!(state.status_text, "No folder found or accessible.");
}

/// Cancelling must leave the busy phases. The scan may complete before the
/// flag is read, so either terminal status is accepted.
#[test]
fn cancel_scan_reaches_terminal_state() {
    let tmp = make_temp_tree();
    let mut state = AppState::new();
    analyze(&mut state, tmp.path());
    state.cancel_scan();
    assert_eq!(state.analyze_button_label(), "Cancelling...");

    pump_until_done(&mut state);
    assert_eq!(state.phase, AppPhase::Finished);
    assert!(
        state.status_text == "Analysis cancelled by user."
            || state.status_text.starts_with("Analysis complete"),
        "unexpected status {:?}",
        state.status_text
    );
}

/// Pressing Analyze while running requests cancellation rather than
/// starting a second scan.
#[test]
fn analyze_while_running_cancels() {
    let tmp = TempDir::new().unwrap();
    for i in 0..200 {
        let dir = tmp.path().join(format!("d{i:03}"));
        fs::create_dir(&dir).unwrap();
        write_bytes(&dir.join("f"), 16);
    }
    let mut state = AppState::new();
    analyze(&mut state, tmp.path());
    state.analyze();

    assert_eq!(state.phase, AppPhase::Cancelling);
    assert_eq!(state.analyze_button_label(), "Cancelling...");
    pump_until_done(&mut state);
    assert_eq!(state.phase, AppPhase::Finished);
}

/// While scanning the button reads Cancel, so it cancels even when the
/// path field was edited into something invalid.
#[test]
fn cancel_button_ignores_edited_path() {
    let tmp = make_temp_tree();
    let mut state = AppState::new();
    analyze(&mut state, tmp.path());
    assert_eq!(state.analyze_button_label(), "Cancel");

    state.path_input = "   ".to_string();
    state.analyze();
    assert_eq!(state.error_dialog, None);
    assert_eq!(state.phase, AppPhase::Cancelling);

    pump_until_done(&mut state);
    assert_eq!(state.phase, AppPhase::Finished);
}

/// A new scan can start right after the previous outcome was received.
#[test]
fn back_to_back_scans_both_complete() {
    let tmp = make_temp_tree();
    let mut state = AppState::new();
    for _ in 0..5 {
        analyze(&mut state, tmp.path());
        assert_eq!(state.phase, AppPhase::Scanning);
        pump_until_done(&mut state);
        assert_eq!(state.status_kind, StatusKind::Success);
    }
}

/// Starting a new scan clears the previous results.
#[test]
fn new_scan_resets_previous_results() {
    let tmp = make_temp_tree();
    let mut state = AppState::new();
    analyze(&mut state, tmp.path());
    pump_until_done(&mut state);
    assert!(!state.results.is_empty());

    analyze(&mut state, tmp.path());
    assert_eq!(state.phase, AppPhase::Scanning);
    assert!(state.results.is_empty(), "previous results must be cleared");
    pump_until_done(&mut state);
}

// ── Export & settings ──────────────────────────────────────────────────────────

#[test]
fn export_writes_csv_report() {
    let tmp = make_temp_tree();
    let out = TempDir::new().unwrap();
    let mut state = AppState::new();
    analyze(&mut state, tmp.path());
    pump_until_done(&mut state);

    state.export_results_to(out.path());
    let path = state.last_export.clone().expect("export path recorded");
    let text = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("large,"));
}

/// The analysed folder is remembered and written to the settings file.
#[test]
fn analysed_folder_is_persisted() {
    let tmp = make_temp_tree();
    let cfg = TempDir::new().unwrap();
    let settings_path = cfg.path().join("settings.json");

    let mut state = AppState::with_settings(Settings::default(), Some(settings_path.clone()));
    analyze(&mut state, tmp.path());
    pump_until_done(&mut state);

    let saved = Settings::load_from(&settings_path);
    assert_eq!(saved.last_directory.as_deref(), Some(tmp.path()));

    // A fresh state pre-fills the path field from the saved folder.
    let restored = AppState::with_settings(saved, None);
    assert_eq!(restored.path_input, tmp.path().to_string_lossy());
}

/// A remembered folder that no longer exists is not restored.
#[test]
fn vanished_last_directory_is_not_restored() {
    let tmp = TempDir::new().unwrap();
    let settings = Settings {
        last_directory: Some(tmp.path().join("deleted")),
        ..Default::default()
    };
    let state = AppState::with_settings(settings, None);
    assert!(state.path_input.is_empty());
}
