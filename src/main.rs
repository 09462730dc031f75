//! DirSize: recursive size of every folder under a chosen directory.
//!
//! Thin binary entry point. All logic lives in the `dirsize-core`
//! and `dirsize-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging; RUST_LOG overrides the default level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("DirSize starting");

    let state = dirsize_gui::DirSizeState::build();

    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title("DirSize -- Folder Size Analyser")
        .with_inner_size([900.0, 600.0])
        .with_min_inner_size([500.0, 300.0]);
    if let Some(geometry) = state.window_geometry() {
        viewport = viewport
            .with_position([geometry.left, geometry.top])
            .with_inner_size([geometry.width, geometry.height])
            .with_maximized(geometry.maximized);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "DirSize",
        options,
        Box::new(|cc| Ok(Box::new(dirsize_gui::DirSizeApp::with_state(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
