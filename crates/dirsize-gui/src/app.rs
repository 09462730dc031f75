/// Main `eframe::App` implementation for DirSize.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::settings::{Settings, WindowGeometry};
use crate::state::{AppPhase, AppState};
use crate::widgets;

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so the saved
/// window geometry is known when the viewport is created.
pub struct DirSizeState {
    pub(crate) inner: AppState,
}

impl DirSizeState {
    /// Load persisted settings from the platform config directory.
    pub fn build() -> Self {
        let path = Settings::default_path();
        let settings = match &path {
            Some(p) => Settings::load_from(p),
            None => {
                tracing::warn!("No config directory; settings will not be saved");
                Settings::default()
            }
        };
        Self {
            inner: AppState::with_settings(settings, path),
        }
    }

    /// Geometry to restore the main window to, if a sane one was saved.
    pub fn window_geometry(&self) -> Option<WindowGeometry> {
        self.inner.settings.restorable_window()
    }
}

/// The DirSize application.
pub struct DirSizeApp {
    state: AppState,
}

impl DirSizeApp {
    /// Create a new application instance from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: DirSizeState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self { state: state.inner }
    }

    /// Remember the window bounds and save settings when closing.
    fn track_viewport(&mut self, ctx: &egui::Context) {
        let (outer, inner, maximized, closing) = ctx.input(|i| {
            let vp = i.viewport();
            (
                vp.outer_rect,
                vp.inner_rect,
                vp.maximized.unwrap_or(false),
                vp.close_requested(),
            )
        });
        if let (Some(outer), Some(inner)) = (outer, inner) {
            self.state.track_window(
                outer.min.x,
                outer.min.y,
                inner.width(),
                inner.height(),
                maximized,
            );
        }
        if closing {
            self.state.save_settings();
        }
    }
}

impl eframe::App for DirSizeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Process background messages ───────────────────────────────────
        self.state.process_scan_messages();
        if self.state.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        self.track_viewport(ctx);

        let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if escape && self.state.phase == AppPhase::Scanning {
            self.state.cancel_scan();
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── Error dialog ──────────────────────────────────────────────────
        if let Some(message) = self.state.error_dialog.clone() {
            let mut open = true;
            let mut dismissed = false;
            egui::Window::new("Error")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .fixed_size([340.0, 0.0])
                .show(ctx, |ui| {
                    ui.add_space(8.0);
                    ui.label(message);
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            dismissed = true;
                        }
                    });
                });
            if !open || dismissed {
                self.state.error_dialog = None;
            }
        }

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Central panel (results) ───────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::results_panel::results_panel(ui, &self.state);
        });
    }
}
