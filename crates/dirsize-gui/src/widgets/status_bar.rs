/// Bottom status bar: progress bar and status text.
use crate::state::{AppState, StatusKind};
use dirsize_core::model::size::format_count;
use egui::{Color32, Rect, Ui, Vec2};

const BAR_HEIGHT: f32 = 4.0;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    progress_bar(ui, state.progress_percent, state.progress_opacity());

    let color = match state.status_kind {
        StatusKind::Info => ui.visuals().text_color(),
        StatusKind::Success => Color32::from_rgb(0xa6, 0xe3, 0xa1),
        StatusKind::Warning => Color32::from_rgb(0xfa, 0xb3, 0x87),
        StatusKind::Error => Color32::from_rgb(0xf3, 0x8b, 0xa8),
    };
    let color_weak = ui.visuals().weak_text_color();

    ui.horizontal(|ui| {
        if state.is_busy() {
            ui.spinner();
        }

        let text = if state.status_text.is_empty() {
            "Ready"
        } else {
            state.status_text.as_str()
        };
        ui.label(egui::RichText::new(text).size(12.0).color(color));

        if !state.is_busy() && !state.results.is_empty() {
            let files: u64 = state.results.iter().map(|r| r.file_count).sum();
            ui.separator();
            ui.label(
                egui::RichText::new(format!("{} files", format_count(files)))
                    .size(12.0)
                    .color(color_weak),
            );

            if let Some(duration) = state.scan_duration {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{:.1}s", duration.as_secs_f64()))
                        .size(12.0)
                        .color(color_weak),
                );
            }

            if let Some(at) = state.finished_at {
                ui.separator();
                ui.label(
                    egui::RichText::new(at.format("%H:%M:%S").to_string())
                        .size(12.0)
                        .color(color_weak),
                );
            }
        }
    });
}

/// Full-width strip whose filled part is `percent` of the width. The fill
/// gets more opaque as the scan advances.
fn progress_bar(ui: &mut Ui, percent: u8, opacity: f32) {
    let width = ui.available_width();
    let (rect, _response) =
        ui.allocate_exact_size(Vec2::new(width, BAR_HEIGHT), egui::Sense::hover());
    let fill_w = width * (percent as f32 / 100.0).clamp(0.0, 1.0);
    if fill_w > 0.5 {
        let fill_rect = Rect::from_min_size(rect.min, Vec2::new(fill_w, BAR_HEIGHT));
        let color = ui.visuals().hyperlink_color.gamma_multiply(opacity);
        ui.painter_at(rect).rect_filled(fill_rect, 1.0, color);
    }
}
