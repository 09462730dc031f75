/// Top action bar -- folder path, Analyze/Cancel, export.
use crate::state::{AppPhase, AppState};
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("📁 DirSize")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        // Right-aligned buttons are laid out first so the path field can
        // take whatever width remains.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let can_export = !state.results.is_empty() && !state.is_busy();
            if ui
                .add_enabled(can_export, egui::Button::new("📤 Export CSV"))
                .on_hover_text(if can_export {
                    "Export results to CSV in your documents folder"
                } else {
                    "Run an analysis first to enable export"
                })
                .clicked()
            {
                state.export_results();
            }

            // One button for both actions; it turns into Cancel while running.
            let enabled = state.phase != AppPhase::Cancelling;
            let analyze_btn = ui.add_enabled(
                enabled,
                egui::Button::new(state.analyze_button_label()).min_size(egui::vec2(96.0, 28.0)),
            );
            if analyze_btn.clicked() {
                state.analyze();
            }

            let response = ui.add(
                egui::TextEdit::singleline(&mut state.path_input)
                    .hint_text("Folder to analyse")
                    .desired_width(f32::INFINITY),
            );
            // Enter in the path field behaves like the Analyze button.
            if response.lost_focus()
                && ui.input(|i| i.key_pressed(egui::Key::Enter))
                && !state.is_busy()
            {
                state.analyze();
            }
        });
    });
}
