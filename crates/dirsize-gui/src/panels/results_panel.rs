/// Results panel: one row per top-level folder, largest first.
use crate::state::{AppPhase, AppState};
use crate::widgets::size_bar::{share_percent, size_bar};
use dirsize_core::model::size::{format_count, format_size};
use egui::Ui;
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 20.0;

/// Draw the results table (central panel content).
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    if state.results.is_empty() {
        ui.centered_and_justified(|ui| {
            let hint = match state.phase {
                AppPhase::Scanning | AppPhase::Cancelling => "Analysing...",
                _ => "Choose a folder and press Analyze.",
            };
            ui.label(egui::RichText::new(hint).color(ui.visuals().weak_text_color()));
        });
        return;
    }

    // Bars are relative to the largest folder, which is always first.
    let largest = state.results.first().map(|r| r.size_bytes).unwrap_or(0);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(220.0).at_least(80.0))
        .column(Column::initial(90.0).at_least(60.0))
        .column(Column::initial(80.0).at_least(50.0))
        .column(Column::initial(130.0).at_least(60.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            for title in ["Folder", "Size", "Files", "", "Path"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.results.len(), |mut row| {
                let r = &state.results[row.index()];
                row.col(|ui| {
                    ui.label(format!("📁 {}", r.name));
                });
                row.col(|ui| {
                    ui.label(format_size(r.size_bytes));
                });
                row.col(|ui| {
                    ui.label(format_count(r.file_count));
                });
                row.col(|ui| {
                    size_bar(ui, share_percent(r.size_bytes, largest), 120.0, 10.0);
                });
                row.col(|ui| {
                    ui.label(
                        egui::RichText::new(r.full_path.to_string_lossy())
                            .color(ui.visuals().weak_text_color()),
                    );
                });
            });
        });
}
