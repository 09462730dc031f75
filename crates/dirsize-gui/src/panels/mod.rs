/// Panels composed by the main window.

pub mod results_panel;
