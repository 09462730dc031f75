/// DirSize GUI: egui-based desktop frontend.
///
/// This crate contains all UI code. Scanning lives in `dirsize-core`.
pub mod app;
pub mod panels;
pub mod settings;
pub mod state;
pub mod widgets;

pub use app::{DirSizeApp, DirSizeState};
