/// Persisted user settings: last analysed folder and window geometry.
///
/// Stored as JSON under the platform config directory. A missing or
/// malformed file is not an error; defaults are used instead.
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "dirsize";
const FILE_NAME: &str = "settings.json";

/// Normal (non-maximized) window bounds plus the maximized flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub maximized: bool,
}

impl WindowGeometry {
    /// Only sane, on-screen geometry is restored.
    pub fn is_restorable(&self) -> bool {
        self.left >= 0.0 && self.top >= 0.0 && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_directory: Option<PathBuf>,
    pub window: Option<WindowGeometry>,
}

impl Settings {
    /// `<config_dir>/dirsize/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Load from `path`, falling back to defaults with a warning.
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serialising settings")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// The remembered folder, only if it still exists.
    pub fn restorable_directory(&self) -> Option<&Path> {
        self.last_directory.as_deref().filter(|p| p.is_dir())
    }

    /// Remember `path` as the last folder, only if it exists.
    pub fn remember_directory(&mut self, path: &Path) {
        if path.is_dir() {
            self.last_directory = Some(path.to_path_buf());
        }
    }

    /// The window geometry to restore at start-up, if any.
    pub fn restorable_window(&self) -> Option<WindowGeometry> {
        self.window.filter(WindowGeometry::is_restorable)
    }
}
