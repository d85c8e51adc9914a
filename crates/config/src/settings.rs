// Application settings
// Loaded from ~/.config/quillgrid/settings.json

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shape new documents open with
    pub initial_rows: usize,
    pub initial_cols: usize,

    /// Pixel width given to new columns
    pub default_column_width: u32,

    /// Uniform row height used for pointer hit-testing
    pub row_height: f32,

    /// Pointer travel (px) below which a press counts as a click
    pub drag_threshold: f32,

    /// Undo snapshots kept before the oldest is evicted
    pub history_capacity: usize,

    /// Inline images allowed per cell
    pub max_images_per_cell: usize,

    /// Quiet time (ms) after the last change before autosave runs
    pub autosave_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_rows: 10,
            initial_cols: 2,
            default_column_width: 150,
            row_height: 32.0,
            drag_threshold: 5.0,
            history_capacity: 50,
            max_images_per_cell: 2,
            autosave_debounce_ms: 1000,
        }
    }
}

impl Settings {
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quillgrid").join("settings.json"))
    }

    /// Load settings from the config dir. Missing or unreadable files fall
    /// back to defaults — settings are never a reason the app won't start.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), String> {
        let path = Self::settings_path().ok_or("no config directory available")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, content).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_product_shape() {
        let settings = Settings::default();
        assert_eq!(settings.initial_rows, 10);
        assert_eq!(settings.initial_cols, 2);
        assert_eq!(settings.history_capacity, 50);
        assert_eq!(settings.max_images_per_cell, 2);
        assert_eq!(settings.autosave_debounce_ms, 1000);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings.initial_rows, 10);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "drag_threshold": 8.0 }"#).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.drag_threshold, 8.0);
        assert_eq!(settings.history_capacity, 50);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            default_column_width: 200,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        let reloaded = Settings::load_from(&path);
        assert_eq!(reloaded.default_column_width, 200);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.initial_cols, 2);
    }
}
