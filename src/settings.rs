use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::i18n::Language;
use crate::recent_files::RecentFiles;
use crate::zoom;

pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 72;
pub const MIN_OPACITY_PERCENT: u32 = 10;

const CONFIG_DIR_NAME: &str = "LegacyNotepad";
const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_font_name")]
    pub font_name: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_font_weight")]
    pub font_weight: i32,

    #[serde(default)]
    pub font_italic: bool,

    #[serde(default)]
    pub font_underline: bool,

    /// `None` follows the system UI language.
    #[serde(default)]
    pub language: Option<Language>,

    #[serde(default)]
    pub word_wrap: bool,

    #[serde(default = "default_show_status_bar")]
    pub show_status_bar: bool,

    #[serde(default = "default_zoom")]
    pub zoom: u32,

    #[serde(default)]
    pub always_on_top: bool,

    #[serde(default = "default_window_opacity")]
    pub window_opacity: u8,

    #[serde(default)]
    pub custom_icon: Option<PathBuf>,

    #[serde(default)]
    pub recent_files: RecentFiles,
}

fn default_font_name() -> String {
    "Consolas".to_string()
}

fn default_font_size() -> u32 {
    16
}

fn default_font_weight() -> i32 {
    400 // FW_NORMAL
}

fn default_show_status_bar() -> bool {
    true
}

fn default_zoom() -> u32 {
    zoom::ZOOM_DEFAULT
}

fn default_window_opacity() -> u8 {
    255
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_name: default_font_name(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            font_italic: false,
            font_underline: false,
            language: None,
            word_wrap: false,
            show_status_bar: default_show_status_bar(),
            zoom: default_zoom(),
            always_on_top: false,
            window_opacity: default_window_opacity(),
            custom_icon: None,
            recent_files: RecentFiles::default(),
        }
    }
}

impl Settings {
    /// Load settings from the config directory, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let settings = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(settings) => {
                    tracing::info!(path = %path.display(), "loaded settings");
                    settings
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "corrupt settings, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read settings, using defaults");
                Self::default()
            }
        };
        settings.sanitized()
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// `<config_dir>/LegacyNotepad`, or the working directory when the
    /// platform has no config directory.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join(SETTINGS_FILE_NAME)
    }

    /// Replaces values a hand-edited file could carry out of range.
    pub fn sanitized(mut self) -> Self {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size) {
            self.font_size = default_font_size();
        }
        if self.font_name.trim().is_empty() {
            self.font_name = default_font_name();
        }
        if self.font_weight <= 0 {
            self.font_weight = default_font_weight();
        }
        self.zoom = zoom::sanitize(self.zoom);
        self.window_opacity = self
            .window_opacity
            .max(opacity_from_percent(MIN_OPACITY_PERCENT));
        self.recent_files.enforce_limit();
        self
    }

    pub fn opacity_percent(&self) -> u32 {
        (u32::from(self.window_opacity) * 100 + 127) / 255
    }

    pub fn set_opacity_percent(&mut self, percent: u32) {
        self.window_opacity = opacity_from_percent(percent);
    }
}

/// Converts a 10..=100 percentage into a layered-window alpha value.
pub fn opacity_from_percent(percent: u32) -> u8 {
    let percent = percent.clamp(MIN_OPACITY_PERCENT, 100);
    ((percent * 255 + 50) / 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.font_name, "Consolas");
        assert_eq!(settings.font_size, 16);
        assert_eq!(settings.font_weight, 400);
        assert!(!settings.word_wrap);
        assert!(settings.show_status_bar);
        assert_eq!(settings.zoom, 100);
        assert_eq!(settings.window_opacity, 255);
        assert_eq!(settings.language, None);
        assert!(settings.recent_files.is_empty());
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"word_wrap": true, "language": "Japanese"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(settings.word_wrap);
        assert_eq!(settings.language, Some(Language::Japanese));
        assert_eq!(settings.font_size, 16);
        assert!(settings.show_status_bar);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.font_name = "MS Gothic".to_string();
        settings.zoom = 150;
        settings.always_on_top = true;
        settings.recent_files.add(Path::new("notes.txt"));
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_out_of_range_values_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"font_size": 200, "zoom": 5000, "window_opacity": 0, "font_name": ""}"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.font_size, 16);
        assert_eq!(settings.zoom, 500);
        assert_eq!(settings.window_opacity, 26);
        assert_eq!(settings.font_name, "Consolas");
    }

    #[test]
    fn test_opacity_percent_conversion() {
        assert_eq!(opacity_from_percent(100), 255);
        assert_eq!(opacity_from_percent(50), 128);
        assert_eq!(opacity_from_percent(0), 26);
        assert_eq!(opacity_from_percent(250), 255);

        let mut settings = Settings::default();
        settings.set_opacity_percent(80);
        assert_eq!(settings.window_opacity, 204);
        assert_eq!(settings.opacity_percent(), 80);
    }

    #[test]
    fn test_reapplying_shown_percent_keeps_opacity() {
        let mut settings = Settings::default();
        for percent in MIN_OPACITY_PERCENT..=100 {
            settings.set_opacity_percent(percent);
            let alpha = settings.window_opacity;
            for _ in 0..4 {
                settings.set_opacity_percent(settings.opacity_percent());
                assert_eq!(settings.window_opacity, alpha, "{percent}%");
            }
            assert_eq!(settings.opacity_percent(), percent);
        }
    }
}
