//! Game settings and preferences
//!
//! Persisted as JSON next to the high score file. Loaded once at startup; a
//! missing or broken file just means defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;
use crate::highscores::DEFAULT_HIGH_SCORE_FILE;

/// Default settings file name, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// How the paddle is steered. Fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    #[default]
    Keyboard,
    Mouse,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Keyboard => "Keyboard",
            ControlMode::Mouse => "Mouse",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Paddle steering
    pub control_mode: ControlMode,

    /// Frames per second the loop paces to
    pub target_fps: u32,

    /// Where the high score lives
    pub high_score_file: String,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_mode: ControlMode::Keyboard,
            target_fps: TARGET_FPS,
            high_score_file: DEFAULT_HIGH_SCORE_FILE.to_string(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Frame rate with a sane floor
    pub fn effective_fps(&self) -> u32 {
        self.target_fps.clamp(1, 240)
    }

    /// Parse settings JSON, clamping volumes into range
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(json) = fs::read_to_string(path) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Bad settings file {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`. Failures are logged, never fatal.
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "control_mode": "mouse" }"#).expect("parse");
        assert_eq!(settings.control_mode, ControlMode::Mouse);
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.high_score_file, "highscore.txt");
    }

    #[test]
    fn test_control_mode_names() {
        let keyboard = Settings::from_json(r#"{ "control_mode": "keyboard" }"#).expect("parse");
        assert_eq!(keyboard.control_mode, ControlMode::Keyboard);
        assert!(Settings::from_json(r#"{ "control_mode": "Mouse" }"#).is_err());
        assert!(Settings::from_json(r#"{ "control_mode": "joystick" }"#).is_err());
    }

    #[test]
    fn test_volume_clamped() {
        let settings =
            Settings::from_json(r#"{ "master_volume": 3.0, "sfx_volume": -1.0 }"#).expect("parse");
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_malformed_file_defaults() {
        let path = std::env::temp_dir().join(format!(
            "brick_breaker_settings_bad_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ nope").expect("write");
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_load_keeps_seed() {
        let path = std::env::temp_dir().join(format!(
            "brick_breaker_settings_ok_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            seed: Some(1234),
            control_mode: ControlMode::Mouse,
            ..Default::default()
        };
        settings.save(&path);
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }
}
