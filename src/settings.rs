//! Game settings and preferences
//!
//! Persisted as JSON in the working directory; any read or parse failure
//! falls back to defaults so a broken file can never block startup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// User preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Periodic frame statistics in the shell log
    pub show_fps: bool,
    /// Render the starfield background
    pub starfield: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.1,
            sfx_volume: 1.0,
            show_fps: false,
            starfield: true,
        }
    }
}

impl Settings {
    const FILE: &'static str = "invaders-settings.json";

    /// Effective one-shot cue volume.
    pub fn cue_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE))
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings file: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        self.save_to(Path::new(Self::FILE));
    }

    fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("Failed to save settings: {err}");
                }
            }
            Err(err) => log::warn!("Failed to serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from(Path::new("does-not-exist.json"));
        assert!(settings.starfield);
        assert!((settings.master_volume - 0.1).abs() < 1e-6);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("invaders-settings-malformed.json");
        fs::write(&path, "{ not json").unwrap();
        let settings = Settings::load_from(&path);
        assert!(settings.starfield);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = std::env::temp_dir().join("invaders-settings-roundtrip.json");
        let mut settings = Settings::default();
        settings.starfield = false;
        settings.master_volume = 0.5;
        settings.save_to(&path);

        let loaded = Settings::load_from(&path);
        assert!(!loaded.starfield);
        assert!((loaded.cue_volume() - 0.5).abs() < 1e-6);
        let _ = fs::remove_file(&path);
    }
}
