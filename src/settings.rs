//! Player preferences
//!
//! Read from LocalStorage on the web and from `settings.json` natively.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Dash / double jump particles
    pub particles: bool,
    /// Camera zoom (1.0 = one world pixel per screen pixel)
    pub camera_zoom: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            camera_zoom: 1.0,

            show_fps: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    /// Zoom limits accepted from stored settings
    pub const MIN_ZOOM: f32 = 0.25;
    pub const MAX_ZOOM: f32 = 4.0;

    /// Effective particle cap given the tuning cap
    pub fn max_particles(&self, tuning_cap: usize) -> usize {
        if self.particles { tuning_cap } else { 0 }
    }

    /// Zoom clamped to a usable range
    pub fn effective_zoom(&self) -> f32 {
        if self.camera_zoom.is_finite() {
            self.camera_zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM)
        } else {
            1.0
        }
    }

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "scrolling_platformer_settings";

    /// Native settings file, relative to the working directory
    #[allow(dead_code)]
    const SETTINGS_FILE: &'static str = "settings.json";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from `settings.json` if present
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::SETTINGS_FILE) {
            Ok(json) => {
                log::info!("Loaded settings from {}", Self::SETTINGS_FILE);
                Self::from_json_or_default(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_toggle_caps_pool() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(100), 100);
        settings.particles = false;
        assert_eq!(settings.max_particles(100), 0);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut settings = Settings::default();
        settings.camera_zoom = 50.0;
        assert_eq!(settings.effective_zoom(), Settings::MAX_ZOOM);
        settings.camera_zoom = f32::NAN;
        assert_eq!(settings.effective_zoom(), 1.0);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json_or_default(r#"{ "show_fps": true }"#);
        assert!(settings.show_fps);
        assert!(settings.particles);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json_or_default("[1, 2"), Settings::default());
    }
}
