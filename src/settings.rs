//! Presentation settings and preferences
//!
//! Persisted separately from gameplay tuning: LocalStorage on the web, an
//! optional JSON file on native.

use serde::{Deserialize, Serialize};

/// Player-facing preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === End screen ===
    /// Add an encouragement line to the end-of-session message
    pub show_encouragement: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Behaviour ===
    /// Pause automatically when the tab is hidden or the window loses focus
    pub pause_on_blur: bool,
    /// Native frame rate (the web follows the display refresh rate)
    pub frame_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_encouragement: true,
            show_fps: false,
            pause_on_blur: true,
            frame_rate: 60,
        }
    }
}

impl Settings {
    /// Native frame interval in milliseconds
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.frame_rate.clamp(10, 240))
    }

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hop_dodge_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from `HOP_DODGE_SETTINGS` (a JSON file path) on native
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("HOP_DODGE_SETTINGS") else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.show_encouragement);
        assert!(settings.pause_on_blur);
        assert_eq!(settings.frame_interval_ms(), 16);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{ "show_fps": true, "frame_rate": 30 }"#);
        assert!(settings.show_fps);
        assert!(settings.show_encouragement);
        assert_eq!(settings.frame_interval_ms(), 33);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert_eq!(Settings::from_json("{ nope"), Settings::default());
    }

    #[test]
    fn test_frame_rate_clamped() {
        let settings = Settings {
            frame_rate: 0,
            ..Default::default()
        };
        assert_eq!(settings.frame_interval_ms(), 100);
    }
}
