//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Board colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Palette {
    #[default]
    Classic,
    HighContrast,
}

impl Palette {
    pub fn as_str(&self) -> &'static str {
        match self {
            Palette::Classic => "Classic",
            Palette::HighContrast => "High contrast",
        }
    }

    /// Next scheme in the toggle cycle
    pub fn next(self) -> Self {
        match self {
            Palette::Classic => Palette::HighContrast,
            Palette::HighContrast => Palette::Classic,
        }
    }

    /// CSS colours: (background, grid, snake head, snake body, food, obstacle)
    pub fn colors(&self) -> [&'static str; 6] {
        match self {
            Palette::Classic => ["#111", "#1c1c1c", "#7fff00", "#3cb043", "#ff3b3b", "#8a8a8a"],
            Palette::HighContrast => ["#000", "#333", "#ffff00", "#ffffff", "#ff00ff", "#00ffff"],
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub palette: Palette,
    /// Draw faint tile outlines
    pub grid_lines: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Pause when the tab is hidden or the window loses focus
    pub auto_pause: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: Palette::Classic,
            grid_lines: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            auto_pause: true,
        }
    }
}

impl Settings {
    /// Volume actually applied to effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "wrap_snake_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
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

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Flip mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Switch to the next palette, returning it
    pub fn cycle_palette(&mut self) -> Palette {
        self.palette = self.palette.next();
        self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_volume() {
        let mut settings = Settings::default();
        assert!(settings.effective_volume() > 0.0);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_partial_settings_json() {
        let settings: Settings = serde_json::from_str(r#"{"palette":"HighContrast"}"#).unwrap();
        assert_eq!(settings.palette, Palette::HighContrast);
        assert!(settings.grid_lines);
    }

    #[test]
    fn test_palette_cycle() {
        let mut settings = Settings::default();
        assert_eq!(settings.cycle_palette(), Palette::HighContrast);
        assert_eq!(settings.palette.as_str(), "High contrast");
        assert_eq!(settings.cycle_palette(), Palette::Classic);
    }

    #[test]
    fn test_toggle_mute() {
        let mut settings = Settings::default();
        assert!(settings.toggle_mute());
        assert_eq!(settings.effective_volume(), 0.0);
        assert!(!settings.toggle_mute());
        assert!(settings.effective_volume() > 0.0);
    }
}
