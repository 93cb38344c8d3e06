//! Player preferences
//!
//! Persisted separately from the leaderboard under their own storage key.

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::sim::Theme;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Theme preselected on the theme screen
    pub theme: Theme,
    /// Draw the swipe trail
    pub show_trail: bool,
    /// Show the FPS readout
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Summer,
            show_trail: true,
            show_fps: false,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "fruit_slash_settings";

    /// Load stored settings, falling back to defaults on any error
    pub fn load() -> Self {
        match persistence::load_json(Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        persistence::save_json(Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
