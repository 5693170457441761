//! Game settings
//!
//! Stored as JSON. Every field has a default, so partial files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{GridDims, GridError};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    pub rows: u32,
    pub cols: u32,
    /// Seconds between heart steps during a sweep
    pub place_time_step: f32,
    /// RNG seed; random per run when absent
    pub seed: Option<u64>,

    // === Knight ===
    /// Seconds per hop
    pub jump_duration: f32,

    // === Physics / octree ===
    pub using_physics: bool,
    pub octree_levels: u32,
    pub octree_ideal_entity_count: u32,
    /// Seconds between octree rebuilds
    pub octree_rebuild_interval: f32,
    /// Octant to display; every octant when absent
    pub octant_display: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: NUM_ROWS,
            cols: NUM_COLS,
            place_time_step: PLACE_TIME_STEP,
            seed: None,

            jump_duration: JUMP_DURATION,

            using_physics: true,
            octree_levels: OCTREE_LEVELS,
            octree_ideal_entity_count: OCTREE_IDEAL_ENTITY_COUNT,
            octree_rebuild_interval: OCTREE_REBUILD_INTERVAL,
            octant_display: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings, falling back to defaults if the file is missing or bad
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Validated board size
    pub fn board_dims(&self) -> Result<GridDims, GridError> {
        GridDims::new(self.rows, self.cols)
    }

    /// Configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
