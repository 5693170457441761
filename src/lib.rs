//! Knight Move 3D - a knight-hopping board game prototype
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (board, tiles, heart, knight)
//! - `engine`: Capability traits for the host engine, plus a headless engine
//! - `app`: Per-frame driver wiring the board and knight into the engine
//! - `settings`: Data-driven game configuration

pub mod app;
pub mod engine;
pub mod settings;
pub mod sim;

pub use app::Application;
pub use settings::{Settings, SettingsError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Default board dimensions
    pub const NUM_ROWS: u32 = 4;
    pub const NUM_COLS: u32 = 8;
    /// Edge length of a tile in world units
    pub const SQUARE_SIZE: f32 = 1.0;

    /// Seconds between heart steps while it sweeps the board
    pub const PLACE_TIME_STEP: f32 = 0.1;

    /// Reticule cubes sit this far from the center on both axes
    pub const RETICULE_OFFSET: f32 = 0.4;
    /// Uniform scale of each reticule cube
    pub const RETICULE_SCALE: f32 = 0.2;

    /// Depleted tiles sink this far below the board (units)
    pub const TILE_SINK_DEPTH: f32 = 0.5;
    /// Sink speed of depleted tiles (units/s)
    pub const TILE_SINK_SPEED: f32 = 0.75;

    /// Knight hop duration (seconds)
    pub const JUMP_DURATION: f32 = 0.5;
    /// Apex height of a knight hop above the tile tops
    pub const JUMP_HEIGHT: f32 = 1.0;

    /// Octree rebuild cadence while physics is on (seconds)
    pub const OCTREE_REBUILD_INTERVAL: f32 = 0.5;
    pub const OCTREE_LEVELS: u32 = 2;
    pub const OCTREE_IDEAL_ENTITY_COUNT: u32 = 5;

    /// Asset paths resolved by the host engine
    pub const KNIGHT_ASSET: &str = "KnightMove3D/knight.obj";
    pub const HEART_ASSET: &str = "KnightMove3D/heart.obj";

    /// Camera rig
    pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 6.0, 5.0);
    pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

    /// Key light (index 0 is reserved for ambient)
    pub const KEY_LIGHT_INDEX: u32 = 1;
    pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(0.0, 10.0, 0.0);
    pub const KEY_LIGHT_INTENSITY: f32 = 2.0;
}

/// Parabolic hop height for normalized progress `t` in [0, 1]
#[inline]
pub fn hop_height(t: f32, apex: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    4.0 * apex * t * (1.0 - t)
}

/// Interpolate along a hop arc from `from` to `to`
#[inline]
pub fn hop_position(from: Vec3, to: Vec3, t: f32, apex: f32) -> Vec3 {
    from.lerp(to, t.clamp(0.0, 1.0)) + Vec3::Y * hop_height(t, apex)
}
