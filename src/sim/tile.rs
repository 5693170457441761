//! Board tiles

use glam::{Mat4, Vec3};

use super::grid::GridIndex;
use crate::consts::*;
use crate::engine::{Color, RenderMode, RenderService, colors};

/// Whether a tile can be stood on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileState {
    #[default]
    Alive,
    /// The knight hopped off; the tile sinks until the heart revives it
    Depleted,
}

/// A single grid cell
#[derive(Debug, Clone)]
pub struct Tile {
    position: Vec3,
    index: GridIndex,
    color: Color,
    state: TileState,
    /// How far the tile has sunk below its rest position
    sink: f32,
}

impl Tile {
    pub fn new(position: Vec3, index: GridIndex, color: Color) -> Self {
        Self {
            position,
            index,
            color,
            state: TileState::Alive,
            sink: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn index(&self) -> GridIndex {
        self.index
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn sink(&self) -> f32 {
        self.sink
    }

    pub fn is_standable(&self) -> bool {
        self.state == TileState::Alive
    }

    /// Where a piece standing on this tile rests (top face center)
    pub fn knight_position(&self) -> Vec3 {
        self.position + Vec3::Y * (SQUARE_SIZE * 0.5)
    }

    pub fn deplete(&mut self) {
        self.state = TileState::Depleted;
    }

    /// Bring a depleted tile back. Returns true if anything changed.
    pub fn check_and_revive(&mut self) -> bool {
        if self.state == TileState::Alive {
            return false;
        }
        self.state = TileState::Alive;
        self.sink = 0.0;
        true
    }

    pub fn reset(&mut self) {
        self.state = TileState::Alive;
        self.sink = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        if self.state == TileState::Depleted && self.sink < TILE_SINK_DEPTH {
            self.sink = (self.sink + TILE_SINK_SPEED * dt).min(TILE_SINK_DEPTH);
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position - Vec3::Y * self.sink)
            * Mat4::from_scale(Vec3::splat(SQUARE_SIZE))
    }

    pub fn display(&self, render: &mut impl RenderService) {
        match self.state {
            TileState::Alive => render.add_cube(self.model_matrix(), self.color, RenderMode::Solid),
            TileState::Depleted => {
                render.add_cube(self.model_matrix(), colors::DARK_GRAY, RenderMode::Wire)
            }
        }
    }
}
