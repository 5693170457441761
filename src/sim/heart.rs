//! The collectible heart

use glam::{Mat4, Vec3};

use super::grid::GridIndex;

/// Collectible sitting on one tile; rendered by the host as an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heart {
    position: Vec3,
    index: GridIndex,
}

impl Heart {
    pub fn new(position: Vec3, index: GridIndex) -> Self {
        Self { position, index }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn index(&self) -> GridIndex {
        self.index
    }

    pub fn set_position(&mut self, position: Vec3, index: GridIndex) {
        self.position = position;
        self.index = index;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }
}
