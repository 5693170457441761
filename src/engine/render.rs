//! Render-list submission
//!
//! Submissions are fire-and-forget; only `render` reports anything back.

use glam::{Mat4, Vec3};

use super::scene::EntityId;

/// Linear RGB color
pub type Color = Vec3;

/// Named colors used by the board
pub mod colors {
    use super::Color;

    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
    pub const BLUE_CORNFLOWER: Color = Color::new(0.392, 0.584, 0.929);
    pub const DARK_GRAY: Color = Color::new(0.25, 0.25, 0.25);
}

/// How a primitive is rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Solid,
    Wire,
}

/// Render capability of the host engine
pub trait RenderService {
    /// Queue a unit cube with the given model transform
    fn add_cube(&mut self, transform: Mat4, color: Color, mode: RenderMode);

    /// Queue the skybox
    fn add_skybox(&mut self);

    /// Draw everything queued, returning the number of render calls
    fn render(&mut self) -> u32;

    /// Drop everything queued
    fn clear_render_list(&mut self);
}

/// One queued draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    Cube {
        transform: Mat4,
        color: Color,
        mode: RenderMode,
    },
    Entity {
        id: EntityId,
        transform: Mat4,
    },
    Octant {
        id: Option<u32>,
    },
    Skybox,
}

impl RenderCommand {
    /// World-space center of a cube command
    pub fn cube_center(&self) -> Option<Vec3> {
        match self {
            RenderCommand::Cube { transform, .. } => Some(transform.w_axis.truncate()),
            _ => None,
        }
    }
}

/// Recording render list
#[derive(Debug, Clone, Default)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Cube commands with the given color
    pub fn cubes_colored(&self, color: Color) -> impl Iterator<Item = &RenderCommand> {
        self.commands
            .iter()
            .filter(move |cmd| matches!(cmd, RenderCommand::Cube { color: c, .. } if *c == color))
    }
}

impl RenderService for RenderList {
    fn add_cube(&mut self, transform: Mat4, color: Color, mode: RenderMode) {
        self.push(RenderCommand::Cube {
            transform,
            color,
            mode,
        });
    }

    fn add_skybox(&mut self) {
        self.push(RenderCommand::Skybox);
    }

    fn render(&mut self) -> u32 {
        self.commands.len() as u32
    }

    fn clear_render_list(&mut self) {
        self.commands.clear();
    }
}
