//! Entity, camera, light and spatial-partition capabilities

use glam::{Mat4, Vec3};

/// Handle to an entity owned by the host's entity manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Entity lifecycle and physics registration
pub trait EntityService {
    /// Load a model by asset path and register it under `unique_id`
    fn add_entity(&mut self, asset_path: &str, unique_id: &str) -> EntityId;

    fn set_model_matrix(&mut self, entity: EntityId, transform: Mat4);

    fn use_physics_solver(&mut self, entity: EntityId, enabled: bool);

    /// Queue every entity (and its rigid body) for rendering
    fn add_entities_to_render_list(&mut self);

    /// Per-frame entity manager update
    fn update_entities(&mut self);
}

/// Camera placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

pub trait CameraService {
    fn set_position_target_and_up(&mut self, position: Vec3, target: Vec3, up: Vec3);
}

pub trait LightService {
    fn set_light_position(&mut self, position: Vec3, index: u32);
    fn set_light_intensity(&mut self, intensity: f32, index: u32);
}

/// Octree construction and debug display
///
/// The octree itself belongs to the host; the application only owns the root.
pub trait SpatialPartition {
    type Octree;

    /// Build a fresh octree over the current entities
    fn build_octree(&mut self, levels: u32, ideal_entity_count: u32) -> Self::Octree;

    /// Queue the octree for display; `None` shows every octant
    fn display_octree(&mut self, root: &Self::Octree, octant: Option<u32>);
}
