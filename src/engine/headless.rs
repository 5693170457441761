//! Windowless engine
//!
//! Advances time in fixed steps and records every request so a run can be
//! inspected afterwards.

use std::collections::BTreeMap;

use glam::{Mat4, Vec3};

use super::render::{Color, RenderCommand, RenderList, RenderMode, RenderService};
use super::scene::{CameraRig, CameraService, EntityId, EntityService, LightService, SpatialPartition};
use super::timer::{ClockHandle, ManualTimers, TimerService};
use super::Engine;

/// An entity registered with the headless entity manager
#[derive(Debug, Clone)]
pub struct HeadlessEntity {
    pub asset_path: String,
    pub unique_id: String,
    pub transform: Mat4,
    pub physics: bool,
}

/// A point light
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadlessLight {
    pub position: Vec3,
    pub intensity: f32,
}

/// Octree root handed out by the headless engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessOctree {
    /// Build counter at creation (1-based)
    pub generation: u32,
    pub levels: u32,
    pub ideal_entity_count: u32,
    pub entity_count: usize,
}

#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    timers: ManualTimers,
    frame_dt: f32,
    frames: u64,
    render_list: RenderList,
    presented: Vec<RenderCommand>,
    render_calls: u64,
    screen_clears: u64,
    entity_updates: u64,
    entities: Vec<HeadlessEntity>,
    camera: CameraRig,
    lights: BTreeMap<u32, HeadlessLight>,
    octrees_built: u32,
}

impl HeadlessEngine {
    /// Create an engine that advances `frame_dt` seconds per frame
    pub fn new(frame_dt: f32) -> Self {
        Self {
            timers: ManualTimers::new(),
            frame_dt,
            frames: 0,
            render_list: RenderList::new(),
            presented: Vec::new(),
            render_calls: 0,
            screen_clears: 0,
            entity_updates: 0,
            entities: Vec::new(),
            camera: CameraRig::default(),
            lights: BTreeMap::new(),
            octrees_built: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds advanced since creation
    pub fn elapsed(&self) -> f64 {
        self.timers.elapsed()
    }

    /// Commands drawn by the most recent `render`
    pub fn presented(&self) -> &[RenderCommand] {
        &self.presented
    }

    /// Render calls issued since creation
    pub fn total_render_calls(&self) -> u64 {
        self.render_calls
    }

    pub fn screen_clears(&self) -> u64 {
        self.screen_clears
    }

    pub fn entity_updates(&self) -> u64 {
        self.entity_updates
    }

    pub fn entities(&self) -> &[HeadlessEntity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&HeadlessEntity> {
        self.entities.get(id.0 as usize)
    }

    pub fn camera(&self) -> CameraRig {
        self.camera
    }

    pub fn light(&self, index: u32) -> Option<HeadlessLight> {
        self.lights.get(&index).copied()
    }

    pub fn octrees_built(&self) -> u32 {
        self.octrees_built
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

impl Engine for HeadlessEngine {
    fn advance(&mut self) {
        self.frames += 1;
        self.timers.advance(self.frame_dt);
    }

    fn clear_screen(&mut self) {
        self.screen_clears += 1;
    }
}

impl TimerService for HeadlessEngine {
    fn gen_clock(&mut self) -> ClockHandle {
        self.timers.gen_clock()
    }

    fn delta_time(&mut self, clock: ClockHandle) -> f32 {
        self.timers.delta_time(clock)
    }

    fn start_timer(&mut self, duration: f32, clock: ClockHandle) {
        self.timers.start_timer(duration, clock);
    }

    fn is_timer_done(&mut self, clock: ClockHandle) -> bool {
        self.timers.is_timer_done(clock)
    }
}

impl RenderService for HeadlessEngine {
    fn add_cube(&mut self, transform: Mat4, color: Color, mode: RenderMode) {
        self.render_list.add_cube(transform, color, mode);
    }

    fn add_skybox(&mut self) {
        self.render_list.add_skybox();
    }

    fn render(&mut self) -> u32 {
        let calls = self.render_list.render();
        self.presented = self.render_list.commands().to_vec();
        self.render_calls += u64::from(calls);
        calls
    }

    fn clear_render_list(&mut self) {
        self.render_list.clear_render_list();
    }
}

impl EntityService for HeadlessEngine {
    fn add_entity(&mut self, asset_path: &str, unique_id: &str) -> EntityId {
        self.entities.push(HeadlessEntity {
            asset_path: asset_path.to_string(),
            unique_id: unique_id.to_string(),
            transform: Mat4::IDENTITY,
            physics: false,
        });
        log::debug!("Entity '{}' loaded from {}", unique_id, asset_path);
        EntityId((self.entities.len() - 1) as u32)
    }

    fn set_model_matrix(&mut self, entity: EntityId, transform: Mat4) {
        if let Some(e) = self.entities.get_mut(entity.0 as usize) {
            e.transform = transform;
        }
    }

    fn use_physics_solver(&mut self, entity: EntityId, enabled: bool) {
        if let Some(e) = self.entities.get_mut(entity.0 as usize) {
            e.physics = enabled;
        }
    }

    fn add_entities_to_render_list(&mut self) {
        for (i, e) in self.entities.iter().enumerate() {
            self.render_list.push(RenderCommand::Entity {
                id: EntityId(i as u32),
                transform: e.transform,
            });
        }
    }

    fn update_entities(&mut self) {
        self.entity_updates += 1;
    }
}

impl CameraService for HeadlessEngine {
    fn set_position_target_and_up(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.camera = CameraRig {
            position,
            target,
            up,
        };
    }
}

impl LightService for HeadlessEngine {
    fn set_light_position(&mut self, position: Vec3, index: u32) {
        self.lights.entry(index).or_default().position = position;
    }

    fn set_light_intensity(&mut self, intensity: f32, index: u32) {
        self.lights.entry(index).or_default().intensity = intensity;
    }
}

impl SpatialPartition for HeadlessEngine {
    type Octree = HeadlessOctree;

    fn build_octree(&mut self, levels: u32, ideal_entity_count: u32) -> HeadlessOctree {
        self.octrees_built += 1;
        HeadlessOctree {
            generation: self.octrees_built,
            levels,
            ideal_entity_count,
            entity_count: self.entities.len(),
        }
    }

    fn display_octree(&mut self, _root: &HeadlessOctree, octant: Option<u32>) {
        self.render_list.push(RenderCommand::Octant { id: octant });
    }
}
