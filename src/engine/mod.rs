//! Host engine capabilities
//!
//! The game never reaches for global managers. Every engine service it needs
//! is a trait here, passed in explicitly:
//! - `timer`: clocks and countdown timers
//! - `render`: render-list submission
//! - `scene`: entities, camera, lights and the octree
//! - `headless`: an engine without a window (used by the binary and tests)

pub mod headless;
pub mod render;
pub mod scene;
pub mod timer;

pub use headless::{HeadlessEngine, HeadlessOctree};
pub use render::{Color, RenderCommand, RenderList, RenderMode, RenderService, colors};
pub use scene::{CameraRig, CameraService, EntityId, EntityService, LightService, SpatialPartition};
pub use timer::{ClockHandle, ManualTimers, TimerService};

/// Everything the application needs from its host for one frame
pub trait Engine:
    TimerService + RenderService + EntityService + CameraService + LightService + SpatialPartition
{
    /// Advance system time (called once at the start of every frame)
    fn advance(&mut self);

    /// Clear the back buffer before display
    fn clear_screen(&mut self);
}
