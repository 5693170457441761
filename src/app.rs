//! Frame driver
//!
//! Wires the board and the knight into a host engine and runs the
//! update/display cycle once per frame.

use glam::Vec3;

use crate::consts::*;
use crate::engine::{ClockHandle, Engine, EntityId};
use crate::settings::Settings;
use crate::sim::{Board, GridError, GridIndex, Knight, KnightMove, MoveError};

pub struct Application<E: Engine> {
    engine: E,
    settings: Settings,
    board: Board,
    knight: Knight,
    knight_entity: EntityId,
    heart_entity: EntityId,
    /// Current octree root; replaced on every rebuild
    octree: Option<E::Octree>,
    octree_clock: ClockHandle,
    octree_started: bool,
    render_calls: u32,
}

impl<E: Engine> Application<E> {
    /// Configure the scene and create the board, knight and octree
    pub fn new(mut engine: E, settings: Settings) -> Result<Self, GridError> {
        let dims = settings.board_dims()?;
        let seed = settings.resolve_seed();

        engine.set_position_target_and_up(CAMERA_POSITION, CAMERA_TARGET, Vec3::Y);
        engine.set_light_position(KEY_LIGHT_POSITION, KEY_LIGHT_INDEX);
        engine.set_light_intensity(KEY_LIGHT_INTENSITY, KEY_LIGHT_INDEX);

        let octree = engine.build_octree(settings.octree_levels, settings.octree_ideal_entity_count);
        let octree_clock = engine.gen_clock();

        let mut board = Board::new(dims, settings.place_time_step, seed, &mut engine);
        let start = dims.index(i64::from(dims.rows() / 2), i64::from(dims.cols() / 2))?;
        let knight = Knight::new(&mut board, start, settings.jump_duration, &mut engine)?;

        let knight_entity = engine.add_entity(KNIGHT_ASSET, "Knight");
        engine.set_model_matrix(knight_entity, knight.model_matrix());
        engine.use_physics_solver(knight_entity, settings.using_physics);

        let heart_entity = engine.add_entity(HEART_ASSET, "Heart");
        engine.set_model_matrix(heart_entity, board.heart().model_matrix());

        engine.update_entities();

        log::info!(
            "Application initialized (seed: {}, physics: {})",
            seed,
            settings.using_physics
        );

        Ok(Self {
            engine,
            settings,
            board,
            knight,
            knight_entity,
            heart_entity,
            octree: Some(octree),
            octree_clock,
            octree_started: false,
            render_calls: 0,
        })
    }

    /// Advance one frame of game state
    pub fn update(&mut self) {
        self.engine.advance();

        self.knight.jump(&mut self.board, &mut self.engine);
        self.board.update(&mut self.engine);

        self.engine
            .set_model_matrix(self.knight_entity, self.knight.model_matrix());
        self.engine
            .set_model_matrix(self.heart_entity, self.board.heart().model_matrix());

        if self.settings.using_physics {
            self.rebuild_octree_if_due();
        }

        self.engine.update_entities();
        self.engine.add_entities_to_render_list();
    }

    fn rebuild_octree_if_due(&mut self) {
        if self.octree_started && !self.engine.is_timer_done(self.octree_clock) {
            return;
        }
        self.octree_started = true;
        self.engine
            .start_timer(self.settings.octree_rebuild_interval, self.octree_clock);
        // Release the old root before building its replacement
        self.octree = None;
        self.octree = Some(self.engine.build_octree(
            self.settings.octree_levels,
            self.settings.octree_ideal_entity_count,
        ));
        log::debug!("Octree rebuilt");
    }

    /// Draw one frame; returns the number of render calls
    pub fn display(&mut self) -> u32 {
        self.engine.clear_screen();

        if let Some(root) = &self.octree {
            self.engine.display_octree(root, self.settings.octant_display);
        }

        self.board.display(&mut self.engine);

        self.engine.add_skybox();
        self.render_calls = self.engine.render();
        self.engine.clear_render_list();
        self.render_calls
    }

    /// One full frame: update then display
    pub fn frame(&mut self) -> u32 {
        self.update();
        self.display()
    }

    pub fn queue_knight_move(&mut self, mv: KnightMove) -> Result<(), MoveError> {
        self.knight.queue_move(mv)
    }

    /// Point the enemy reticule at a tile
    pub fn target_enemy(&mut self, index: GridIndex) -> Result<(), GridError> {
        let position = self.board.knight_position_on_tile(index)?;
        self.board.move_enemy_reticule(position);
        Ok(())
    }

    /// Start a fresh game on the same board
    pub fn reset(&mut self) {
        self.board.reset();
        self.knight.reset(&mut self.board);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn knight(&self) -> &Knight {
        &self.knight
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn octree(&self) -> Option<&E::Octree> {
        self.octree.as_ref()
    }

    pub fn last_render_calls(&self) -> u32 {
        self.render_calls
    }
}

impl<E: Engine> Drop for Application<E> {
    fn drop(&mut self) {
        self.octree = None;
        log::info!(
            "Application released (score: {}, hearts: {})",
            self.board.score(),
            self.board.hearts_collected()
        );
    }
}
