//! The game board
//!
//! Owns the tiles, the heart and the score. When the knight lands on the
//! heart, the heart sweeps every tile (rows fastest, then columns), reviving
//! each one it visits, then lands on a fresh random tile.

use glam::{Mat4, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::grid::{GridDims, GridError, GridIndex};
use super::heart::Heart;
use super::tile::Tile;
use crate::consts::*;
use crate::engine::{ClockHandle, Color, RenderMode, RenderService, TimerService, colors};

/// Heart placement mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Heart sits still, waiting to be collected
    Idle,
    /// Heart is sweeping the board
    Relocating {
        /// Tile the heart currently occupies
        cursor: GridIndex,
        /// Time accumulated toward the next step (seconds)
        timer: f32,
    },
}

/// Reticule cube offsets from the center: top-left, bottom-right, bottom-left, top-right
const RETICULE_CORNERS: [Vec3; 4] = [
    Vec3::new(-RETICULE_OFFSET, 0.0, -RETICULE_OFFSET),
    Vec3::new(RETICULE_OFFSET, 0.0, RETICULE_OFFSET),
    Vec3::new(-RETICULE_OFFSET, 0.0, RETICULE_OFFSET),
    Vec3::new(RETICULE_OFFSET, 0.0, -RETICULE_OFFSET),
];

#[derive(Debug, Clone)]
pub struct Board {
    dims: GridDims,
    /// Row-major: `dims.slot(index)`
    tiles: Vec<Tile>,
    heart: Heart,
    score: u64,
    hearts_collected: u32,
    placement: Placement,
    place_time_step: f32,
    /// Drives the heart sweep; also queried when a heart is collected
    clock: ClockHandle,
    /// Drives tile sinking, independent of the sweep
    tile_clock: ClockHandle,
    rng: Pcg32,
    reticule_position: Vec3,
    enemy_reticule_position: Vec3,
}

impl Board {
    /// Lay out a board centered on the origin with the heart on a random tile
    pub fn new(
        dims: GridDims,
        place_time_step: f32,
        seed: u64,
        timers: &mut impl TimerService,
    ) -> Self {
        let tiles = dims
            .indices()
            .map(|index| {
                let color = if (index.row() + index.col()) % 2 == 0 {
                    colors::BLUE_CORNFLOWER
                } else {
                    colors::MAGENTA
                };
                Tile::new(dims.tile_center(index, SQUARE_SIZE), index, color)
            })
            .collect();

        let mut board = Self {
            dims,
            tiles,
            heart: Heart::new(Vec3::ZERO, GridIndex::ORIGIN),
            score: 0,
            hearts_collected: 0,
            placement: Placement::Idle,
            place_time_step,
            clock: timers.gen_clock(),
            tile_clock: timers.gen_clock(),
            rng: Pcg32::seed_from_u64(seed),
            reticule_position: Vec3::ZERO,
            enemy_reticule_position: Vec3::ZERO,
        };
        board.set_rand_heart_position();

        log::info!(
            "Board created: {}x{} tiles, heart at {}",
            dims.rows(),
            dims.cols(),
            board.heart.index()
        );
        board
    }

    pub fn dimensions(&self) -> GridDims {
        self.dims
    }

    /// Tile at `index`; indices from a larger board are rejected
    pub fn tile(&self, index: GridIndex) -> Result<&Tile, GridError> {
        let slot = self.dims.slot(index)?;
        Ok(&self.tiles[slot])
    }

    pub fn tile_mut(&mut self, index: GridIndex) -> Result<&mut Tile, GridError> {
        let slot = self.dims.slot(index)?;
        Ok(&mut self.tiles[slot])
    }

    /// Tile at raw coordinates
    pub fn tile_at(&self, row: i64, col: i64) -> Result<&Tile, GridError> {
        self.tile(self.dims.index(row, col)?)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Where a piece rests on the tile at `index`
    pub fn knight_position_on_tile(&self, index: GridIndex) -> Result<Vec3, GridError> {
        Ok(self.tile(index)?.knight_position())
    }

    pub fn heart(&self) -> &Heart {
        &self.heart
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn is_placing_heart(&self) -> bool {
        matches!(self.placement, Placement::Relocating { .. })
    }

    pub fn place_time_step(&self) -> f32 {
        self.place_time_step
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn hearts_collected(&self) -> u32 {
        self.hearts_collected
    }

    /// Score with the collection bonus applied
    pub fn total_score(&self) -> u64 {
        self.score * (u64::from(self.hearts_collected) + 1)
    }

    /// Add points to the raw score.
    /// Only non-negative whole increments are supported.
    pub fn add_to_score(&mut self, addition: u64) {
        self.score += addition;
    }

    pub fn reticule_position(&self) -> Vec3 {
        self.reticule_position
    }

    pub fn enemy_reticule_position(&self) -> Vec3 {
        self.enemy_reticule_position
    }

    pub fn move_reticule(&mut self, position: Vec3) {
        self.reticule_position = position;
    }

    pub fn move_enemy_reticule(&mut self, position: Vec3) {
        self.enemy_reticule_position = position;
    }

    /// Put the heart on a specific tile (does not change placement mode)
    pub fn place_heart(&mut self, index: GridIndex) -> Result<(), GridError> {
        let position = self.knight_position_on_tile(index)?;
        self.heart.set_position(position, index);
        Ok(())
    }

    /// Put the heart on a uniformly random tile
    pub fn set_rand_heart_position(&mut self) {
        let index = self.dims.random_index(&mut self.rng);
        self.move_heart(index);
    }

    /// Heart onto an index produced by this board's own dims
    fn move_heart(&mut self, index: GridIndex) {
        if let Err(e) = self.place_heart(index) {
            log::warn!("Heart move skipped: {}", e);
        }
    }

    /// One sweep step: revive the tile, then move the heart onto it
    fn sweep_to(&mut self, index: GridIndex) {
        if let Ok(tile) = self.tile_mut(index) {
            tile.check_and_revive();
        }
        self.move_heart(index);
    }

    /// Collect the heart if `grid_index` is where it sits.
    ///
    /// Starts the sweep from the first tile. Returns true on collection.
    pub fn handle_if_on_heart(
        &mut self,
        grid_index: GridIndex,
        timers: &mut impl TimerService,
    ) -> bool {
        if grid_index != self.heart.index() {
            return false;
        }

        self.hearts_collected += 1;
        self.score += 1;
        self.placement = Placement::Relocating {
            cursor: GridIndex::ORIGIN,
            timer: timers.delta_time(self.clock),
        };
        self.sweep_to(GridIndex::ORIGIN);

        log::info!(
            "Heart collected at {} (hearts: {}, score: {})",
            grid_index,
            self.hearts_collected,
            self.score
        );
        true
    }

    /// Per-frame update: animate tiles and step the heart sweep
    pub fn update(&mut self, timers: &mut impl TimerService) {
        let tile_dt = timers.delta_time(self.tile_clock);
        for tile in &mut self.tiles {
            tile.update(tile_dt);
        }

        let dt = timers.delta_time(self.clock);

        let Placement::Relocating { cursor, timer } = self.placement else {
            return;
        };

        let timer = timer + dt;
        if timer <= self.place_time_step {
            self.placement = Placement::Relocating { cursor, timer };
            return;
        }

        match self.dims.sweep_next(cursor) {
            Some(next) => {
                self.sweep_to(next);
                // The step restarts from this frame's delta, not from zero
                self.placement = Placement::Relocating {
                    cursor: next,
                    timer: dt,
                };
                log::debug!("Heart sweep at {}", next);
            }
            None => {
                self.placement = Placement::Idle;
                self.set_rand_heart_position();
                log::info!("Heart placed at {}", self.heart.index());
            }
        }
    }

    /// Queue every tile, then both reticules
    pub fn display(&self, render: &mut impl RenderService) {
        for tile in &self.tiles {
            tile.display(render);
        }

        display_reticule(render, self.reticule_position, colors::CYAN);
        display_reticule(render, self.enemy_reticule_position, colors::RED);
    }

    /// Back to a fresh game on the same board
    pub fn reset(&mut self) {
        self.score = 0;
        self.hearts_collected = 0;
        self.placement = Placement::Idle;
        for tile in &mut self.tiles {
            tile.reset();
        }
        self.set_rand_heart_position();
        log::info!("Board reset, heart at {}", self.heart.index());
    }
}

fn display_reticule(render: &mut impl RenderService, center: Vec3, color: Color) {
    for corner in RETICULE_CORNERS {
        let transform =
            Mat4::from_translation(center + corner) * Mat4::from_scale(Vec3::splat(RETICULE_SCALE));
        render.add_cube(transform, color, RenderMode::Solid);
    }
}
