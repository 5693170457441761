//! The player's knight
//!
//! Hops between tiles in L-shapes. Leaving a tile depletes it; landing on a
//! depleted tile counts as a fall. Landing on the heart collects it.

use std::collections::VecDeque;

use glam::{Mat4, Vec3};
use thiserror::Error;

use super::board::Board;
use super::grid::{GridDims, GridError, GridIndex};
use crate::consts::JUMP_HEIGHT;
use crate::engine::{ClockHandle, TimerService};
use crate::hop_position;

/// A requested hop, in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KnightMove {
    pub d_row: i32,
    pub d_col: i32,
}

impl KnightMove {
    /// Every L-shaped hop
    pub const ALL: [KnightMove; 8] = [
        KnightMove::new(-2, -1),
        KnightMove::new(-2, 1),
        KnightMove::new(-1, -2),
        KnightMove::new(-1, 2),
        KnightMove::new(1, -2),
        KnightMove::new(1, 2),
        KnightMove::new(2, -1),
        KnightMove::new(2, 1),
    ];

    pub const fn new(d_row: i32, d_col: i32) -> Self {
        Self { d_row, d_col }
    }

    pub fn is_knight_move(&self) -> bool {
        matches!((self.d_row.abs(), self.d_col.abs()), (1, 2) | (2, 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("({d_row}, {d_col}) is not a knight move")]
    NotAKnightMove { d_row: i32, d_col: i32 },
    #[error("hop from {from} by ({d_row}, {d_col}) leaves the board")]
    OffBoard {
        from: GridIndex,
        d_row: i32,
        d_col: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Jump {
    from: Vec3,
    to: Vec3,
    target: GridIndex,
    elapsed: f32,
}

#[derive(Debug, Clone)]
pub struct Knight {
    index: GridIndex,
    start: GridIndex,
    position: Vec3,
    jump: Option<Jump>,
    pending: VecDeque<KnightMove>,
    clock: ClockHandle,
    jump_duration: f32,
    hops: u32,
    falls: u32,
}

impl Knight {
    /// Stand the knight on `start`; the friendly reticule follows it
    pub fn new(
        board: &mut Board,
        start: GridIndex,
        jump_duration: f32,
        timers: &mut impl TimerService,
    ) -> Result<Self, GridError> {
        let position = board.knight_position_on_tile(start)?;
        board.move_reticule(position);
        Ok(Self {
            index: start,
            start,
            position,
            jump: None,
            pending: VecDeque::new(),
            clock: timers.gen_clock(),
            jump_duration,
            hops: 0,
            falls: 0,
        })
    }

    pub fn index(&self) -> GridIndex {
        self.index
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    pub fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    /// Idle with nothing queued
    pub fn is_ready(&self) -> bool {
        self.jump.is_none() && self.pending.is_empty()
    }

    pub fn hops(&self) -> u32 {
        self.hops
    }

    pub fn falls(&self) -> u32 {
        self.falls
    }

    /// Queue a hop. Only the shape is checked here; the board edge is
    /// checked when the hop starts.
    pub fn queue_move(&mut self, mv: KnightMove) -> Result<(), MoveError> {
        if !mv.is_knight_move() {
            return Err(MoveError::NotAKnightMove {
                d_row: mv.d_row,
                d_col: mv.d_col,
            });
        }
        self.pending.push_back(mv);
        Ok(())
    }

    /// Where a hop from the current tile would land
    pub fn target(&self, dims: GridDims, mv: KnightMove) -> Result<GridIndex, MoveError> {
        if !mv.is_knight_move() {
            return Err(MoveError::NotAKnightMove {
                d_row: mv.d_row,
                d_col: mv.d_col,
            });
        }
        dims.offset(self.index, mv.d_row, mv.d_col)
            .ok_or(MoveError::OffBoard {
                from: self.index,
                d_row: mv.d_row,
                d_col: mv.d_col,
            })
    }

    /// Hops that stay on the board from the current tile
    pub fn valid_moves(&self, dims: GridDims) -> impl Iterator<Item = KnightMove> + use<> {
        let from = self.index;
        KnightMove::ALL
            .into_iter()
            .filter(move |mv| dims.offset(from, mv.d_row, mv.d_col).is_some())
    }

    /// Per-frame update: advance the current hop or start the next queued one
    pub fn jump(&mut self, board: &mut Board, timers: &mut impl TimerService) {
        let dt = timers.delta_time(self.clock);

        if let Some(mut jump) = self.jump {
            jump.elapsed += dt;
            let t = if self.jump_duration > 0.0 {
                jump.elapsed / self.jump_duration
            } else {
                1.0
            };
            if t >= 1.0 {
                self.land(jump.target, board, timers);
            } else {
                self.position = hop_position(jump.from, jump.to, t, JUMP_HEIGHT);
                self.jump = Some(jump);
            }
            return;
        }

        while let Some(mv) = self.pending.pop_front() {
            match self.target(board.dimensions(), mv) {
                Ok(target) => {
                    self.take_off(target, board);
                    break;
                }
                Err(e) => log::debug!("Knight move rejected: {}", e),
            }
        }
    }

    fn take_off(&mut self, target: GridIndex, board: &mut Board) {
        let to = match board.knight_position_on_tile(target) {
            Ok(to) => to,
            Err(e) => {
                log::warn!("Knight hop cancelled: {}", e);
                return;
            }
        };
        if let Ok(tile) = board.tile_mut(self.index) {
            tile.deplete();
        }
        board.move_reticule(to);
        self.jump = Some(Jump {
            from: self.position,
            to,
            target,
            elapsed: 0.0,
        });
        log::debug!("Knight hops {} -> {}", self.index, target);
    }

    fn land(&mut self, target: GridIndex, board: &mut Board, timers: &mut impl TimerService) {
        self.index = target;
        if let Ok(position) = board.knight_position_on_tile(target) {
            self.position = position;
        }
        self.jump = None;
        self.hops += 1;

        if board.tile(target).is_ok_and(|tile| !tile.is_standable()) {
            self.falls += 1;
            log::info!("Knight fell through {} (falls: {})", target, self.falls);
        }
        board.handle_if_on_heart(target, timers);
    }

    /// Back to the starting tile with nothing queued
    pub fn reset(&mut self, board: &mut Board) {
        self.index = self.start;
        if let Ok(position) = board.knight_position_on_tile(self.start) {
            self.position = position;
        }
        self.jump = None;
        self.pending.clear();
        self.hops = 0;
        self.falls = 0;
        board.move_reticule(self.position);
    }
}

/// Shortest sequence of knight hops from `from` to `to`, if one exists
pub fn plan_route(dims: GridDims, from: GridIndex, to: GridIndex) -> Option<Vec<KnightMove>> {
    let mut came_from: Vec<Option<(GridIndex, KnightMove)>> = vec![None; dims.len()];
    let mut seen = vec![false; dims.len()];
    let mut queue = VecDeque::from([from]);
    seen[dims.slot(from).ok()?] = true;

    while let Some(current) = queue.pop_front() {
        if current == to {
            let mut route = Vec::new();
            let mut at = to;
            while at != from {
                let (prev, mv) = came_from[dims.slot(at).ok()?]?;
                route.push(mv);
                at = prev;
            }
            route.reverse();
            return Some(route);
        }

        for mv in KnightMove::ALL {
            let Some(next) = dims.offset(current, mv.d_row, mv.d_col) else {
                continue;
            };
            let Ok(slot) = dims.slot(next) else {
                continue;
            };
            if !seen[slot] {
                seen[slot] = true;
                came_from[slot] = Some((current, mv));
                queue.push_back(next);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ManualTimers;

    fn setup(rows: u32, cols: u32) -> (Board, Knight, ManualTimers) {
        let mut timers = ManualTimers::new();
        let dims = GridDims::new(rows, cols).unwrap();
        let mut board = Board::new(dims, 10.0, 1, &mut timers);
        // Keep the heart out of the way unless a test moves it
        board
            .place_heart(dims.index(i64::from(rows) - 1, i64::from(cols) - 1).unwrap())
            .unwrap();
        let knight = Knight::new(&mut board, GridIndex::ORIGIN, 0.5, &mut timers).unwrap();
        (board, knight, timers)
    }

    fn frame(knight: &mut Knight, board: &mut Board, timers: &mut ManualTimers, dt: f32) {
        timers.advance(dt);
        knight.jump(board, timers);
        board.update(timers);
    }

    #[test]
    fn test_knight_move_shapes() {
        assert!(KnightMove::ALL.iter().all(KnightMove::is_knight_move));
        assert!(!KnightMove::new(1, 1).is_knight_move());
        assert!(!KnightMove::new(0, 2).is_knight_move());
        assert!(!KnightMove::new(2, 2).is_knight_move());
    }

    #[test]
    fn test_queue_rejects_non_knight_move() {
        let (_board, mut knight, _timers) = setup(4, 8);
        assert_eq!(
            knight.queue_move(KnightMove::new(1, 1)),
            Err(MoveError::NotAKnightMove { d_row: 1, d_col: 1 })
        );
        assert!(knight.is_ready());
    }

    #[test]
    fn test_hop_arcs_and_lands() {
        let (mut board, mut knight, mut timers) = setup(4, 8);
        let rest = knight.position();
        knight.queue_move(KnightMove::new(1, 2)).unwrap();

        frame(&mut knight, &mut board, &mut timers, 0.25);
        assert!(knight.is_jumping());
        assert!(!board.tile(GridIndex::ORIGIN).unwrap().is_standable());

        frame(&mut knight, &mut board, &mut timers, 0.25);
        assert!(knight.is_jumping());
        assert!(knight.position().y > rest.y);

        frame(&mut knight, &mut board, &mut timers, 0.25);
        let target = board.dimensions().index(1, 2).unwrap();
        assert!(!knight.is_jumping());
        assert_eq!(knight.index(), target);
        assert_eq!(knight.position(), board.knight_position_on_tile(target).unwrap());
        assert_eq!(board.reticule_position(), knight.position());
        assert_eq!(knight.hops(), 1);
        assert_eq!(knight.falls(), 0);
    }

    #[test]
    fn test_off_board_move_is_dropped() {
        let (mut board, mut knight, mut timers) = setup(4, 8);
        knight.queue_move(KnightMove::new(-1, 2)).unwrap();
        knight.queue_move(KnightMove::new(2, 1)).unwrap();

        frame(&mut knight, &mut board, &mut timers, 0.1);
        assert!(knight.is_jumping(), "second move should start");
        for _ in 0..10 {
            frame(&mut knight, &mut board, &mut timers, 0.1);
        }
        assert_eq!(knight.index(), board.dimensions().index(2, 1).unwrap());
        assert_eq!(knight.hops(), 1);
    }

    #[test]
    fn test_landing_on_heart_collects() {
        let (mut board, mut knight, mut timers) = setup(4, 8);
        let target = board.dimensions().index(2, 1).unwrap();
        board.place_heart(target).unwrap();
        knight.queue_move(KnightMove::new(2, 1)).unwrap();

        for _ in 0..4 {
            frame(&mut knight, &mut board, &mut timers, 0.2);
        }
        assert_eq!(knight.index(), target);
        assert_eq!(board.hearts_collected(), 1);
        assert_eq!(board.score(), 1);
        assert!(board.is_placing_heart());
    }

    #[test]
    fn test_landing_on_depleted_tile_is_a_fall() {
        let (mut board, mut knight, mut timers) = setup(4, 8);
        knight.queue_move(KnightMove::new(1, 2)).unwrap();
        knight.queue_move(KnightMove::new(-1, -2)).unwrap();

        for _ in 0..10 {
            frame(&mut knight, &mut board, &mut timers, 0.2);
        }
        assert_eq!(knight.index(), GridIndex::ORIGIN);
        assert_eq!(knight.hops(), 2);
        assert_eq!(knight.falls(), 1);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let (mut board, mut knight, mut timers) = setup(4, 8);
        knight.queue_move(KnightMove::new(2, 1)).unwrap();
        for _ in 0..4 {
            frame(&mut knight, &mut board, &mut timers, 0.2);
        }
        knight.reset(&mut board);
        assert_eq!(knight.index(), GridIndex::ORIGIN);
        assert_eq!(knight.hops(), 0);
        assert!(knight.is_ready());
        assert_eq!(board.reticule_position(), knight.position());
    }

    #[test]
    fn test_valid_moves_from_corner() {
        let (board, knight, _timers) = setup(4, 8);
        let moves: Vec<KnightMove> = knight.valid_moves(board.dimensions()).collect();
        assert_eq!(moves, vec![KnightMove::new(1, 2), KnightMove::new(2, 1)]);
    }

    #[test]
    fn test_plan_route_reaches_target() {
        let dims = GridDims::new(4, 8).unwrap();
        let from = GridIndex::ORIGIN;
        let to = dims.index(0, 1).unwrap();
        let route = plan_route(dims, from, to).unwrap();
        assert!(!route.is_empty());

        let mut at = from;
        for mv in &route {
            at = dims.offset(at, mv.d_row, mv.d_col).unwrap();
        }
        assert_eq!(at, to);
        assert_eq!(plan_route(dims, from, from), Some(Vec::new()));
    }

    #[test]
    fn test_foreign_start_is_rejected() {
        let mut timers = ManualTimers::new();
        let mut board = Board::new(GridDims::new(3, 3).unwrap(), 10.0, 1, &mut timers);
        let foreign = GridDims::new(4, 8).unwrap().index(0, 5).unwrap();
        assert!(Knight::new(&mut board, foreign, 0.5, &mut timers).is_err());
        assert_eq!(plan_route(board.dimensions(), foreign, GridIndex::ORIGIN), None);
    }

    #[test]
    fn test_plan_route_unreachable_on_tiny_board() {
        let dims = GridDims::new(2, 2).unwrap();
        assert_eq!(plan_route(dims, GridIndex::ORIGIN, dims.index(1, 1).unwrap()), None);
    }
}
