//! Deterministic gameplay module
//!
//! All game rules live here. Nothing in this module touches a window:
//! - Time comes in through `TimerService` clocks
//! - Drawing goes out through `RenderService`
//! - Randomness comes from a seeded RNG owned by the board

pub mod board;
pub mod grid;
pub mod heart;
pub mod knight;
pub mod tile;

pub use board::{Board, Placement};
pub use grid::{GridDims, GridError, GridIndex};
pub use heart::Heart;
pub use knight::{Knight, KnightMove, MoveError, plan_route};
pub use tile::{Tile, TileState};
