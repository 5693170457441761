//! Board coordinates
//!
//! A `GridIndex` can only be obtained through a `GridDims`. Lookups check it
//! again against their own dims, so an index from a larger board is
//! rejected instead of aliasing another tile.

use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid index ({row}, {col}) is outside a {rows}x{cols} board")]
    OutOfRange {
        row: i64,
        col: i64,
        rows: u32,
        cols: u32,
    },
    #[error("board dimensions must be non-zero, got {rows}x{cols}")]
    Empty { rows: u32, cols: u32 },
}

/// Row/column of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridIndex {
    row: u32,
    col: u32,
}

impl GridIndex {
    /// First tile of every board
    pub const ORIGIN: GridIndex = GridIndex { row: 0, col: 0 };

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn col(&self) -> u32 {
        self.col
    }
}

impl std::fmt::Display for GridIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board size in tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    rows: u32,
    cols: u32,
}

impl GridDims {
    pub fn new(rows: u32, cols: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, row: i64, col: i64) -> bool {
        (0..i64::from(self.rows)).contains(&row) && (0..i64::from(self.cols)).contains(&col)
    }

    /// Validate a coordinate pair
    pub fn index(&self, row: i64, col: i64) -> Result<GridIndex, GridError> {
        if !self.contains(row, col) {
            return Err(GridError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(GridIndex {
            row: row as u32,
            col: col as u32,
        })
    }

    /// Step from `from` by a signed offset, if the result stays on the board
    pub fn offset(&self, from: GridIndex, d_row: i32, d_col: i32) -> Option<GridIndex> {
        self.index(
            i64::from(from.row) + i64::from(d_row),
            i64::from(from.col) + i64::from(d_col),
        )
        .ok()
    }

    /// Storage slot of an index (rows outer, columns inner).
    /// Indices taken from a larger board are rejected.
    pub fn slot(&self, index: GridIndex) -> Result<usize, GridError> {
        let (row, col) = (i64::from(index.row), i64::from(index.col));
        if !self.contains(row, col) {
            return Err(GridError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(index.row as usize * self.cols as usize + index.col as usize)
    }

    /// Every index in storage order
    pub fn indices(&self) -> impl Iterator<Item = GridIndex> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| GridIndex { row, col }))
    }

    /// Uniformly random tile
    pub fn random_index(&self, rng: &mut impl Rng) -> GridIndex {
        GridIndex {
            row: rng.random_range(0..self.rows),
            col: rng.random_range(0..self.cols),
        }
    }

    /// Next cell of the heart sweep: rows advance fastest, then columns.
    /// `None` once the last column has been passed.
    pub fn sweep_next(&self, from: GridIndex) -> Option<GridIndex> {
        let mut row = from.row + 1;
        let mut col = from.col;
        if row == self.rows {
            row = 0;
            col += 1;
        }
        if col >= self.cols {
            return None;
        }
        Some(GridIndex { row, col })
    }

    /// World-space center of a tile cube (board centered on the origin)
    pub fn tile_center(&self, index: GridIndex, square_size: f32) -> glam::Vec3 {
        let x_offset = self.cols as f32 / 2.0 * square_size;
        let z_offset = self.rows as f32 / 2.0 * square_size;
        glam::Vec3::new(
            index.col as f32 * square_size - x_offset + 0.5 * square_size,
            0.5 * square_size,
            index.row as f32 * square_size - z_offset + 0.5 * square_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop_assert, proptest};
    use rand::SeedableRng;

    #[test]
    fn test_empty_dims_rejected() {
        assert_eq!(GridDims::new(0, 3), Err(GridError::Empty { rows: 0, cols: 3 }));
        assert!(GridDims::new(1, 1).is_ok());
    }

    #[test]
    fn test_index_out_of_range() {
        let dims = GridDims::new(3, 4).unwrap();
        assert!(dims.index(2, 3).is_ok());
        assert_eq!(
            dims.index(3, 0),
            Err(GridError::OutOfRange {
                row: 3,
                col: 0,
                rows: 3,
                cols: 4
            })
        );
        assert!(dims.index(-1, 0).is_err());
        assert!(dims.index(0, 4).is_err());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let dims = GridDims::new(4, 8).unwrap();
        let corner = GridIndex::ORIGIN;
        assert_eq!(dims.offset(corner, 1, 2), Some(dims.index(1, 2).unwrap()));
        assert_eq!(dims.offset(corner, -1, 2), None);
        assert_eq!(dims.offset(corner, 2, -1), None);
    }

    #[test]
    fn test_sweep_order_is_row_fast() {
        let dims = GridDims::new(3, 2).unwrap();
        let mut visited = vec![GridIndex::ORIGIN];
        let mut cursor = GridIndex::ORIGIN;
        while let Some(next) = dims.sweep_next(cursor) {
            visited.push(next);
            cursor = next;
        }
        let expected: Vec<(u32, u32)> = vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)];
        let got: Vec<(u32, u32)> = visited.iter().map(|i| (i.row(), i.col())).collect();
        assert_eq!(got, expected);
    }

    proptest! {
        #[test]
        fn prop_random_index_on_board(rows in 1u32..12, cols in 1u32..12, seed in any::<u64>()) {
            let dims = GridDims::new(rows, cols).unwrap();
            let mut rng = rand_pcg::Pcg32::seed_from_u64(seed);
            for _ in 0..16 {
                let index = dims.random_index(&mut rng);
                prop_assert!(dims.contains(i64::from(index.row()), i64::from(index.col())));
            }
        }
    }

    #[test]
    fn test_random_index_reaches_every_tile() {
        let dims = GridDims::new(2, 3).unwrap();
        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(dims.random_index(&mut rng));
        }
        assert_eq!(seen.len(), dims.len());
    }

    #[test]
    fn test_slots_cover_storage() {
        let dims = GridDims::new(3, 5).unwrap();
        let slots: Vec<usize> = dims.indices().map(|i| dims.slot(i).unwrap()).collect();
        assert_eq!(slots, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn test_slot_rejects_index_from_larger_board() {
        let small = GridDims::new(3, 3).unwrap();
        let large = GridDims::new(4, 8).unwrap();
        let foreign = large.index(0, 5).unwrap();
        assert_eq!(
            small.slot(foreign),
            Err(GridError::OutOfRange {
                row: 0,
                col: 5,
                rows: 3,
                cols: 3
            })
        );
        assert_eq!(large.slot(foreign), Ok(5));
    }

    #[test]
    fn test_tile_center_layout() {
        let dims = GridDims::new(4, 8).unwrap();
        let first = dims.tile_center(GridIndex::ORIGIN, 1.0);
        assert_eq!(first, glam::Vec3::new(-3.5, 0.5, -1.5));
        let last = dims.tile_center(dims.index(3, 7).unwrap(), 1.0);
        assert_eq!(last, glam::Vec3::new(3.5, 0.5, 1.5));
    }

    #[test]
    fn test_tile_center_odd_board_is_centered() {
        let dims = GridDims::new(3, 5).unwrap();
        let middle = dims.tile_center(dims.index(1, 2).unwrap(), 1.0);
        assert_eq!(middle, glam::Vec3::new(0.0, 0.5, 0.0));
        let first = dims.tile_center(GridIndex::ORIGIN, 1.0);
        assert_eq!(first, glam::Vec3::new(-2.0, 0.5, -1.0));
    }
}
