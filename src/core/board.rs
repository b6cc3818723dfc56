//! Board module - manages the game grid.
//!
//! The board is a 10x20 grid where each cell is empty or filled with a piece
//! kind. Storage is a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) with x in 0..10 left to right and y in 0..20 top to
//! bottom.

use arrayvec::ArrayVec;
use log::warn;

use crate::core::pieces::PieceShape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_BUFFER_ROWS};

const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// The game board - 10 columns x 20 rows using flat array storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y), or None if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty.
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// In bounds and filled.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether every mino of `shape`, translated to (x, y), lands on an
    /// in-bounds empty cell.
    pub fn is_valid_position(&self, shape: &PieceShape, x: i8, y: i8) -> bool {
        shape
            .iter()
            .all(|&(dx, dy)| self.is_valid(x + dx, y + dy))
    }

    /// Write a piece's minos into the grid.
    ///
    /// Checks the full position first: on any collision or out-of-bounds mino
    /// the grid is left untouched and false is returned.
    pub fn place(&mut self, shape: &PieceShape, x: i8, y: i8, kind: PieceKind) -> bool {
        if !self.is_valid_position(shape, x, y) {
            return false;
        }
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, Some(kind));
        }
        true
    }

    /// Whether row `y` is completely filled.
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Completed row indices, ordered bottom to top.
    ///
    /// A lock can complete at most 4 rows, so the list never allocates.
    pub fn full_rows(&self) -> ArrayVec<usize, 4> {
        let mut rows = ArrayVec::new();
        for y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(y) {
                if rows.try_push(y).is_err() {
                    warn!("more than 4 full rows detected; board state is corrupt");
                    break;
                }
            }
        }
        rows
    }

    /// Remove row `y`, shifting every row above it down by one and clearing
    /// the top row. Rows below `y` are untouched.
    pub fn clear_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            warn!("clear_row called with out-of-range row {y}");
            return;
        }

        let width = BOARD_WIDTH as usize;
        for row in (1..=y).rev() {
            let src = (row - 1) * width;
            let dst = row * width;
            self.cells.copy_within(src..src + width, dst);
        }
        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Remove all listed rows in one call and return how many were removed.
    ///
    /// Rows are processed top to bottom: removing a row only shifts the rows
    /// above it, so lower indices stay valid for the remaining removals even
    /// when several rows complete simultaneously.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut sorted: ArrayVec<usize, 4> = ArrayVec::new();
        for &y in rows {
            if y >= BOARD_HEIGHT as usize {
                warn!("skipping out-of-range row {y} in clear_rows");
                continue;
            }
            if sorted.contains(&y) {
                continue;
            }
            if sorted.try_push(y).is_err() {
                warn!("clear_rows called with more than 4 rows; extra rows ignored");
                break;
            }
        }
        sorted.sort_unstable();

        for &y in &sorted {
            self.clear_row(y);
        }
        sorted.len()
    }

    /// Passive topout signal: any filled cell inside the spawn buffer (the
    /// top rows). Display-level early warning only; the authoritative game
    /// over rule is spawn validity, checked by the engine.
    pub fn is_topout_state(&self) -> bool {
        let end = (SPAWN_BUFFER_ROWS as usize) * (BOARD_WIDTH as usize);
        self.cells[..end].iter().any(|cell| cell.is_some())
    }

    /// Write the grid as color ids (0 = empty, 1..=7 = piece kind) into a
    /// caller-owned array, avoiding per-frame allocation.
    pub fn write_color_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                out[y][x] = match self.cells[y * BOARD_WIDTH as usize + x] {
                    Some(kind) => kind.color_id(),
                    None => 0,
                };
            }
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the entire grid.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Count of filled cells across the whole grid.
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Build a board from a 2D vector for tests.
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert_eq!(rows.len(), BOARD_HEIGHT as usize);
        assert!(rows.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn place_rejects_overlap_without_mutation() {
        let mut board = Board::new();
        board.set(4, 5, Some(PieceKind::T));

        let square: PieceShape = [(0, 0), (1, 0), (0, 1), (1, 1)];
        assert!(!board.place(&square, 3, 5, PieceKind::O));

        assert_eq!(board.get(3, 5), Some(None));
        assert_eq!(board.get(4, 5), Some(Some(PieceKind::T)));
        assert_eq!(board.get(3, 6), Some(None));
    }

    #[test]
    fn clear_rows_handles_non_adjacent_rows() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 5, Some(PieceKind::T));
            board.set(x, 10, Some(PieceKind::I));
            board.set(x, 15, Some(PieceKind::O));
        }
        board.set(0, 4, Some(PieceKind::J));
        board.set(0, 9, Some(PieceKind::L));
        board.set(0, 14, Some(PieceKind::S));

        let rows = board.full_rows();
        assert_eq!(rows.as_slice(), &[15, 10, 5]);
        assert_eq!(board.clear_rows(&rows), 3);

        // Each marker drops by the number of cleared rows below it.
        assert_eq!(board.get(0, 7), Some(Some(PieceKind::J)));
        assert_eq!(board.get(0, 11), Some(Some(PieceKind::L)));
        assert_eq!(board.get(0, 15), Some(Some(PieceKind::S)));
    }

    #[test]
    fn clear_rows_removes_exactly_k_times_width_cells() {
        let mut board = Board::new();
        for y in [18usize, 19usize] {
            for x in 0..BOARD_WIDTH as i8 {
                board.set(x, y as i8, Some(PieceKind::I));
            }
        }
        board.set(3, 17, Some(PieceKind::Z));

        let before = board.filled_cells();
        let rows = board.full_rows();
        assert_eq!(board.clear_rows(&rows), 2);
        assert_eq!(
            board.filled_cells(),
            before - 2 * BOARD_WIDTH as usize
        );
        assert_eq!(board.get(3, 19), Some(Some(PieceKind::Z)));
    }

    #[test]
    fn clear_rows_ignores_garbage_input() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 19, Some(PieceKind::S));
        }

        // Out-of-range and duplicate indices must not corrupt the grid.
        assert_eq!(board.clear_rows(&[19, 19, 99]), 1);
        assert_eq!(board.filled_cells(), 0);
    }

    #[test]
    fn topout_state_tracks_spawn_buffer_only() {
        let mut board = Board::new();
        assert!(!board.is_topout_state());

        board.set(0, SPAWN_BUFFER_ROWS as i8, Some(PieceKind::I));
        assert!(!board.is_topout_state());

        board.set(9, SPAWN_BUFFER_ROWS as i8 - 1, Some(PieceKind::I));
        assert!(board.is_topout_state());
    }

    #[test]
    fn color_grid_round_trips_kinds() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::L));

        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_color_grid(&mut grid);

        assert_eq!(grid[0][0], PieceKind::I.color_id());
        assert_eq!(grid[10][5], PieceKind::L.color_id());
        assert_eq!(grid[19][9], 0);
    }
}
