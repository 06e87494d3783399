//! Board module - manages the grid of locked cells
//!
//! The board is a `cols x rows` grid stored as one flat, row-major allocation
//! made at construction. Dimensions never change afterwards.
//! Coordinates: (x, y) where x is the column (left to right) and y the row,
//! row 0 at the top.
//!
//! Line clearing is staged: [`Board::full_rows`] only reports, and
//! [`Board::compact`] removes. A host can show the full rows in between.

use tracing::debug;

use crate::piece::Piece;
use crate::types::{Cell, FullRows};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    pub fn new(cols: u8, rows: u8) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);
        Self {
            cols,
            rows,
            cells: vec![Cell::Empty; cols * rows],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some((y as usize) * self.cols + (x as usize))
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may sit at (x, y).
    ///
    /// Anything above the top row is free as long as the column is in range;
    /// the board only collides with its own stored rows and the floor.
    #[inline]
    pub fn is_free(&self, x: i16, y: i16) -> bool {
        if x < 0 || x as usize >= self.cols {
            return false;
        }
        if y < 0 {
            return true;
        }
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Check whether `piece` shifted by (dx, dy) fits on the board
    pub fn is_valid_placement(&self, piece: &Piece, dx: i16, dy: i16) -> bool {
        piece.cells().all(|(x, y)| self.is_free(x + dx, y + dy))
    }

    /// Write a piece's cells into the board.
    ///
    /// The placement must have been validated with
    /// `is_valid_placement(piece, 0, 0)` first. Cells above the top row are
    /// dropped.
    pub fn lock(&mut self, piece: &Piece) {
        debug_assert!(
            self.is_valid_placement(piece, 0, 0),
            "locking an invalid placement at ({}, {})",
            piece.x,
            piece.y
        );

        for (x, y) in piece.cells() {
            self.set(x, y, Cell::Occupied(piece.color));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows {
            return false;
        }
        self.row(y).iter().all(Cell::is_occupied)
    }

    /// Indices of every full row, ascending.
    ///
    /// A single lock can complete at most four rows; if more are full (only
    /// possible by editing the board directly) the first four are reported.
    pub fn full_rows(&self) -> FullRows {
        let mut full = FullRows::new();
        for y in 0..self.rows {
            if self.is_row_full(y) && full.try_push(y).is_err() {
                break;
            }
        }
        full
    }

    /// Delete `removed` rows and shift the rest down, inserting empty rows at
    /// the top.
    ///
    /// Uses a bottom-up write cursor: the set of rows to drop is fixed before
    /// the scan and a kept row is only ever copied down onto rows already read,
    /// so the relative order of the survivors is preserved. Out-of-range
    /// indices are ignored.
    pub fn compact(&mut self, removed: &[usize]) {
        let width = self.cols;
        let mut write_y = self.rows;
        let mut dropped = 0;

        for read_y in (0..self.rows).rev() {
            if removed.contains(&read_y) {
                dropped += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                let dst_start = write_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, dst_start);
            }
        }

        // Remaining rows at the top become empty
        self.cells[..write_y * width].fill(Cell::Empty);

        if dropped > 0 {
            debug!(rows = ?removed, "compacted board");
        }
    }

    /// A row as a slice (panics if `y` is out of range)
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_COLS, crate::types::DEFAULT_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorId, ShapeKind};

    fn red() -> Cell {
        Cell::Occupied(ColorId::wrapping(6))
    }

    fn fill_row(board: &mut Board, y: i16) {
        for x in 0..board.cols() as i16 {
            board.set(x, y, red());
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_is_free_above_top() {
        let board = Board::new(10, 20);
        assert!(board.is_free(0, -3));
        assert!(!board.is_free(-1, -3));
        assert!(!board.is_free(10, -1));
        assert!(!board.is_free(0, 20));
    }

    #[test]
    fn test_valid_placement_walls_and_floor() {
        let board = Board::new(10, 20);
        let mut piece = Piece::spawn(ShapeKind::O, ColorId::wrapping(0), 10);
        piece.x = 0;
        assert!(board.is_valid_placement(&piece, 0, 0));
        assert!(!board.is_valid_placement(&piece, -1, 0));

        piece.x = 8;
        assert!(!board.is_valid_placement(&piece, 1, 0));

        piece.y = 18;
        assert!(board.is_valid_placement(&piece, 0, 0));
        assert!(!board.is_valid_placement(&piece, 0, 1));
    }

    #[test]
    fn test_valid_placement_above_top() {
        let board = Board::new(10, 20);
        let mut piece = Piece::spawn(ShapeKind::I, ColorId::wrapping(0), 10);
        piece.y = -1;
        assert!(board.is_valid_placement(&piece, 0, 0));
    }

    #[test]
    fn test_valid_placement_collides_with_cells() {
        let mut board = Board::new(10, 20);
        board.set(6, 1, red());
        let piece = Piece::spawn(ShapeKind::O, ColorId::wrapping(0), 10);
        assert!(!board.is_valid_placement(&piece, 0, 0));
        assert!(board.is_valid_placement(&piece, -2, 0));
    }

    #[test]
    fn test_lock_writes_color() {
        let mut board = Board::new(10, 20);
        let color = ColorId::wrapping(3);
        let mut piece = Piece::spawn(ShapeKind::T, color, 10);
        piece.y = 18;
        board.lock(&piece);

        assert_eq!(board.get(5, 18), Some(Cell::Occupied(color)));
        assert_eq!(board.get(6, 18), Some(Cell::Occupied(color)));
        assert_eq!(board.get(7, 18), Some(Cell::Occupied(color)));
        assert_eq!(board.get(6, 19), Some(Cell::Occupied(color)));
        assert_eq!(board.get(5, 19), Some(Cell::Empty));
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_full_rows_ascending() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 19);
        fill_row(&mut board, 17);
        board.set(0, 18, red());

        assert_eq!(board.full_rows().as_slice(), &[17, 19]);
        // Reporting does not remove anything.
        assert!(board.is_row_full(17));
    }

    #[test]
    fn test_compact_keeps_order() {
        let mut board = Board::new(4, 6);
        // Marker cells identify rows: row y has its marker in column y % 4.
        for y in 0..6i16 {
            board.set(y % 4, y, Cell::Occupied(ColorId::wrapping(y as u8)));
        }
        fill_row(&mut board, 2);
        fill_row(&mut board, 4);

        board.compact(&[2, 4]);

        assert!(board.row(0).iter().all(Cell::is_empty));
        assert!(board.row(1).iter().all(Cell::is_empty));
        assert_eq!(board.get(0, 2), Some(Cell::Occupied(ColorId::wrapping(0))));
        assert_eq!(board.get(1, 3), Some(Cell::Occupied(ColorId::wrapping(1))));
        assert_eq!(board.get(3, 4), Some(Cell::Occupied(ColorId::wrapping(3))));
        assert_eq!(board.get(1, 5), Some(Cell::Occupied(ColorId::wrapping(5))));
        assert_eq!(board.rows(), 6);
    }

    #[test]
    fn test_compact_nothing_is_noop() {
        let mut board = Board::new(10, 20);
        board.set(3, 7, red());
        let before = board.clone();
        board.compact(&[]);
        assert_eq!(board, before);
    }
}
