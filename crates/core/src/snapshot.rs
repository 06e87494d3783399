use crate::piece::{Piece, Shape};
use crate::types::{Cell, ColorId, FullRows, Phase, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub x: i16,
    pub y: i16,
    pub color: ColorId,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
            color: value.color,
        }
    }
}

impl PieceSnapshot {
    /// Absolute board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Everything a renderer needs, owned and detached from the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub cols: usize,
    pub rows: usize,
    /// Row-major locked cells
    pub board: Vec<Cell>,
    pub current: PieceSnapshot,
    /// Preview piece; its position is the spawn position
    pub next: PieceSnapshot,
    pub ghost_y: Option<i16>,
    /// Full rows awaiting compaction (non-empty only while clearing)
    pub pending_clear: FullRows,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.board.get(y * self.cols + x).copied()
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.cols;
        &self.board[start..start + self.cols]
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let idle = PieceSnapshot::from(Piece::spawn(ShapeKind::O, ColorId::wrapping(0), 0));
        Self {
            cols: 0,
            rows: 0,
            board: Vec::new(),
            current: idle,
            next: idle,
            ghost_y: None,
            pending_clear: FullRows::new(),
            score: 0,
            level: 0,
            lines_cleared: 0,
            phase: Phase::Falling,
        }
    }
}
