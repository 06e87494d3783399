//! Piece module - shape matrices, clockwise rotation and the falling piece
//!
//! Shapes are small boolean matrices (at most 4x4) stored inline, so a `Shape`
//! is `Copy` and rotating one never touches the heap. The seven canonical
//! matrices are constants; rotation always builds a new value.

use crate::types::{ColorId, ShapeKind, MAX_SHAPE_SIZE};

const N: usize = MAX_SHAPE_SIZE;

/// An `h x w` occupancy matrix in a piece's local frame.
///
/// `cells[y][x]` is true when local cell `(x, y)` is filled. Entries outside
/// the `h x w` bounding box are always false, which keeps derived equality
/// meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    h: u8,
    w: u8,
    cells: [[bool; N]; N],
}

impl Shape {
    /// Build a shape from 0/1 rows (top to bottom).
    ///
    /// Usable in const context; panics at compile time on an empty or
    /// oversized matrix.
    pub const fn from_rows(rows: &[&[u8]]) -> Self {
        let h = rows.len();
        assert!(h > 0 && h <= N, "shape height out of range");
        let w = rows[0].len();
        assert!(w > 0 && w <= N, "shape width out of range");

        let mut cells = [[false; N]; N];
        let mut y = 0;
        while y < h {
            assert!(rows[y].len() == w, "ragged shape rows");
            let mut x = 0;
            while x < w {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }

        Self {
            h: h as u8,
            w: w as u8,
            cells,
        }
    }

    pub fn height(&self) -> u8 {
        self.h
    }

    pub fn width(&self) -> u8 {
        self.w
    }

    /// Whether local cell `(x, y)` is filled (false outside the bounding box)
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.w as usize && y < self.h as usize && self.cells[y][x]
    }

    /// Local `(x, y)` coordinates of every filled cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        let (h, w) = (self.h as usize, self.w as usize);
        (0..h).flat_map(move |y| {
            (0..w)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i16, y as i16))
        })
    }

    /// Rotate 90° clockwise.
    ///
    /// `new[x][h-1-y] = old[y][x]` for every `y < h`, `x < w`; the result is
    /// `w x h`.
    pub fn rotated_cw(&self) -> Self {
        let (h, w) = (self.h as usize, self.w as usize);
        let mut cells = [[false; N]; N];
        for y in 0..h {
            for x in 0..w {
                cells[x][h - 1 - y] = self.cells[y][x];
            }
        }
        Self {
            h: self.w,
            w: self.h,
            cells,
        }
    }
}

const I_SHAPE: Shape = Shape::from_rows(&[&[1, 1, 1, 1]]);
const T_SHAPE: Shape = Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]);
const L_SHAPE: Shape = Shape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]);
const J_SHAPE: Shape = Shape::from_rows(&[&[1, 1, 1], &[0, 0, 1]]);
const O_SHAPE: Shape = Shape::from_rows(&[&[1, 1], &[1, 1]]);
const S_SHAPE: Shape = Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]);
const Z_SHAPE: Shape = Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]);

/// Spawn orientation of a shape kind
pub fn get_shape(kind: ShapeKind) -> Shape {
    match kind {
        ShapeKind::I => I_SHAPE,
        ShapeKind::T => T_SHAPE,
        ShapeKind::L => L_SHAPE,
        ShapeKind::J => J_SHAPE,
        ShapeKind::O => O_SHAPE,
        ShapeKind::S => S_SHAPE,
        ShapeKind::Z => Z_SHAPE,
    }
}

/// Column a new piece appears at on a board `cols` wide.
///
/// The centre column, pulled left just enough for the shape to fit.
pub fn spawn_x(shape: &Shape, cols: u8) -> i16 {
    let centre = (cols / 2) as i16;
    let max_x = cols as i16 - shape.width() as i16;
    centre.min(max_x).max(0)
}

/// A falling piece: a shape anchored at `(x, y)` on the board
///
/// `(x, y)` is the top-left corner of the shape's bounding box. Validity of a
/// position is decided by the board, never by the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub x: i16,
    pub y: i16,
    pub color: ColorId,
}

impl Piece {
    /// Create a piece in spawn orientation at the top of a board `cols` wide
    pub fn spawn(kind: ShapeKind, color: ColorId, cols: u8) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape, cols),
            y: 0,
            color,
        }
    }

    /// Translate the anchor
    pub fn move_by(&mut self, dx: i16, dy: i16) {
        self.x += dx;
        self.y += dy;
    }

    /// The shape this piece would have after a clockwise turn
    pub fn rotate(&self) -> Shape {
        self.shape.rotated_cw()
    }

    /// Absolute board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
