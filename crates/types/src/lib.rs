//! Shared types - plain data used by the engine, the input layer and the renderer
//!
//! Everything here is pure data with no behavior beyond parsing/formatting helpers,
//! so it can be used from the core engine, the terminal host, or a test harness alike.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Row 0 is the top row and new
//! pieces appear at column `cols / 2`, row 0. Other sizes are allowed through the
//! engine configuration; these constants are only the defaults.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame interval (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 500 | Gravity interval, independent of level |
//! | `FLASH_HIGHLIGHT_MS` | 75 | First stage of the line-clear flash |
//! | `FLASH_WHITE_MS` | 95 | Second stage of the line-clear flash |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, ColorId, Command, ShapeKind};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! let cell = Cell::Occupied(ColorId::new(3).unwrap());
//! assert!(cell.is_occupied());
//! assert!(Cell::Empty.is_empty());
//! ```

use arrayvec::ArrayVec;

/// Default board width in cells
pub const DEFAULT_COLS: u8 = 10;

/// Default board height in cells
pub const DEFAULT_ROWS: u8 = 20;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval: the piece falls one row once the accumulator exceeds this
pub const FALL_INTERVAL_MS: u32 = 500;

/// Points awarded per removed row
pub const POINTS_PER_LINE: u32 = 100;

/// Score needed per level step
pub const SCORE_PER_LEVEL: u32 = 1000;

/// Level of a fresh game
pub const STARTING_LEVEL: u32 = 1;

/// Duration of the highlight stage of the line-clear flash
pub const FLASH_HIGHLIGHT_MS: u32 = 75;

/// Duration of the white stage of the line-clear flash
pub const FLASH_WHITE_MS: u32 = 95;

/// Largest side of any shape bounding box
pub const MAX_SHAPE_SIZE: usize = 4;

/// Most rows a single lock can complete (the tallest shape is 4 rows)
pub const MAX_FULL_ROWS: usize = 4;

/// Number of distinct color ids
pub const COLOR_COUNT: u8 = 7;

/// Row indices reported by a single line clear, ascending
pub type FullRows = ArrayVec<usize, MAX_FULL_ROWS>;

/// Opaque color identifier (0..7) carried for the renderer.
///
/// The engine never looks at the value; it only copies it from a piece into the
/// board cells the piece locks into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(u8);

impl ColorId {
    /// Create a color id, or `None` if `id >= COLOR_COUNT`
    pub const fn new(id: u8) -> Option<Self> {
        if id < COLOR_COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Create a color id, wrapping values outside the palette
    pub const fn wrapping(id: u8) -> Self {
        Self(id % COLOR_COUNT)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(ColorId),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    /// Color of an occupied cell
    pub fn color(&self) -> Option<ColorId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(color) => Some(*color),
        }
    }
}

/// The seven canonical shapes
///
/// Listed in palette order: I, T, L, J, O, S, Z. The shape matrices live in the
/// core crate; this enum is only the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    T,
    L,
    J,
    O,
    S,
    Z,
}

impl ShapeKind {
    /// All kinds, in draw order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Parse a shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

/// Discrete commands delivered by the host
///
/// Commands are applied in arrival order within a step. Anything the current
/// phase does not accept is silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    SoftDrop,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Start a fresh game
    Reset,
    /// Ask the host to stop
    Quit,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATECW"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "reset" => Some(Command::Reset),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::Reset => "reset",
            Command::Quit => "quit",
        }
    }
}

/// Game phase
///
/// - **Falling**: normal play
/// - **Clearing**: a lock completed rows that are still on the board
/// - **GameOver**: terminal until a reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Falling,
    Clearing,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Falling => "falling",
            Phase::Clearing => "clearing",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Domain events reported by a step, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A lock completed these rows; they are still on the board
    LinesFull(FullRows),
    /// These rows were removed and the board compacted
    LinesCleared(FullRows),
    /// Score or level changed after a line clear
    ScoreChanged { score: u32, level: u32 },
    /// A freshly spawned piece collided; the game is over
    GameOver,
    /// The game was reset to its initial state
    Reset,
    /// The host was asked to quit
    QuitRequested,
}
