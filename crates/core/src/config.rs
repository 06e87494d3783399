//! Engine configuration

use anyhow::{ensure, Result};

use crate::types::{DEFAULT_COLS, DEFAULT_ROWS, FALL_INTERVAL_MS};

/// Smallest board side accepted (the widest shape must fit)
pub const MIN_BOARD_SIDE: u8 = 4;

/// Largest board side accepted
pub const MAX_BOARD_SIDE: u8 = 64;

/// When a completed line clear is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearMode {
    /// Compact in the same step that locked the piece
    #[default]
    Immediate,
    /// Stop in `Phase::Clearing` until the host calls `finish_clear`
    Deferred,
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub cols: u8,
    pub rows: u8,
    /// Gravity fires once the accumulated time strictly exceeds this
    pub fall_interval_ms: u32,
    /// Seed of the random piece queue
    pub seed: u32,
    pub clear_mode: ClearMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            fall_interval_ms: FALL_INTERVAL_MS,
            seed: 1,
            clear_mode: ClearMode::Immediate,
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, cols: u8, rows: u8) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn with_fall_interval_ms(mut self, ms: u32) -> Self {
        self.fall_interval_ms = ms;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_clear_mode(mut self, mode: ClearMode) -> Self {
        self.clear_mode = mode;
        self
    }

    /// Check the values are playable
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&self.cols),
            "board width {} outside {}..={}",
            self.cols,
            MIN_BOARD_SIDE,
            MAX_BOARD_SIDE
        );
        ensure!(
            (MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&self.rows),
            "board height {} outside {}..={}",
            self.rows,
            MIN_BOARD_SIDE,
            MAX_BOARD_SIDE
        );
        ensure!(self.fall_interval_ms > 0, "fall interval must be positive");
        Ok(())
    }
}
