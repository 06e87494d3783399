//! Line-clear flash timing.
//!
//! When a lock completes rows the game (in deferred clear mode) waits in
//! `Phase::Clearing`. The host shows the full rows in the highlight color, then
//! in white, then tells the game to compact. This timer tracks which stage is
//! showing; the host feeds it the same elapsed time it feeds the game.

use crate::types::{FLASH_HIGHLIGHT_MS, FLASH_WHITE_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashStage {
    Highlight,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFlash {
    highlight_ms: u32,
    white_ms: u32,
    elapsed_ms: u32,
    active: bool,
}

impl Default for LineFlash {
    fn default() -> Self {
        Self::new(FLASH_HIGHLIGHT_MS, FLASH_WHITE_MS)
    }
}

impl LineFlash {
    pub fn new(highlight_ms: u32, white_ms: u32) -> Self {
        Self {
            highlight_ms,
            white_ms,
            elapsed_ms: 0,
            active: false,
        }
    }

    pub fn start(&mut self) {
        self.elapsed_ms = 0;
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stage currently showing, or `None` when idle
    pub fn stage(&self) -> Option<FlashStage> {
        if !self.active {
            None
        } else if self.elapsed_ms < self.highlight_ms {
            Some(FlashStage::Highlight)
        } else {
            Some(FlashStage::White)
        }
    }

    /// Advance the timer. Returns true exactly once, when the flash ends.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms >= self.highlight_ms.saturating_add(self.white_ms) {
            self.active = false;
            return true;
        }
        false
    }
}
