//! Scoring module - flat per-line scoring with a linear level
//!
//! One rule, applied once per lock that removed rows:
//! - `score' = score + lines * 100`
//! - `level' = score' / 1000 + 1`
//!
//! No drop bonus, no combo, no cap. Level does not change gravity.

use crate::types::{POINTS_PER_LINE, SCORE_PER_LEVEL, STARTING_LEVEL};

/// Result of applying a line clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub score: u32,
    pub level: u32,
}

/// Points for removing `lines` rows at once
pub fn line_clear_points(lines: usize) -> u32 {
    (lines as u32).saturating_mul(POINTS_PER_LINE)
}

/// Level reached at `score`
pub fn level_for_score(score: u32) -> u32 {
    score / SCORE_PER_LEVEL + STARTING_LEVEL
}

/// New score and level after removing `lines` rows
pub fn apply_line_clear(score: u32, lines: usize) -> ScoreUpdate {
    let score = score.saturating_add(line_clear_points(lines));
    ScoreUpdate {
        score,
        level: level_for_score(score),
    }
}
