//! Game state module - the state machine that drives a game
//!
//! This module ties together the board, pieces, spawn queue and scoring. It
//! handles gravity, command dispatch, locking, line clears and the game-over /
//! reset lifecycle.
//!
//! Within one [`GameState::step`], gravity is evaluated first and the queued
//! commands are applied afterwards, in arrival order.

use std::mem;

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::config::{ClearMode, EngineConfig};
use crate::piece::Piece;
use crate::rng::PieceQueue;
use crate::scoring::apply_line_clear;
use crate::snapshot::GameSnapshot;
use crate::types::{Command, FullRows, GameEvent, Phase, STARTING_LEVEL};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    current: Piece,
    next: Piece,
    queue: PieceQueue,
    score: u32,
    level: u32,
    lines_cleared: u32,
    phase: Phase,
    fall_timer_ms: u32,
    /// Full rows still on the board while in `Phase::Clearing`
    pending_clear: FullRows,
    quit_requested: bool,
}

impl GameState {
    /// Create a new default-size game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let config = EngineConfig::default().with_seed(seed);
        Self::build(config, PieceQueue::random(seed))
    }

    /// Create a game from a configuration
    pub fn with_config(config: EngineConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::build(config, PieceQueue::random(config.seed)))
    }

    /// Create a game that draws its pieces from `queue` instead of the seed
    pub fn with_queue(config: EngineConfig, queue: PieceQueue) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::build(config, queue))
    }

    fn build(config: EngineConfig, mut queue: PieceQueue) -> Self {
        let board = Board::new(config.cols, config.rows);
        let current = spawn_from(&mut queue, config.cols);
        let next = spawn_from(&mut queue, config.cols);

        let mut state = Self {
            config,
            board,
            current,
            next,
            queue,
            score: 0,
            level: STARTING_LEVEL,
            lines_cleared: 0,
            phase: Phase::Falling,
            fall_timer_ms: 0,
            pending_clear: FullRows::new(),
            quit_requested: false,
        };
        if !state.board.is_valid_placement(&state.current, 0, 0) {
            state.phase = Phase::GameOver;
        }
        state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for setting up positions in tests and tools.
    ///
    /// Editing cells under the active piece can leave it in an invalid
    /// placement; the state machine does not re-check until the next move.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Rows waiting for `finish_clear` (empty unless in `Phase::Clearing`)
    pub fn pending_clear(&self) -> &[usize] {
        &self.pending_clear
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    /// Advance the game by `elapsed_ms` and apply `commands`.
    ///
    /// Returns the events produced, in order.
    pub fn step(&mut self, elapsed_ms: u32, commands: &[Command]) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.step_into(elapsed_ms, commands, &mut events);
        events
    }

    /// Like [`GameState::step`], writing into a caller-owned buffer.
    ///
    /// `events` is cleared first so one buffer can be reused every frame.
    pub fn step_into(
        &mut self,
        elapsed_ms: u32,
        commands: &[Command],
        events: &mut Vec<GameEvent>,
    ) {
        events.clear();

        if self.phase == Phase::Falling {
            self.apply_gravity(elapsed_ms, events);
        }

        for &command in commands {
            self.apply_command(command, events);
        }
    }

    /// Apply a single command.
    ///
    /// Returns whether the game changed. Commands the current phase does not
    /// accept, and moves that would collide, are no-ops.
    pub fn apply_command(&mut self, command: Command, events: &mut Vec<GameEvent>) -> bool {
        match command {
            Command::Quit => {
                self.quit_requested = true;
                events.push(GameEvent::QuitRequested);
                true
            }
            Command::Reset => {
                self.reset(events);
                true
            }
            _ if self.phase != Phase::Falling => false,
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::SoftDrop => self.try_move(0, 1),
            Command::RotateCw => self.try_rotate(),
            Command::HardDrop => {
                self.hard_drop(events);
                true
            }
        }
    }

    fn apply_gravity(&mut self, elapsed_ms: u32, events: &mut Vec<GameEvent>) {
        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms <= self.config.fall_interval_ms {
            return;
        }

        // One row per step at most, however long the frame was.
        self.fall_timer_ms = 0;
        if self.board.is_valid_placement(&self.current, 0, 1) {
            self.current.move_by(0, 1);
            trace!(y = self.current.y, "gravity");
        } else {
            self.lock_current(events);
        }
    }

    /// Try to move the current piece
    pub(crate) fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        if !self.board.is_valid_placement(&self.current, dx, dy) {
            return false;
        }
        self.current.move_by(dx, dy);
        true
    }

    /// Rotate clockwise, restoring the previous shape if the result collides
    pub(crate) fn try_rotate(&mut self) -> bool {
        let previous = self.current.shape;
        self.current.shape = self.current.rotate();
        if self.board.is_valid_placement(&self.current, 0, 0) {
            return true;
        }
        self.current.shape = previous;
        false
    }

    /// Rows the current piece can still fall
    fn drop_distance(&self) -> i16 {
        let mut distance = 0;
        while self.board.is_valid_placement(&self.current, 0, distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Row the current piece would land on (for a landing preview)
    pub fn ghost_y(&self) -> Option<i16> {
        if self.phase != Phase::Falling {
            return None;
        }
        Some(self.current.y + self.drop_distance())
    }

    /// Drop the current piece as far as it goes and lock it
    pub(crate) fn hard_drop(&mut self, events: &mut Vec<GameEvent>) -> i16 {
        let distance = self.drop_distance();
        self.current.move_by(0, distance);
        self.lock_current(events);
        distance
    }

    /// Lock the current piece and handle full rows and the next spawn
    fn lock_current(&mut self, events: &mut Vec<GameEvent>) {
        self.board.lock(&self.current);
        debug!(
            kind = self.current.kind.as_str(),
            x = self.current.x,
            y = self.current.y,
            color = self.current.color.get(),
            "locked piece"
        );

        let full = self.board.full_rows();
        if full.is_empty() {
            self.spawn_next(events);
            return;
        }

        self.phase = Phase::Clearing;
        self.pending_clear = full.clone();
        events.push(GameEvent::LinesFull(full));

        if self.config.clear_mode == ClearMode::Immediate {
            self.complete_clear(events);
        }
    }

    /// Finish a deferred line clear: compact, score, spawn.
    ///
    /// Does nothing unless the game is in `Phase::Clearing`.
    pub fn finish_clear(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.finish_clear_into(&mut events);
        events
    }

    pub fn finish_clear_into(&mut self, events: &mut Vec<GameEvent>) {
        events.clear();
        if self.phase == Phase::Clearing {
            self.complete_clear(events);
        }
    }

    fn complete_clear(&mut self, events: &mut Vec<GameEvent>) {
        let rows = mem::take(&mut self.pending_clear);
        self.board.compact(&rows);

        let update = apply_line_clear(self.score, rows.len());
        self.lines_cleared = self.lines_cleared.saturating_add(rows.len() as u32);
        self.score = update.score;
        self.level = update.level;
        debug!(
            rows = ?rows.as_slice(),
            score = self.score,
            level = self.level,
            "cleared lines"
        );

        events.push(GameEvent::LinesCleared(rows));
        events.push(GameEvent::ScoreChanged {
            score: self.score,
            level: self.level,
        });

        self.spawn_next(events);
    }

    /// Promote the preview piece and draw a new preview
    fn spawn_next(&mut self, events: &mut Vec<GameEvent>) {
        let incoming = spawn_from(&mut self.queue, self.config.cols);
        self.current = mem::replace(&mut self.next, incoming);

        if self.board.is_valid_placement(&self.current, 0, 0) {
            self.phase = Phase::Falling;
        } else {
            self.phase = Phase::GameOver;
            info!(
                score = self.score,
                lines = self.lines_cleared,
                "game over"
            );
            events.push(GameEvent::GameOver);
        }
    }

    /// Start over with an empty board; the piece queue keeps running
    fn reset(&mut self, events: &mut Vec<GameEvent>) {
        self.board.clear();
        self.current = spawn_from(&mut self.queue, self.config.cols);
        self.next = spawn_from(&mut self.queue, self.config.cols);
        self.score = 0;
        self.level = STARTING_LEVEL;
        self.lines_cleared = 0;
        self.phase = Phase::Falling;
        self.fall_timer_ms = 0;
        self.pending_clear.clear();
        info!("game reset");
        events.push(GameEvent::Reset);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cols = self.board.cols();
        out.rows = self.board.rows();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.current = self.current.into();
        out.next = self.next.into();
        out.ghost_y = self.ghost_y();
        out.pending_clear = self.pending_clear.clone();
        out.score = self.score;
        out.level = self.level;
        out.lines_cleared = self.lines_cleared;
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

fn spawn_from(queue: &mut PieceQueue, cols: u8) -> Piece {
    let (kind, color) = queue.draw();
    Piece::spawn(kind, color, cols)
}
