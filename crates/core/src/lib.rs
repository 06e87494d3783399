//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules and the state machine of the falling-block
//! game. It has no dependencies on rendering, terminals or I/O:
//!
//! - **Deterministic**: the same seed produces the same game
//! - **Synchronous**: a step is one call that returns; nothing sleeps
//! - **Host-driven**: the host supplies elapsed time and commands, and gets
//!   events and snapshots back
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with collision checks, locking and staged line clears
//! - [`piece`]: shape matrices, clockwise rotation, the falling piece
//! - [`game_state`]: gravity, command dispatch, spawning, game over and reset
//! - [`scoring`]: 100 points per line, level = score / 1000 + 1
//! - [`rng`]: seeded spawn source (uniform shape and color)
//! - [`config`]: board size, gravity interval, seed, clear mode
//! - [`snapshot`]: owned copy of the state for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::{Command, Phase};
//!
//! let mut game = GameState::new(12345);
//!
//! // 16ms frame, a couple of commands, then drop the piece.
//! game.step(16, &[Command::MoveRight, Command::RotateCw]);
//! let events = game.step(16, &[Command::HardDrop]);
//!
//! assert!(events.is_empty()); // nothing cleared on an empty board
//! assert_eq!(game.phase(), Phase::Falling);
//! assert_eq!(game.board().occupied_count(), 4);
//! ```
//!
//! # Line Clears
//!
//! A lock that completes rows first reports [`types::GameEvent::LinesFull`]
//! with the rows still on the board, then compacts. With
//! [`ClearMode::Deferred`] the game stops in `Phase::Clearing` between the two
//! so the host can animate; [`GameState::finish_clear`] completes it.

pub mod board;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ClearMode, EngineConfig};
pub use game_state::GameState;
pub use piece::{get_shape, Piece, Shape};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{apply_line_clear, level_for_score, ScoreUpdate};
pub use snapshot::{GameSnapshot, PieceSnapshot};
