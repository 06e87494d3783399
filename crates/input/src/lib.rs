//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. Every key press
//! is one command; there is no auto-repeat handling here beyond what the
//! terminal itself sends.

pub mod map;

pub use blockfall_types as types;

pub use map::{command_for_key, should_quit};
