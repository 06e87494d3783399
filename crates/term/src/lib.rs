//! Terminal rendering for blockfall.
//!
//! Renders into a plain framebuffer instead of using widgets, so the layout is
//! exact (two terminal columns per board cell) and rendering stays testable
//! without a terminal.
//!
//! - [`game_view`]: snapshot to framebuffer, pure
//! - [`flash`]: timing of the line-clear animation
//! - [`renderer`]: diffs frames and writes them with crossterm

pub mod fb;
pub mod flash;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use flash::{FlashStage, LineFlash};
pub use game_view::{color_rgb, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
