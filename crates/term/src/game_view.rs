//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::flash::FlashStage;
use crate::types::{Cell, ColorId, Phase};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const BLACK: Rgb = Rgb::new(0, 0, 0);
const WHITE: Rgb = Rgb::new(255, 255, 255);
const LINE_HIGHLIGHT: Rgb = Rgb::new(255, 165, 0);

/// Palette indexed by color id
const PALETTE: [Rgb; 7] = [
    Rgb::new(0, 255, 255),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 165, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(128, 0, 128),
    Rgb::new(255, 0, 0),
];

pub fn color_rgb(color: ColorId) -> Rgb {
    PALETTE[color.get() as usize % PALETTE.len()]
}

/// A lightweight terminal view of the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen placement of the playfield for one frame
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// `flash` colors the snapshot's pending full rows while the host runs the
    /// line-clear animation.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        flash: Option<FlashStage>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board_w = (snap.cols as u16) * self.cell_w;
        let board_h = (snap.rows as u16) * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let playfield = Style::new(PLAYFIELD_BG, PLAYFIELD_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', playfield);
        self.draw_border(fb, frame, Style::new(Rgb::new(200, 200, 200), BLACK));

        // Locked cells.
        for y in 0..snap.rows {
            let flashing = flash.filter(|_| snap.pending_clear.contains(&y));
            for (x, cell) in snap.row(y).iter().enumerate() {
                let (x, y16) = (x as u16, y as u16);
                let color = match (flashing, cell) {
                    (Some(FlashStage::Highlight), _) => LINE_HIGHLIGHT,
                    (Some(FlashStage::White), _) => WHITE,
                    (None, Cell::Occupied(color)) => color_rgb(*color),
                    (None, Cell::Empty) => {
                        self.draw_empty_cell(fb, frame, x, y16);
                        continue;
                    }
                };
                self.draw_block(fb, frame, x, y16, color);
            }
        }

        if snap.phase == Phase::Falling {
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = PieceSnapshot { y: ghost_y, ..snap.current };
                let style = Style::new(color_rgb(snap.current.color).shade(55), PLAYFIELD_BG);
                for (x, y) in ghost.cells() {
                    if let Some((x, y)) = on_board(snap, x, y) {
                        self.fill_cell(fb, frame, x, y, '░', style);
                    }
                }
            }

            for (x, y) in snap.current.cells() {
                if let Some((x, y)) = on_board(snap, x, y) {
                    self.draw_block(fb, frame, x, y, color_rgb(snap.current.color));
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.phase == Phase::GameOver {
            self.draw_overlay_text(fb, frame, 0, "GAME OVER", Style::new(Rgb::new(255, 0, 0), BLACK).bold());
            self.draw_overlay_text(fb, frame, 2, "R / SPACE: again", Style::new(WHITE, BLACK));
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, flash: Option<FlashStage>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, flash, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: Style) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = Style::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        self.fill_cell(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: Rgb) {
        let style = Style::new(color, PLAYFIELD_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: Style) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), BLACK).bold();
        let value = Style::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = frame.y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines_cleared)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let color = color_rgb(snap.next.color);
        for (dx, dy) in snap.next.shape.cells() {
            let px = panel_x + (dx as u16) * self.cell_w;
            let py = y + dy as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', Style::new(color, BLACK).bold());
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, line: u16, text: &str, style: Style) {
        let mid_y = frame.y.saturating_add(frame.h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, style);
    }
}

/// Board coordinates as unsigned, if the cell is inside the visible board
fn on_board(snap: &GameSnapshot, x: i16, y: i16) -> Option<(u16, u16)> {
    if x < 0 || y < 0 || x as usize >= snap.cols || y as usize >= snap.rows {
        return None;
    }
    Some((x as u16, y as u16))
}
