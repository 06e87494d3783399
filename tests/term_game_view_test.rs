use tui_blockfall::core::GameState;
use tui_blockfall::term::{color_rgb, AnchorY, FlashStage, FrameBuffer, GameView, Rgb, Viewport};
use tui_blockfall::types::{Cell, ColorId, Phase};

fn text(fb: &FrameBuffer) -> String {
    fb.to_text()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, None, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_frame_follows_board_size() {
    let config = tui_blockfall::core::EngineConfig::default().with_size(6, 8);
    let snap = GameState::with_config(config).unwrap().snapshot();
    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, None, Viewport::new(14, 10));

    assert_eq!(fb.get(13, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(13, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19 * 10] = Cell::Occupied(ColorId::wrapping(0));
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, None, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    let left = fb.get(x0, y0).unwrap();
    assert_eq!(left.ch, '█');
    assert_eq!(left.style.fg, Rgb::new(0, 255, 255));
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_current_piece_and_ghost() {
    let snap = GameState::new(9).snapshot();
    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, None, Viewport::new(22, 22));

    let color = color_rgb(snap.current.color);
    for (x, y) in snap.current.cells() {
        let glyph = fb.get(1 + 2 * x as u16, 1 + y as u16).unwrap();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, color);
    }

    let ghost_y = snap.ghost_y.unwrap();
    let (gx, gy) = snap.current.shape.cells().next().unwrap();
    let glyph = fb.get(1 + 2 * (snap.current.x + gx) as u16, 1 + (ghost_y + gy) as u16).unwrap();
    assert_eq!(glyph.ch, '░');
}

#[test]
fn term_view_flashes_pending_rows() {
    let mut snap = GameState::new(1).snapshot();
    for cell in &mut snap.board[19 * 10..] {
        *cell = Cell::Occupied(ColorId::wrapping(5));
    }
    snap.pending_clear.push(19);
    snap.phase = Phase::Clearing;
    snap.ghost_y = None;

    let view = GameView::default();
    let vp = Viewport::new(22, 22);

    let fb = view.render(&snap, Some(FlashStage::Highlight), vp);
    assert_eq!(fb.get(5, 20).unwrap().style.fg, Rgb::new(255, 165, 0));

    let fb = view.render(&snap, Some(FlashStage::White), vp);
    assert_eq!(fb.get(5, 20).unwrap().style.fg, Rgb::new(255, 255, 255));

    let fb = view.render(&snap, None, vp);
    assert_eq!(fb.get(5, 20).unwrap().style.fg, Rgb::new(128, 0, 128));
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines_cleared = 10;

    let fb = GameView::default().render(&snap, None, Viewport::new(60, 22));
    let all = text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("NEXT"));
}

#[test]
fn term_view_skips_side_panel_when_narrow() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, None, Viewport::new(30, 22));
    assert!(!text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut snap = GameState::new(1).snapshot();
    snap.phase = Phase::GameOver;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, None, Viewport::new(22, 22));
    let all = text(&fb);
    assert!(all.contains("GAME OVER"));
    assert!(all.contains("R / SPACE: again"));
}

#[test]
fn render_into_reuses_buffer() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(80, 24);
    view.render_into(&snap, None, Viewport::new(40, 22), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 22));
    assert_eq!(fb, view.render(&snap, None, Viewport::new(40, 22)));
}
