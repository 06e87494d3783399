//! Integration tests for the game state machine, driven only through commands

use tui_blockfall::core::{ClearMode, EngineConfig, GameState, PieceQueue};
use tui_blockfall::types::{Cell, ColorId, Command, FullRows, GameEvent, Phase, ShapeKind};

fn scripted_game(kinds: &[ShapeKind], mode: ClearMode) -> GameState {
    let color = ColorId::wrapping(4);
    let queue = PieceQueue::scripted(kinds.iter().map(|&k| (k, color))).unwrap();
    let config = EngineConfig::default().with_clear_mode(mode);
    GameState::with_queue(config, queue).unwrap()
}

fn rows(indices: &[usize]) -> FullRows {
    indices.iter().copied().collect()
}

/// Shift the current piece horizontally by `dx` and hard drop it
fn place(game: &mut GameState, dx: i16) -> Vec<GameEvent> {
    let mv = if dx < 0 { Command::MoveLeft } else { Command::MoveRight };
    let mut commands = vec![mv; dx.unsigned_abs() as usize];
    commands.push(Command::HardDrop);
    game.step(0, &commands)
}

#[test]
fn test_two_bars_and_a_square_clear_one_row() {
    let mut game = scripted_game(&[ShapeKind::I, ShapeKind::I, ShapeKind::O], ClearMode::Immediate);

    // I spawns at x=5: park it at 0..4, then 4..8; the O covers 8..10.
    assert!(place(&mut game, -5).is_empty());
    assert!(place(&mut game, -1).is_empty());
    let events = place(&mut game, 3);

    assert_eq!(
        events,
        vec![
            GameEvent::LinesFull(rows(&[19])),
            GameEvent::LinesCleared(rows(&[19])),
            GameEvent::ScoreChanged { score: 100, level: 1 },
        ]
    );
    assert_eq!(game.score(), 100);
    assert_eq!(game.level(), 1);
    assert_eq!(game.lines_cleared(), 1);
    assert_eq!(game.board().rows(), 20);

    // Only the top half of the O survives, shifted onto the floor.
    assert_eq!(game.board().occupied_count(), 2);
    assert!(game.board().get(8, 19).is_some_and(|c| c.is_occupied()));
    assert!(game.board().get(9, 19).is_some_and(|c| c.is_occupied()));
    assert_eq!(game.phase(), Phase::Falling);
}

#[test]
fn test_five_squares_clear_two_rows() {
    let mut game = scripted_game(&[ShapeKind::O], ClearMode::Immediate);

    for dx in [-5, -3, -1, 1] {
        assert!(place(&mut game, dx).is_empty());
    }
    let events = place(&mut game, 3);

    assert_eq!(events[0], GameEvent::LinesFull(rows(&[18, 19])));
    assert_eq!(game.score(), 200);
    assert_eq!(game.lines_cleared(), 2);
    assert_eq!(game.board().occupied_count(), 0);
}

#[test]
fn test_deferred_clear_has_two_observable_states() {
    let mut game = scripted_game(&[ShapeKind::O], ClearMode::Deferred);
    for dx in [-5, -3, -1, 1] {
        place(&mut game, dx);
    }
    let events = place(&mut game, 3);
    assert_eq!(events, vec![GameEvent::LinesFull(rows(&[18, 19]))]);

    let snap = game.snapshot();
    assert_eq!(snap.phase, Phase::Clearing);
    assert_eq!(snap.pending_clear.as_slice(), &[18, 19]);
    assert!(snap.row(19).iter().all(|c| c.is_occupied()));
    assert_eq!(snap.ghost_y, None);

    // Commands other than Reset and Quit are ignored meanwhile.
    assert!(game.step(1_000, &[Command::MoveLeft, Command::HardDrop]).is_empty());
    assert_eq!(game.snapshot(), snap);

    let events = game.finish_clear();
    assert_eq!(
        events,
        vec![
            GameEvent::LinesCleared(rows(&[18, 19])),
            GameEvent::ScoreChanged { score: 200, level: 1 },
        ]
    );
    assert_eq!(game.phase(), Phase::Falling);
    assert!(game.pending_clear().is_empty());
    assert_eq!(game.board().occupied_count(), 0);
}

#[test]
fn test_blocked_spawn_ends_game_and_freezes_it() {
    let mut game = scripted_game(&[ShapeKind::O], ClearMode::Immediate);
    place(&mut game, -5);

    // Move the falling O clear of the spawn area, then wall the spawn area off.
    game.step(0, &[Command::MoveLeft, Command::MoveLeft, Command::MoveLeft]);
    assert_eq!(game.current().x, 2);
    let color = Cell::Occupied(ColorId::wrapping(0));
    for y in 0..2 {
        for x in 4..10 {
            game.board_mut().set(x, y, color);
        }
    }

    let events = game.step(0, &[Command::HardDrop]);
    assert_eq!(events, vec![GameEvent::GameOver]);
    assert!(game.game_over());
    assert_eq!(game.ghost_y(), None);

    let before = game.snapshot();
    assert!(game.step(0, &[Command::MoveLeft]).is_empty());
    assert!(game.step(60_000, &[Command::RotateCw, Command::SoftDrop]).is_empty());
    assert_eq!(game.snapshot(), before);

    assert_eq!(game.step(0, &[Command::Reset]), vec![GameEvent::Reset]);
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.board().occupied_count(), 0);
}

#[test]
fn test_quit_is_reported_in_every_phase() {
    let mut game = scripted_game(&[ShapeKind::T], ClearMode::Immediate);
    assert_eq!(game.step(0, &[Command::Quit]), vec![GameEvent::QuitRequested]);
    assert!(game.quit_requested());
}

#[test]
fn test_gravity_brings_piece_to_rest_and_locks() {
    let mut game = scripted_game(&[ShapeKind::O], ClearMode::Immediate);

    // 18 gravity rows to reach the floor, one more to lock.
    for _ in 0..18 {
        assert!(game.step(501, &[]).is_empty());
    }
    assert_eq!(game.current().y, 18);
    assert_eq!(game.board().occupied_count(), 0);

    game.step(501, &[]);
    assert_eq!(game.board().occupied_count(), 4);
    assert_eq!(game.current().y, 0);
}

#[test]
fn test_small_frames_accumulate_into_gravity() {
    let mut game = GameState::new(3);
    for _ in 0..31 {
        game.step(16, &[]);
    }
    // 31 * 16 = 496
    assert_eq!(game.current().y, 0);
    game.step(16, &[]);
    assert_eq!(game.current().y, 1);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Command::MoveLeft,
        Command::RotateCw,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::HardDrop,
        Command::SoftDrop,
        Command::HardDrop,
    ];

    let mut a = GameState::new(4242);
    let mut b = GameState::new(4242);
    for &command in script.iter().cycle().take(80) {
        assert_eq!(a.step(100, &[command]), b.step(100, &[command]));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_custom_board_size() {
    let config = EngineConfig::default().with_size(6, 8).with_seed(5);
    let game = GameState::with_config(config).unwrap();
    let snap = game.snapshot();
    assert_eq!((snap.cols, snap.rows), (6, 8));
    assert_eq!(snap.board.len(), 48);
    assert!(game.board().is_valid_placement(game.current(), 0, 0));
}
