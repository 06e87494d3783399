//! Terminal blockfall runner (default binary).
//!
//! Polls crossterm for keys, feeds commands and elapsed time to the core, and
//! renders snapshots through the framebuffer renderer. In the default deferred
//! clear mode it also times the two-stage line flash before letting the core
//! compact the board.

mod logging;

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, info};

use tui_blockfall::core::{ClearMode, EngineConfig, GameSnapshot, GameState};
use tui_blockfall::input::command_for_key;
use tui_blockfall::term::{FrameBuffer, GameView, LineFlash, TerminalRenderer, Viewport};
use tui_blockfall::types::{
    Command, GameEvent, Phase, DEFAULT_COLS, DEFAULT_ROWS, FALL_INTERVAL_MS, TICK_MS,
};

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about = "Falling-block puzzle in the terminal")]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: u8,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: u8,

    /// Milliseconds between gravity steps
    #[arg(long = "fall-ms", default_value_t = FALL_INTERVAL_MS)]
    fall_ms: u32,

    /// Piece sequence seed (default: derived from the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Clear lines immediately, without the flash animation
    #[arg(long)]
    no_flash: bool,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        let clear_mode = if self.no_flash {
            ClearMode::Immediate
        } else {
            ClearMode::Deferred
        };
        EngineConfig::default()
            .with_size(self.cols, self.rows)
            .with_fall_interval_ms(self.fall_ms)
            .with_seed(self.seed.unwrap_or_else(clock_seed))
            .with_clear_mode(clear_mode)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let config = args.engine_config();
    let game = GameState::with_config(config).context("invalid game configuration")?;
    info!(
        cols = config.cols,
        rows = config.rows,
        fall_ms = config.fall_interval_ms,
        seed = config.seed,
        "starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: GameState) -> Result<()> {
    let view = GameView::default();
    let deferred = game.config().clear_mode == ClearMode::Deferred;
    let mut flash = LineFlash::default();

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut commands: Vec<Command> = Vec::with_capacity(8);
    let mut events: Vec<GameEvent> = Vec::with_capacity(8);

    let tick = Duration::from_millis(u64::from(TICK_MS));
    let mut last_step = Instant::now();

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, flash.stage(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick; drain everything already queued.
        commands.clear();
        let mut timeout = tick.saturating_sub(last_step.elapsed());
        while event::poll(timeout).context("poll terminal events")? {
            match event::read().context("read terminal event")? {
                Event::Key(key) => {
                    if let Some(command) = command_for_key(key) {
                        commands.push(restart_alias(command, game.phase()));
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
            timeout = Duration::ZERO;
        }

        let now = Instant::now();
        let elapsed_ms = u32::try_from(now.duration_since(last_step).as_millis()).unwrap_or(u32::MAX);
        last_step = now;

        if flash.advance(elapsed_ms) {
            game.finish_clear_into(&mut events);
            log_events(&events);
        }

        game.step_into(elapsed_ms, &commands, &mut events);
        log_events(&events);
        if deferred && events.iter().any(|e| matches!(e, GameEvent::LinesFull(_))) {
            flash.start();
        }

        if game.quit_requested() {
            info!(score = game.score(), lines = game.lines_cleared(), "quit");
            return Ok(());
        }
    }
}

/// On the game-over screen Space (hard drop) starts a new game.
fn restart_alias(command: Command, phase: Phase) -> Command {
    match (command, phase) {
        (Command::HardDrop, Phase::GameOver) => Command::Reset,
        _ => command,
    }
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        debug!(?event, "game event");
    }
}
