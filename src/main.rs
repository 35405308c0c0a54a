//! Terminal runner (default binary).
//!
//! Fixed-timestep loop: poll keys, tick the session, forward draw calls and
//! notifications to the front-end, render a diffed frame.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use drift_tetris::cli::{build_config, parse_args, USAGE};
use drift_tetris::core::{GameSession, SessionConfig};
use drift_tetris::input::PressTracker;
use drift_tetris::term::{BoardCanvas, FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use drift_tetris::types::TICK_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    init_logging()?;
    let config = build_config(&cli, |key| std::env::var(key).ok())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file only: the terminal belongs to the game.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("TETRIS_LOG_PATH") else {
        return Ok(());
    };
    let level = std::env::var("TETRIS_LOG_LEVEL")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    info!("Logging initialized at level: {}", level);
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: SessionConfig) -> Result<()> {
    let mut session = GameSession::new(config)?;
    let mut canvas = BoardCanvas::for_grid(session.grid());
    let mut hud = Hud::new();
    let mut keys = PressTracker::new();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    session.flush_draws(&mut canvas);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&canvas, &hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    keys.handle_key(key);
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }
        if keys.quit_requested() {
            info!(score = session.score(), "quit");
            return Ok(());
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let elapsed = last_tick.elapsed().as_millis().min(u32::MAX as u128) as u32;
            last_tick = Instant::now();

            // R only counts on the game-over panel.
            if keys.take_restart() && session.play_again() {
                hud.reset_counters();
                // Input pressed before the restart belongs to the old game.
                keys.take_frame();
            }

            let frame = keys.take_frame();
            session.tick(elapsed, &frame);
            hud.tick(elapsed);

            session.flush_draws(&mut canvas);
            hud.apply_score_events(session.take_score_events());
            if let Some(lock) = session.take_last_lock() {
                hud.apply_lock(lock);
            }
        }
    }
}
