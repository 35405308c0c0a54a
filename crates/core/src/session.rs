//! Game session - spawn, tick, lock, score, and game-over orchestration
//!
//! The session owns the grid, the catalog (via its config), the score tracker
//! and at most one active piece. A driver calls [`GameSession::tick`] once per
//! frame with the elapsed time and an input source; everything else happens
//! inside that call in a fixed order:
//!
//! 1. game over: return immediately
//! 2. vacate the active footprint
//! 3. drift step (drift shape only, on its own timer)
//! 4. input, at most once each: left, right, down, rotate, hard drop
//! 5. gravity step; a blocked fall locks the piece
//! 6. re-occupy the footprint if nothing locked
//!
//! Between ticks the grid holds the active piece's footprint, so the grid is
//! also the complete render view.

use tracing::{debug, info};

use crate::config::{spawn_anchor, ConfigError, SessionConfig};
use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::rng::SimpleRng;
use crate::score::{lock_score, ScoreEvent, ScoreTracker};
use crate::types::{InputAction, InputSource, RenderSink, ShapeKind};

/// Session lifecycle.
///
/// Between ticks a session is always `Active` or `GameOver`; `Spawning` only
/// exists while a lock hands over to the next spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Spawning,
    Active(ActivePiece),
    GameOver,
}

/// Outcome of a lock (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: ShapeKind,
    pub lines_cleared: u32,
    pub score_awarded: u32,
    pub bonus_applied: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    grid: Grid,
    state: SessionState,
    score: ScoreTracker,
    rng: SimpleRng,
    /// Monotonic clock, accumulated from tick elapsed times.
    now_ms: u64,
    lines: u32,
    pieces_locked: u32,
    last_lock: Option<LockEvent>,
}

impl GameSession {
    /// Validate `config` and spawn the first piece.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut session = Self {
            grid: Grid::new(config.board_width, config.board_height),
            rng: SimpleRng::new(config.seed),
            config,
            state: SessionState::Spawning,
            score: ScoreTracker::new(),
            now_ms: 0,
            lines: 0,
            pieces_locked: 0,
            last_lock: None,
        };
        info!(
            width = session.grid.width(),
            height = session.grid.height(),
            shapes = session.config.catalog.len(),
            seed = session.config.seed,
            "session started"
        );
        session.spawn_piece();
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        match &self.state {
            SessionState::Active(piece) => Some(piece),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, SessionState::GameOver)
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn score_tracker(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Take pending score/game-over notifications.
    pub fn take_score_events(&mut self) -> Vec<ScoreEvent> {
        self.score.take_events()
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    /// Replay pending occupancy changes into `sink`.
    pub fn flush_draws(&mut self, sink: &mut impl RenderSink) {
        self.grid.drain_draws_into(sink);
    }

    /// Spawn a random catalog shape at the spawn anchor.
    ///
    /// No-op after game over. A blocked spawn ends the game without placing
    /// anything. Any current active piece is replaced and its footprint vacated.
    pub fn spawn_piece(&mut self) {
        if self.is_game_over() {
            return;
        }
        let index = self.rng.pick_index(self.config.catalog.len());
        self.spawn_index(index);
    }

    fn spawn_index(&mut self, index: usize) {
        if let SessionState::Active(previous) = &self.state {
            self.grid.vacate(previous.cells());
        }

        let Some(shape) = self.config.catalog.get(index) else {
            return;
        };
        let anchor = spawn_anchor(&self.grid);
        if !self.grid.is_valid_position(anchor, &shape.cells) {
            info!(
                kind = shape.kind.as_str(),
                score = self.score.score(),
                "spawn blocked, game over"
            );
            self.state = SessionState::GameOver;
            self.score.set_game_over(true);
            return;
        }

        let piece = ActivePiece::spawn(
            shape,
            anchor,
            self.now_ms,
            self.config.gravity_interval_ms,
            self.config.drift_interval_ms,
        );
        debug!(kind = piece.kind().as_str(), "spawned");
        self.grid.occupy(piece.cells(), piece.tile());
        self.state = SessionState::Active(piece);
    }

    /// Advance the session by `elapsed_ms`, polling `input` once.
    ///
    /// Returns true if the active piece locked during this tick.
    pub fn tick(&mut self, elapsed_ms: u32, input: &impl InputSource) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.now_ms += elapsed_ms as u64;
        let now = self.now_ms;

        let SessionState::Active(piece) = &mut self.state else {
            return false;
        };

        self.grid.vacate(piece.cells());

        if piece.take_drift_due(now, self.config.drift_interval_ms) {
            piece.drift_step(&self.grid);
        }

        let mut lock = false;
        for action in InputAction::PRIORITY {
            if !input.was_pressed(action) {
                continue;
            }
            match action {
                InputAction::MoveLeft => {
                    piece.try_move(&self.grid, -1, 0);
                }
                InputAction::MoveRight => {
                    piece.try_move(&self.grid, 1, 0);
                }
                InputAction::MoveDown => {
                    piece.try_move(&self.grid, 0, -1);
                }
                InputAction::Rotate => {
                    piece.rotate(&self.grid);
                }
                InputAction::HardDrop => {
                    piece.hard_drop(&self.grid);
                    lock = true;
                }
            }
        }

        if !lock
            && piece.take_gravity_due(now, self.config.gravity_interval_ms)
            && !piece.try_move(&self.grid, 0, -1)
        {
            lock = true;
        }

        if lock {
            self.lock_and_continue();
            return true;
        }

        self.grid.occupy(piece.cells(), piece.tile());
        false
    }

    /// Commit the active piece, clear rows, score, and spawn the next piece.
    fn lock_and_continue(&mut self) {
        let SessionState::Active(piece) =
            std::mem::replace(&mut self.state, SessionState::Spawning)
        else {
            return;
        };

        self.grid.occupy(piece.cells(), piece.tile());
        let cleared = self.grid.clear_completed_rows();
        let drift_shape = piece.is_drift_enabled();
        let awarded = lock_score(
            cleared,
            drift_shape,
            &self.config.line_scores,
            self.config.drift_bonus,
        );
        if cleared > 0 {
            self.score.add_score(awarded);
        }

        self.lines += cleared as u32;
        self.pieces_locked += 1;
        self.last_lock = Some(LockEvent {
            kind: piece.kind(),
            lines_cleared: cleared as u32,
            score_awarded: awarded,
            bonus_applied: drift_shape && cleared > 0,
        });
        debug!(
            kind = piece.kind().as_str(),
            lines = cleared,
            awarded,
            score = self.score.score(),
            "piece locked"
        );

        self.spawn_piece();
    }

    /// Reset score and grid and spawn a fresh piece (the "play again" path).
    ///
    /// The random source keeps running, so a restarted session does not
    /// replay the previous sequence.
    pub fn restart(&mut self) {
        info!(final_score = self.score.score(), lines = self.lines, "restart");
        self.score.reset_state();
        self.grid.clear();
        self.state = SessionState::Spawning;
        self.lines = 0;
        self.pieces_locked = 0;
        self.last_lock = None;
        self.spawn_piece();
    }

    /// Restart only from the game-over state. Returns whether it restarted.
    pub fn play_again(&mut self) -> bool {
        if !self.is_game_over() {
            return false;
        }
        self.restart();
        true
    }
}
