//! Hud: score and status observer.
//!
//! Fed from the session's score notifications and lock events after each
//! tick; never queries the session directly.

use crate::core::{LockEvent, ScoreEvent};
use crate::types::ShapeKind;

/// How long the "bonus" banner stays up after a drift-shape clear.
pub const BONUS_BANNER_MS: u32 = 1200;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    score: u32,
    game_over: bool,
    lines: u32,
    pieces: u32,
    last_kind: Option<ShapeKind>,
    bonus_banner_ms: u32,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn last_kind(&self) -> Option<ShapeKind> {
        self.last_kind
    }

    pub fn bonus_banner_visible(&self) -> bool {
        self.bonus_banner_ms > 0
    }

    pub fn apply_score_event(&mut self, event: ScoreEvent) {
        match event {
            ScoreEvent::ScoreChanged(score) => self.score = score,
            ScoreEvent::GameOverChanged(game_over) => self.game_over = game_over,
        }
    }

    pub fn apply_score_events(&mut self, events: impl IntoIterator<Item = ScoreEvent>) {
        for event in events {
            self.apply_score_event(event);
        }
    }

    pub fn apply_lock(&mut self, event: LockEvent) {
        self.lines += event.lines_cleared;
        self.pieces += 1;
        self.last_kind = Some(event.kind);
        if event.bonus_applied {
            self.bonus_banner_ms = BONUS_BANNER_MS;
        }
    }

    /// Age timed banners.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.bonus_banner_ms = self.bonus_banner_ms.saturating_sub(elapsed_ms);
    }

    /// Forget per-game counters (after a restart). Score and game-over arrive
    /// as events from the session.
    pub fn reset_counters(&mut self) {
        self.lines = 0;
        self.pieces = 0;
        self.last_kind = None;
        self.bonus_banner_ms = 0;
    }
}
