//! Scoring module - line-clear table, bonus rule, and the score tracker
//!
//! A lock that clears rows earns a table value for the number of rows cleared
//! at once (the last entry covers four or more). A clearing lock of the drift
//! shape adds a flat bonus once, regardless of how many rows went.

/// Points for a lock that cleared `lines` rows.
///
/// `table` holds the values for 1, 2, 3 and 4+ rows. Zero rows earn nothing.
pub fn line_clear_score(lines: usize, table: &[u32; 4]) -> u32 {
    match lines {
        0 => 0,
        1..=3 => table[lines - 1],
        _ => table[3],
    }
}

/// Total points for a lock event, including the drift-shape bonus.
pub fn lock_score(lines: usize, drift_shape: bool, table: &[u32; 4], bonus: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base = line_clear_score(lines, table);
    if drift_shape {
        base.saturating_add(bonus)
    } else {
        base
    }
}

/// Most notifications held between drains; older ones are dropped first.
pub const MAX_PENDING_EVENTS: usize = 64;

/// Change notification emitted by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    ScoreChanged(u32),
    GameOverChanged(bool),
}

/// Running score and game-over flag.
///
/// Observers read notifications with [`ScoreTracker::take_events`] after each
/// tick; events are delivered in the order they happened. Each event carries
/// the full new value, so dropping the oldest past [`MAX_PENDING_EVENTS`]
/// still leaves an undrained observer with the current state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    game_over: bool,
    events: Vec<ScoreEvent>,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
        self.notify(ScoreEvent::ScoreChanged(self.score));
    }

    pub fn set_game_over(&mut self, game_over: bool) {
        self.game_over = game_over;
        self.notify(ScoreEvent::GameOverChanged(game_over));
    }

    fn notify(&mut self, event: ScoreEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Back to (0, false), notifying both channels. Only used by restart.
    pub fn reset_state(&mut self) {
        self.score = 0;
        self.notify(ScoreEvent::ScoreChanged(0));
        self.set_game_over(false);
    }

    /// Take and clear pending notifications.
    pub fn take_events(&mut self) -> Vec<ScoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}
