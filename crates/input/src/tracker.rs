//! Per-tick press collection.
//!
//! The session polls each action once per tick and wants "was it pressed
//! since the last tick", not "is it held". Terminals report key presses and
//! (sometimes) auto-repeats and releases; only presses count here.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, KeyCommand};
use crate::types::{InputAction, InputFrame};

/// Collects presses between ticks and hands them over as an [`InputFrame`].
#[derive(Debug, Clone, Default)]
pub struct PressTracker {
    frame: InputFrame,
    restart: bool,
    quit: bool,
}

impl PressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal key event.
    ///
    /// Repeat and release events are ignored. Returns the mapped command,
    /// if any, for callers that want to react immediately.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<KeyCommand> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let command = handle_key_event(key)?;
        match command {
            KeyCommand::Action(action) => self.frame.press(action),
            KeyCommand::Restart => self.restart = true,
            KeyCommand::Quit => self.quit = true,
        }
        Some(command)
    }

    /// Record a press directly (tests, scripted input).
    pub fn press(&mut self, action: InputAction) {
        self.frame.press(action);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Whether a restart was requested since the last call; clears the request.
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    /// Hand over this tick's presses and start a fresh frame.
    pub fn take_frame(&mut self) -> InputFrame {
        std::mem::take(&mut self.frame)
    }
}
