//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`KeyCommand`]s and collects
//! edge-triggered presses into the [`crate::types::InputFrame`] a session
//! polls once per tick.

pub mod map;
pub mod tracker;

pub use drift_tetris_types as types;

pub use map::{handle_key_event, should_quit, KeyCommand};
pub use tracker::PressTracker;
