//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the drifting-tetromino game and no I/O:
//! the same config and seed always produce the same session.
//!
//! # Module Structure
//!
//! - [`grid`]: centered occupancy store with row clearing and a draw journal
//! - [`catalog`]: shape definitions and the quarter-turn rotation
//! - [`piece`]: the active piece (movement, rotation kicks, drift, timers)
//! - [`score`]: line-clear table, drift bonus, and the score tracker
//! - [`config`]: layered session configuration and validation
//! - [`rng`]: seedable uniform shape selection
//! - [`session`]: the tick loop tying it all together
//!
//! # Example
//!
//! ```
//! use drift_tetris_core::{GameSession, SessionConfig};
//! use drift_tetris_core::types::{InputAction, InputFrame, NoInput};
//!
//! let mut session = GameSession::new(SessionConfig::default()).unwrap();
//!
//! // One frame with no input, then a hard drop
//! session.tick(16, &NoInput);
//! let locked = session.tick(16, &InputFrame::with(&[InputAction::HardDrop]));
//!
//! assert!(locked);
//! assert_eq!(session.pieces_locked(), 1);
//! ```
//!
//! # Timing
//!
//! [`GameSession::tick`] takes the milliseconds elapsed since the previous
//! call. Gravity and drift deadlines are compared against the accumulated
//! clock, so a long frame fires each timer at most once.

pub mod catalog;
pub mod config;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod score;
pub mod session;

pub use drift_tetris_types as types;

// Re-export commonly used types for convenience
pub use catalog::{rotate_offset, ShapeCatalog, ShapeDefinition};
pub use config::{spawn_anchor, ConfigError, SessionConfig, MAX_BOARD_DIMENSION};
pub use grid::{Grid, MIN_JOURNAL_CAP};
pub use piece::{ActivePiece, Drift};
pub use rng::SimpleRng;
pub use score::{line_clear_score, lock_score, ScoreEvent, ScoreTracker, MAX_PENDING_EVENTS};
pub use session::{GameSession, LockEvent, SessionState};
