//! Terminal front-end for a game session.
//!
//! A small, game-oriented rendering layer: no widget toolkit, just a
//! framebuffer that is diffed and flushed to the terminal.
//!
//! - [`BoardCanvas`] receives the session's draw calls
//! - [`Hud`] receives score and lock notifications
//! - [`GameView`] turns both into a [`FrameBuffer`] (pure, testable)
//! - [`TerminalRenderer`] writes frames to stdout

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod hud;
pub mod renderer;

pub use drift_tetris_core as core;
pub use drift_tetris_types as types;

pub use canvas::BoardCanvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_color, AnchorY, GameView, Viewport, GAME_OVER_TEXT, PLAY_AGAIN_TEXT};
pub use hud::Hud;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
