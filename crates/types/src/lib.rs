//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data plus the two collaborator traits the
//! simulation talks to ([`InputSource`] and [`RenderSink`]), so it can be
//! used by the core, the terminal front-end, and tests alike.
//!
//! # Coordinates
//!
//! The playfield is centered on the origin and uses a y-up convention:
//!
//! - **x** grows to the right, **y** grows upwards
//! - A `10 x 20` board spans `x in [-5, 5)` and `y in [-10, 10)`
//! - Pieces spawn at `(0, top - 2)`
//!
//! # Default Session Values
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_WIDTH` | 10 | Columns |
//! | `DEFAULT_BOARD_HEIGHT` | 20 | Rows |
//! | `TICK_MS` | 16 | Fixed timestep of the terminal driver (~60 FPS) |
//! | `DEFAULT_GRAVITY_MS` | 800 | Interval between gravity steps |
//! | `DEFAULT_DRIFT_MS` | 350 | Interval between drift steps of the bonus piece |
//! | `DEFAULT_DRIFT_BONUS` | 200 | Flat bonus for a clearing lock of the bonus piece |
//! | `DEFAULT_LINE_SCORES` | 100/300/500/800 | Points for 1, 2, 3, 4+ rows cleared at once |
//!
//! # Examples
//!
//! ```
//! use drift_tetris_types::{InputAction, InputFrame, InputSource, ShapeKind};
//!
//! let kind = ShapeKind::from_str("bonus").unwrap();
//! assert_eq!(kind, ShapeKind::Bonus);
//!
//! let mut frame = InputFrame::new();
//! frame.press(InputAction::Rotate);
//! assert!(frame.was_pressed(InputAction::Rotate));
//! assert!(!frame.was_pressed(InputAction::HardDrop));
//! ```

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Board dimensions
pub const DEFAULT_BOARD_WIDTH: i32 = 10;
pub const DEFAULT_BOARD_HEIGHT: i32 = 20;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const DEFAULT_GRAVITY_MS: u32 = 800;
pub const DEFAULT_DRIFT_MS: u32 = 350;

/// Scoring defaults
pub const DEFAULT_DRIFT_BONUS: u32 = 200;
pub const DEFAULT_LINE_SCORES: [u32; 4] = [100, 300, 500, 800];

/// Spawn anchor sits this many rows below the top bound.
pub const SPAWN_ROWS_BELOW_TOP: i32 = 2;

/// Local cell offset relative to a piece anchor.
pub type Offset = (i32, i32);

/// Absolute board coordinate.
pub type Coord = (i32, i32);

/// Opaque draw-tile identifier. The core never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u16);

/// Shape kinds in the catalog.
///
/// `Bonus` is the Z-shaped piece that drifts sideways on its own and pays a
/// flat bonus when it clears rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    Bonus,
}

impl ShapeKind {
    /// Parse shape kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "bonus" => Some(ShapeKind::Bonus),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::Bonus => "bonus",
        }
    }
}

/// Discrete per-tick player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    HardDrop,
}

impl InputAction {
    /// Order in which a tick polls the input source.
    pub const PRIORITY: [InputAction; 5] = [
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::MoveDown,
        InputAction::Rotate,
        InputAction::HardDrop,
    ];

    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputAction::MoveLeft),
            "moveright" => Some(InputAction::MoveRight),
            "movedown" => Some(InputAction::MoveDown),
            "rotate" => Some(InputAction::Rotate),
            "harddrop" => Some(InputAction::HardDrop),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            InputAction::MoveLeft => "moveLeft",
            InputAction::MoveRight => "moveRight",
            InputAction::MoveDown => "moveDown",
            InputAction::Rotate => "rotate",
            InputAction::HardDrop => "hardDrop",
        }
    }
}

/// Edge-triggered input queried once per tick.
pub trait InputSource {
    /// Whether `action` was newly pressed since the previous tick.
    fn was_pressed(&self, action: InputAction) -> bool;
}

/// Input source that never reports a press (headless driving, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn was_pressed(&self, _action: InputAction) -> bool {
        false
    }
}

/// Set of actions pressed during one tick.
///
/// Each action is recorded at most once, so five slots always suffice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    pressed: ArrayVec<InputAction, 5>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(actions: &[InputAction]) -> Self {
        let mut frame = Self::new();
        for &action in actions {
            frame.press(action);
        }
        frame
    }

    /// Record a press. Repeated presses within one frame collapse.
    pub fn press(&mut self, action: InputAction) {
        if !self.pressed.contains(&action) {
            self.pressed.push(action);
        }
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }

    pub fn pressed(&self) -> &[InputAction] {
        &self.pressed
    }
}

impl InputSource for InputFrame {
    fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(&action)
    }
}

/// A single change to the occupancy view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    Occupy(Coord, TileId),
    Vacate(Coord),
}

/// Receiver of per-cell draw calls.
pub trait RenderSink {
    fn occupy(&mut self, cell: Coord, tile: TileId);
    fn vacate(&mut self, cell: Coord);

    /// Dispatch a recorded call.
    fn apply(&mut self, call: DrawCall) {
        match call {
            DrawCall::Occupy(cell, tile) => self.occupy(cell, tile),
            DrawCall::Vacate(cell) => self.vacate(cell),
        }
    }
}

impl RenderSink for Vec<DrawCall> {
    fn occupy(&mut self, cell: Coord, tile: TileId) {
        self.push(DrawCall::Occupy(cell, tile));
    }

    fn vacate(&mut self, cell: Coord) {
        self.push(DrawCall::Vacate(cell));
    }
}
