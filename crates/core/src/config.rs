//! Session configuration - loaded once, validated before the first spawn
//!
//! Sources are layered: defaults, then an optional JSON file, then
//! environment overrides. [`SessionConfig::validate`] rejects anything the
//! simulation cannot run with, so problems surface at construction rather
//! than mid-game.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::ShapeCatalog;
use crate::grid::Grid;
use crate::types::{
    Coord, Offset, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_DRIFT_BONUS,
    DEFAULT_DRIFT_MS, DEFAULT_GRAVITY_MS, DEFAULT_LINE_SCORES, SPAWN_ROWS_BELOW_TOP,
};

/// Configuration errors, reported before any spawn is attempted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    NonPositiveDimensions { width: i32, height: i32 },
    #[error("board {width}x{height} exceeds the {max}x{max} limit")]
    BoardTooLarge { width: i32, height: i32, max: i32 },
    #[error("shape catalog is empty")]
    EmptyCatalog,
    #[error("shape #{index} has no cells")]
    EmptyShape { index: usize },
    #[error("shape #{index} lists offset {offset:?} more than once")]
    DuplicateOffset { index: usize, offset: Offset },
    #[error("no shape in the catalog is marked as the drift shape")]
    MissingDriftShape,
    #[error("{count} shapes are marked as the drift shape, expected exactly one")]
    MultipleDriftShapes { count: usize },
    #[error("shape #{index} does not fit at spawn anchor {anchor:?} on an empty board")]
    ShapeDoesNotFit { index: usize, anchor: Coord },
    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything a session needs before the first spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub board_width: i32,
    pub board_height: i32,
    pub catalog: ShapeCatalog,
    pub gravity_interval_ms: u32,
    pub drift_interval_ms: u32,
    /// Flat bonus added when the drift shape clears at least one row.
    pub drift_bonus: u32,
    /// Points for 1, 2, 3 and 4+ rows cleared by one lock.
    pub line_scores: [u32; 4],
    /// Seed for shape selection.
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            catalog: ShapeCatalog::standard(),
            gravity_interval_ms: DEFAULT_GRAVITY_MS,
            drift_interval_ms: DEFAULT_DRIFT_MS,
            drift_bonus: DEFAULT_DRIFT_BONUS,
            line_scores: DEFAULT_LINE_SCORES,
            seed: 1,
        }
    }
}

/// Largest accepted board width or height.
pub const MAX_BOARD_DIMENSION: i32 = 1024;

/// Spawn anchor for a grid: centered column, two rows below the top bound.
pub fn spawn_anchor(grid: &Grid) -> Coord {
    (0, grid.top() - SPAWN_ROWS_BELOW_TOP)
}

impl SessionConfig {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply `TETRIS_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparseable values are ignored and the current value is kept.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        if let Some(v) = parsed(&lookup, "TETRIS_SEED") {
            self.seed = v;
        }
        if let Some(v) = parsed(&lookup, "TETRIS_GRAVITY_MS") {
            self.gravity_interval_ms = v;
        }
        if let Some(v) = parsed(&lookup, "TETRIS_DRIFT_MS") {
            self.drift_interval_ms = v;
        }
        if let Some(v) = parsed(&lookup, "TETRIS_BOARD_WIDTH") {
            self.board_width = v;
        }
        if let Some(v) = parsed(&lookup, "TETRIS_BOARD_HEIGHT") {
            self.board_height = v;
        }
    }

    /// Check everything the session relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width <= 0 || self.board_height <= 0 {
            return Err(ConfigError::NonPositiveDimensions {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.board_width > MAX_BOARD_DIMENSION || self.board_height > MAX_BOARD_DIMENSION {
            return Err(ConfigError::BoardTooLarge {
                width: self.board_width,
                height: self.board_height,
                max: MAX_BOARD_DIMENSION,
            });
        }
        if self.gravity_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "gravity_interval_ms",
            });
        }
        if self.drift_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "drift_interval_ms",
            });
        }
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let drift_count = self.catalog.iter().filter(|s| s.drift).count();
        match drift_count {
            0 => return Err(ConfigError::MissingDriftShape),
            1 => {}
            count => return Err(ConfigError::MultipleDriftShapes { count }),
        }

        let grid = Grid::new(self.board_width, self.board_height);
        let anchor = spawn_anchor(&grid);
        for (index, shape) in self.catalog.iter().enumerate() {
            if shape.cells.is_empty() {
                return Err(ConfigError::EmptyShape { index });
            }
            for (i, offset) in shape.cells.iter().enumerate() {
                if shape.cells[..i].contains(offset) {
                    return Err(ConfigError::DuplicateOffset {
                        index,
                        offset: *offset,
                    });
                }
            }
            if !grid.is_valid_position(anchor, &shape.cells) {
                return Err(ConfigError::ShapeDoesNotFit { index, anchor });
            }
        }

        Ok(())
    }
}
