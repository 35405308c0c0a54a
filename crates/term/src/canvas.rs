//! BoardCanvas: the presentation-side mirror of a session grid.
//!
//! The canvas never reads the grid; it is fed only by the draw calls the
//! session flushes after each tick, so it doubles as a check that the draw
//! stream alone is enough to reproduce the board.

use crate::core::Grid;
use crate::types::{Coord, RenderSink, TileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCanvas {
    left: i32,
    bottom: i32,
    width: i32,
    height: i32,
    /// Row-major, bottom row first, same layout as the grid.
    tiles: Vec<Option<TileId>>,
    dirty: bool,
}

impl BoardCanvas {
    /// Empty canvas with the same bounds as `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        let width = grid.width().max(0);
        let height = grid.height().max(0);
        Self {
            left: grid.left(),
            bottom: grid.bottom(),
            width,
            height,
            tiles: vec![None; (width as usize).saturating_mul(height as usize)],
            dirty: true,
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn top(&self) -> i32 {
        self.bottom + self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, (x, y): Coord) -> Option<usize> {
        let cx = x - self.left;
        let cy = y - self.bottom;
        if cx < 0 || cx >= self.width || cy < 0 || cy >= self.height {
            return None;
        }
        Some(cy as usize * self.width as usize + cx as usize)
    }

    pub fn tile_at(&self, cell: Coord) -> Option<TileId> {
        self.index(cell).and_then(|i| self.tiles[i])
    }

    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    /// Whether anything changed since the last [`BoardCanvas::take_dirty`].
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl RenderSink for BoardCanvas {
    fn occupy(&mut self, cell: Coord, tile: TileId) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = Some(tile);
            self.dirty = true;
        }
    }

    fn vacate(&mut self, cell: Coord) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = None;
            self.dirty = true;
        }
    }
}
