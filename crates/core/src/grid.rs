//! Grid module - bounded occupancy store
//!
//! The grid is centered on the origin: `x in [left, right)`, `y in [bottom, top)`
//! with `left = -width / 2`, `right = width / 2` (same for height). Cells are
//! kept in a flat row-major vector starting at the bottom row.
//!
//! Every occupancy change is also appended to a draw journal, one
//! [`DrawCall`] per affected cell, which the presentation layer drains into
//! its [`RenderSink`]. The journal holds at most twice the cell count (and
//! never less than [`MIN_JOURNAL_CAP`]). Past that the backlog is dropped and
//! the next drain replays every cell instead.

use crate::types::{Coord, DrawCall, Offset, RenderSink, TileId};

/// Lower bound on the journal capacity for very small boards.
pub const MIN_JOURNAL_CAP: usize = 64;

/// Occupancy store for a single session.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    left: i32,
    right: i32,
    bottom: i32,
    top: i32,
    /// Row-major, bottom row first: `(y - bottom) * width + (x - left)`
    cells: Vec<Option<TileId>>,
    journal: Vec<DrawCall>,
    /// Journal overflowed; the next drain replays the whole board.
    resync: bool,
}

impl Grid {
    /// Create an empty grid. Dimensions must be positive (checked by config validation).
    pub fn new(width: i32, height: i32) -> Self {
        let (left, right) = (-width / 2, width / 2);
        let (bottom, top) = (-height / 2, height / 2);
        let cols = (right - left).max(0) as usize;
        let rows = (top - bottom).max(0) as usize;
        let len = cols.saturating_mul(rows);
        Self {
            left,
            right,
            bottom,
            top,
            cells: vec![None; len],
            journal: Vec::new(),
            resync: false,
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    /// Number of columns inside the bounds
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Number of rows inside the bounds
    pub fn height(&self) -> i32 {
        self.top - self.bottom
    }

    #[inline(always)]
    fn index(&self, (x, y): Coord) -> Option<usize> {
        if !self.in_bounds((x, y)) {
            return None;
        }
        Some((y - self.bottom) as usize * self.width() as usize + (x - self.left) as usize)
    }

    #[inline(always)]
    pub fn in_bounds(&self, (x, y): Coord) -> bool {
        x >= self.left && x < self.right && y >= self.bottom && y < self.top
    }

    /// Tile at `cell`, `None` when empty or out of bounds
    pub fn tile_at(&self, cell: Coord) -> Option<TileId> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    pub fn is_occupied(&self, cell: Coord) -> bool {
        self.tile_at(cell).is_some()
    }

    /// Whether every `anchor + offset` is in bounds and empty.
    pub fn is_valid_position(&self, anchor: Coord, local_cells: &[Offset]) -> bool {
        local_cells.iter().all(|&(dx, dy)| {
            let cell = (anchor.0 + dx, anchor.1 + dy);
            matches!(self.index(cell), Some(i) if self.cells[i].is_none())
        })
    }

    fn set(&mut self, cell: Coord, tile: TileId) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = Some(tile);
            self.record(DrawCall::Occupy(cell, tile));
        }
    }

    fn unset(&mut self, cell: Coord) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = None;
            self.record(DrawCall::Vacate(cell));
        }
    }

    fn journal_cap(&self) -> usize {
        self.cells.len().saturating_mul(2).max(MIN_JOURNAL_CAP)
    }

    fn record(&mut self, call: DrawCall) {
        if self.resync {
            return;
        }
        if self.journal.len() >= self.journal_cap() {
            self.journal = Vec::new();
            self.resync = true;
            return;
        }
        self.journal.push(call);
    }

    /// Mark each absolute cell occupied with `tile`. Out-of-bounds cells are ignored.
    pub fn occupy(&mut self, cells: &[Coord], tile: TileId) {
        for &cell in cells {
            self.set(cell, tile);
        }
    }

    /// Remove occupancy for each absolute cell.
    pub fn vacate(&mut self, cells: &[Coord]) {
        for &cell in cells {
            self.unset(cell);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < self.bottom || y >= self.top {
            return false;
        }
        let start = (y - self.bottom) as usize * self.width() as usize;
        let end = start + self.width() as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    fn vacate_row(&mut self, y: i32) {
        for x in self.left..self.right {
            if self.is_occupied((x, y)) {
                self.unset((x, y));
            }
        }
    }

    /// Move every occupied cell above `row` down by one, keeping its tile.
    fn shift_down_above(&mut self, row: i32) {
        for y in row + 1..self.top {
            for x in self.left..self.right {
                let Some(tile) = self.tile_at((x, y)) else {
                    continue;
                };
                self.set((x, y - 1), tile);
                self.unset((x, y));
            }
        }
    }

    /// Clear all full rows, compacting the rows above each one.
    ///
    /// Rows are scanned bottom to top. After a clear the same row index is
    /// examined again, since the row above has just moved into it.
    /// Returns the number of rows cleared.
    pub fn clear_completed_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.bottom;
        while y < self.top {
            if self.is_row_full(y) {
                self.vacate_row(y);
                self.shift_down_above(y);
                cleared += 1;
            } else {
                y += 1;
            }
        }
        cleared
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for y in self.bottom..self.top {
            self.vacate_row(y);
        }
    }

    /// Occupied cells, bottom row first
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Coord, TileId)> + '_ {
        let width = self.width();
        self.cells.iter().enumerate().filter_map(move |(i, tile)| {
            let i = i as i32;
            tile.map(|t| ((self.left + i % width, self.bottom + i / width), t))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of draw calls waiting to be drained
    pub fn pending_draws(&self) -> usize {
        if self.resync {
            self.cells.len()
        } else {
            self.journal.len()
        }
    }

    /// Whether the next drain replays every cell rather than the journal.
    pub fn needs_resync(&self) -> bool {
        self.resync
    }

    /// Replay and clear the draw journal.
    ///
    /// After an overflow this emits one call per cell instead: `Occupy` for
    /// occupied cells and `Vacate` for empty ones.
    pub fn drain_draws_into(&mut self, sink: &mut impl RenderSink) {
        if std::mem::take(&mut self.resync) {
            self.journal.clear();
            let width = self.width() as usize;
            for (i, tile) in self.cells.iter().enumerate() {
                let cell = (self.left + (i % width) as i32, self.bottom + (i / width) as i32);
                match *tile {
                    Some(t) => sink.occupy(cell, t),
                    None => sink.vacate(cell),
                }
            }
            return;
        }
        for call in self.journal.drain(..) {
            sink.apply(call);
        }
    }

    /// Drop the journal without replaying it.
    pub fn discard_draws(&mut self) {
        self.journal.clear();
        self.resync = false;
    }

    /// Render rows top to bottom as text, `#` for occupied (for testing)
    #[cfg(test)]
    pub fn to_rows(&self) -> Vec<String> {
        (self.bottom..self.top)
            .rev()
            .map(|y| {
                (self.left..self.right)
                    .map(|x| if self.is_occupied((x, y)) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_BOARD_WIDTH, crate::types::DEFAULT_BOARD_HEIGHT)
    }
}
