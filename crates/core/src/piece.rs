//! Active piece - position, rotation, drift, and per-piece timers
//!
//! All movement is validated against a [`Grid`] that must not contain the
//! piece's own footprint (the session vacates it at the start of a tick).
//! A rejected move or rotation leaves the piece exactly as it was.

use crate::catalog::{rotate_offsets, ShapeDefinition};
use crate::grid::Grid;
use crate::types::{Coord, Offset, ShapeKind, TileId};

/// Direction the drift shape starts moving in after spawn (right).
pub const INITIAL_DRIFT_DIR: i32 = 1;

/// Drift state carried only by the drift shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drift {
    /// +1 = right, -1 = left
    pub dir: i32,
    /// Clock value at which the next drift step fires.
    pub next_at_ms: u64,
}

/// The currently falling piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: ShapeKind,
    tile: TileId,
    lock_rotation: bool,
    anchor: Coord,
    local: Vec<Offset>,
    cells: Vec<Coord>,
    drift: Option<Drift>,
    /// Clock value at which the next gravity step fires.
    gravity_at_ms: u64,
}

impl ActivePiece {
    /// Build a piece at `anchor` with its deadlines set relative to `now_ms`.
    pub fn spawn(
        shape: &ShapeDefinition,
        anchor: Coord,
        now_ms: u64,
        gravity_interval_ms: u32,
        drift_interval_ms: u32,
    ) -> Self {
        let drift = shape.drift.then(|| Drift {
            dir: INITIAL_DRIFT_DIR,
            next_at_ms: now_ms + drift_interval_ms as u64,
        });
        let mut piece = Self {
            kind: shape.kind,
            tile: shape.tile,
            lock_rotation: shape.lock_rotation,
            anchor,
            local: shape.cells.clone(),
            cells: Vec::with_capacity(shape.cells.len()),
            drift,
            gravity_at_ms: now_ms + gravity_interval_ms as u64,
        };
        piece.update_cells();
        piece
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn tile(&self) -> TileId {
        self.tile
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    /// Current local offsets (rotated form)
    pub fn local_cells(&self) -> &[Offset] {
        &self.local
    }

    /// Absolute cells: anchor + each local offset
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn drift(&self) -> Option<Drift> {
        self.drift
    }

    pub fn is_drift_enabled(&self) -> bool {
        self.drift.is_some()
    }

    /// Override the drift direction (+1 right, -1 left).
    pub fn set_drift_dir(&mut self, dir: i32) {
        if let Some(drift) = self.drift.as_mut() {
            drift.dir = dir.signum();
        }
    }

    fn update_cells(&mut self) {
        let (ax, ay) = self.anchor;
        self.cells.clear();
        self.cells
            .extend(self.local.iter().map(|&(dx, dy)| (ax + dx, ay + dy)));
    }

    /// Try to move the piece
    pub fn try_move(&mut self, grid: &Grid, dx: i32, dy: i32) -> bool {
        let candidate = (self.anchor.0 + dx, self.anchor.1 + dy);
        if !grid.is_valid_position(candidate, &self.local) {
            return false;
        }
        self.anchor = candidate;
        self.update_cells();
        true
    }

    /// Rotate a quarter turn with the two single-cell kicks (left, then right).
    ///
    /// Returns false when the shape is rotation-locked or every candidate is
    /// blocked; the piece is unchanged in both cases.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        if self.lock_rotation {
            return false;
        }

        let mut rotated = self.local.clone();
        rotate_offsets(&mut rotated);

        let (ax, ay) = self.anchor;
        let Some(anchor) = [(ax, ay), (ax - 1, ay), (ax + 1, ay)]
            .into_iter()
            .find(|&candidate| grid.is_valid_position(candidate, &rotated))
        else {
            return false;
        };

        self.local = rotated;
        self.anchor = anchor;
        self.update_cells();
        true
    }

    /// Move down until blocked. Returns the number of rows dropped.
    pub fn hard_drop(&mut self, grid: &Grid) -> u32 {
        let mut rows = 0;
        while self.try_move(grid, 0, -1) {
            rows += 1;
        }
        rows
    }

    /// One drift step: move in the current direction, and if blocked flip
    /// the direction and try exactly once more.
    ///
    /// No-op for pieces without drift. Returns whether the piece moved.
    pub fn drift_step(&mut self, grid: &Grid) -> bool {
        let Some(dir) = self.drift.map(|d| d.dir) else {
            return false;
        };
        if self.try_move(grid, dir, 0) {
            return true;
        }
        let flipped = -dir;
        self.set_drift_dir(flipped);
        self.try_move(grid, flipped, 0)
    }

    /// Whether the drift deadline has passed; if so, re-arm it at `now + interval`.
    pub fn take_drift_due(&mut self, now_ms: u64, interval_ms: u32) -> bool {
        match self.drift.as_mut() {
            Some(drift) if now_ms >= drift.next_at_ms => {
                drift.next_at_ms = now_ms + interval_ms as u64;
                true
            }
            _ => false,
        }
    }

    /// Whether the gravity deadline has passed; if so, re-arm it at `now + interval`.
    pub fn take_gravity_due(&mut self, now_ms: u64, interval_ms: u32) -> bool {
        if now_ms < self.gravity_at_ms {
            return false;
        }
        self.gravity_at_ms = now_ms + interval_ms as u64;
        true
    }

    pub fn gravity_at_ms(&self) -> u64 {
        self.gravity_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ShapeCatalog;

    fn shape(kind: ShapeKind) -> ShapeDefinition {
        ShapeCatalog::standard()
            .iter()
            .find(|s| s.kind == kind)
            .cloned()
            .unwrap()
    }

    fn spawn(kind: ShapeKind, anchor: Coord) -> ActivePiece {
        ActivePiece::spawn(&shape(kind), anchor, 0, 800, 350)
    }

    #[test]
    fn test_spawn_derives_cells() {
        let piece = spawn(ShapeKind::T, (0, 8));
        assert_eq!(piece.anchor(), (0, 8));
        assert_eq!(piece.cells(), &[(0, 9), (-1, 8), (0, 8), (1, 8)]);
        assert_eq!(piece.tile(), TileId(3));
        assert!(!piece.is_drift_enabled());
        assert_eq!(piece.gravity_at_ms(), 800);
    }

    #[test]
    fn test_drift_only_for_drift_shape() {
        let piece = spawn(ShapeKind::Bonus, (0, 8));
        assert_eq!(
            piece.drift(),
            Some(Drift {
                dir: 1,
                next_at_ms: 350
            })
        );
        assert!(spawn(ShapeKind::Z, (0, 8)).drift().is_none());
    }

    #[test]
    fn test_try_move() {
        let grid = Grid::new(10, 20);
        let mut piece = spawn(ShapeKind::O, (0, 0));

        assert!(piece.try_move(&grid, 1, 0));
        assert_eq!(piece.anchor(), (1, 0));
        assert!(piece.try_move(&grid, 0, -1));
        assert_eq!(piece.cells(), &[(1, -1), (2, -1), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_try_move_blocked_leaves_state() {
        let grid = Grid::new(10, 20);
        let mut piece = spawn(ShapeKind::O, (3, 0));
        let before = piece.clone();

        // O spans x and x+1, so x=4 would hit the right bound
        assert!(!piece.try_move(&grid, 1, 0));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotate_in_place() {
        let grid = Grid::new(10, 20);
        let mut piece = spawn(ShapeKind::T, (0, 0));
        assert!(piece.rotate(&grid));
        assert_eq!(piece.local_cells(), &[(1, 0), (0, 1), (0, 0), (0, -1)]);
        assert_eq!(piece.anchor(), (0, 0));
    }

    #[test]
    fn test_rotate_locked_shape_is_noop() {
        let grid = Grid::new(10, 20);
        let mut piece = spawn(ShapeKind::O, (0, 0));
        let before = piece.clone();
        for _ in 0..7 {
            assert!(!piece.rotate(&grid));
        }
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotate_kicks_left_at_right_wall() {
        let grid = Grid::new(10, 20);
        let mut piece = spawn(ShapeKind::I, (0, 0));
        assert!(piece.rotate(&grid));
        assert_eq!(piece.local_cells(), &[(0, 1), (0, 0), (0, -1), (0, -2)]);

        // Push the vertical I against the right wall (x = 4).
        while piece.try_move(&grid, 1, 0) {}
        assert_eq!(piece.anchor(), (4, 0));

        // Back to horizontal spans x-2..=x+1: in place hits x=5, one left fits.
        assert!(piece.rotate(&grid));
        assert_eq!(piece.anchor(), (3, 0));
        assert_eq!(piece.local_cells(), &[(1, 0), (0, 0), (-1, 0), (-2, 0)]);
    }

    #[test]
    fn test_rotate_fails_when_both_kicks_blocked() {
        let mut grid = Grid::new(10, 20);
        // A floor directly under the flat T blocks the in-place turn and both kicks.
        grid.occupy(&[(-1, -1), (0, -1), (1, -1)], TileId(1));
        let mut piece = spawn(ShapeKind::T, (0, 0));
        let before = piece.clone();

        assert!(!piece.rotate(&grid));
        assert_eq!(piece, before);
        assert_eq!(piece.local_cells(), shape(ShapeKind::T).cells.as_slice());
    }

    #[test]
    fn test_rotate_kicks_right_at_left_wall() {
        let grid = Grid::new(10, 20);
        // J rotated once: offsets (1,1),(0,1),(0,0),(0,-1)
        let mut piece = spawn(ShapeKind::J, (0, 0));
        assert!(piece.rotate(&grid));
        while piece.try_move(&grid, -1, 0) {}
        assert_eq!(piece.anchor(), (-5, 0));

        // Rotating again gives (1,-1),(1,0),(0,0),(-1,0): x=-6 out of bounds in
        // place and one left; one right fits.
        assert!(piece.rotate(&grid));
        assert_eq!(piece.anchor(), (-4, 0));
        assert_eq!(piece.local_cells(), &[(1, -1), (1, 0), (0, 0), (-1, 0)]);
    }

    #[test]
    fn test_hard_drop_counts_rows() {
        let grid = Grid::new(10, 20);
        let mut piece = spawn(ShapeKind::O, (0, 8));
        assert_eq!(piece.hard_drop(&grid), 18);
        assert_eq!(piece.anchor(), (0, -10));
        assert_eq!(piece.hard_drop(&grid), 0);
    }

    #[test]
    fn test_drift_step_bounces_off_wall() {
        let grid = Grid::new(10, 20);
        // Bonus spans x-1..=x+1, so anchor 3 puts its right edge at x=4.
        let mut piece = spawn(ShapeKind::Bonus, (3, 0));
        assert!(piece.drift_step(&grid));
        assert_eq!(piece.anchor(), (2, 0));
        assert_eq!(piece.drift().unwrap().dir, -1);

        // Direction persists
        assert!(piece.drift_step(&grid));
        assert_eq!(piece.anchor(), (1, 0));
        assert_eq!(piece.drift().unwrap().dir, -1);
    }

    #[test]
    fn test_drift_step_boxed_in_flips_once() {
        let mut grid = Grid::new(10, 20);
        grid.occupy(&[(-2, 1), (2, 0)], TileId(1));
        let mut piece = spawn(ShapeKind::Bonus, (0, 0));
        let anchor = piece.anchor();

        assert!(!piece.drift_step(&grid));
        assert_eq!(piece.anchor(), anchor);
        assert_eq!(piece.drift().unwrap().dir, -1);
    }

    #[test]
    fn test_drift_step_noop_for_plain_piece() {
        let grid = Grid::new(10, 20);
        let mut piece = spawn(ShapeKind::Z, (0, 0));
        assert!(!piece.drift_step(&grid));
        assert_eq!(piece.anchor(), (0, 0));
    }

    #[test]
    fn test_timers_rearm_from_now() {
        let mut piece = spawn(ShapeKind::Bonus, (0, 0));
        assert!(!piece.take_gravity_due(799, 800));
        assert!(piece.take_gravity_due(810, 800));
        assert_eq!(piece.gravity_at_ms(), 1610);

        assert!(!piece.take_drift_due(349, 350));
        assert!(piece.take_drift_due(400, 350));
        assert_eq!(piece.drift().unwrap().next_at_ms, 750);

        let mut plain = spawn(ShapeKind::T, (0, 0));
        assert!(!plain.take_drift_due(10_000, 350));
    }
}
