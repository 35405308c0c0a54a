//! Catalog module - shape definitions and the rotation transform
//!
//! Every shape is a list of local offsets around an anchor. Rotation is the
//! fixed quarter turn `(x, y) -> (y, -x)` applied to each offset; the catalog
//! does not store per-rotation tables.

use serde::{Deserialize, Serialize};

use crate::types::{Offset, ShapeKind, TileId};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDefinition {
    pub kind: ShapeKind,
    /// Local offsets relative to the anchor, unique per shape.
    pub cells: Vec<Offset>,
    pub tile: TileId,
    /// Rotation is skipped entirely for this shape (e.g. the square).
    #[serde(default)]
    pub lock_rotation: bool,
    /// Drifts sideways on its own timer and earns the lock bonus.
    /// Exactly one shape in a valid catalog carries this flag.
    #[serde(default)]
    pub drift: bool,
}

impl ShapeDefinition {
    pub fn new(kind: ShapeKind, cells: &[Offset], tile: u16) -> Self {
        Self {
            kind,
            cells: cells.to_vec(),
            tile: TileId(tile),
            lock_rotation: false,
            drift: false,
        }
    }

    pub fn rotation_locked(mut self) -> Self {
        self.lock_rotation = true;
        self
    }

    pub fn drifting(mut self) -> Self {
        self.drift = true;
        self
    }
}

/// Rotate a single offset a quarter turn.
#[inline(always)]
pub fn rotate_offset((x, y): Offset) -> Offset {
    (y, -x)
}

/// Rotate every offset in place.
pub fn rotate_offsets(cells: &mut [Offset]) {
    for cell in cells.iter_mut() {
        *cell = rotate_offset(*cell);
    }
}

/// Ordered list of shapes a session draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeCatalog {
    shapes: Vec<ShapeDefinition>,
}

impl ShapeCatalog {
    pub fn new(shapes: Vec<ShapeDefinition>) -> Self {
        Self { shapes }
    }

    /// The seven standard tetrominoes plus the drifting bonus Z.
    pub fn standard() -> Self {
        Self::new(vec![
            ShapeDefinition::new(ShapeKind::I, &[(-1, 0), (0, 0), (1, 0), (2, 0)], 1),
            ShapeDefinition::new(ShapeKind::O, &[(0, 0), (1, 0), (0, 1), (1, 1)], 2)
                .rotation_locked(),
            ShapeDefinition::new(ShapeKind::T, &[(0, 1), (-1, 0), (0, 0), (1, 0)], 3),
            ShapeDefinition::new(ShapeKind::S, &[(0, 1), (1, 1), (-1, 0), (0, 0)], 4),
            ShapeDefinition::new(ShapeKind::Z, &[(-1, 1), (0, 1), (0, 0), (1, 0)], 5),
            ShapeDefinition::new(ShapeKind::J, &[(-1, 1), (-1, 0), (0, 0), (1, 0)], 6),
            ShapeDefinition::new(ShapeKind::L, &[(1, 1), (-1, 0), (0, 0), (1, 0)], 7),
            ShapeDefinition::new(ShapeKind::Bonus, &[(-1, 1), (0, 1), (0, 0), (1, 0)], 8)
                .drifting(),
        ])
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ShapeDefinition> {
        self.shapes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeDefinition> {
        self.shapes.iter()
    }

    /// Index of the drift/bonus shape, if exactly one is flagged.
    pub fn drift_index(&self) -> Option<usize> {
        let mut flagged = self.shapes.iter().enumerate().filter(|(_, s)| s.drift);
        match (flagged.next(), flagged.next()) {
            (Some((i, _)), None) => Some(i),
            _ => None,
        }
    }

    pub fn shapes(&self) -> &[ShapeDefinition] {
        &self.shapes
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
