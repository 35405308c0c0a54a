//! Grid tests - bounds, validity, row clearing and compaction

use proptest::prelude::*;

use drift_tetris::core::Grid;
use drift_tetris::types::{Coord, DrawCall, TileId};

fn fill_row(grid: &mut Grid, y: i32, tile: u16) {
    let cells: Vec<Coord> = (grid.left()..grid.right()).map(|x| (x, y)).collect();
    grid.occupy(&cells, TileId(tile));
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(10, 20);
    for y in grid.bottom()..grid.top() {
        for x in grid.left()..grid.right() {
            assert!(grid.in_bounds((x, y)), "Cell ({}, {}) should be in bounds", x, y);
            assert_eq!(grid.tile_at((x, y)), None);
        }
    }
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_odd_dimensions_truncate() {
    // -7/2 == -3 and 7/2 == 3 with integer division: six usable columns
    let grid = Grid::new(7, 5);
    assert_eq!((grid.left(), grid.right()), (-3, 3));
    assert_eq!((grid.bottom(), grid.top()), (-2, 2));
    assert_eq!(grid.width(), 6);
    assert_eq!(grid.height(), 4);
}

#[test]
fn test_rows_three_and_five_clear_with_compaction() {
    let mut grid = Grid::new(10, 20);
    fill_row(&mut grid, 3, 1);
    fill_row(&mut grid, 5, 1);
    grid.occupy(&[(0, 4)], TileId(4));
    grid.occupy(&[(2, 6), (3, 6)], TileId(6));
    grid.occupy(&[(-3, 7)], TileId(7));
    grid.occupy(&[(-5, 2)], TileId(2));

    assert_eq!(grid.clear_completed_rows(), 2);

    // Below the cleared rows: untouched
    assert_eq!(grid.tile_at((-5, 2)), Some(TileId(2)));
    // Row 4 dropped one row, rows 6 and 7 dropped two
    assert_eq!(grid.tile_at((0, 3)), Some(TileId(4)));
    assert_eq!(grid.tile_at((2, 4)), Some(TileId(6)));
    assert_eq!(grid.tile_at((3, 4)), Some(TileId(6)));
    assert_eq!(grid.tile_at((-3, 5)), Some(TileId(7)));

    assert_eq!(grid.occupied_count(), 5);
    for y in grid.bottom()..grid.top() {
        assert!(!grid.is_row_full(y));
    }
}

#[test]
fn test_clear_reports_zero_when_nothing_full() {
    let mut grid = Grid::new(10, 20);
    let cells: Vec<Coord> = (-5..4).map(|x| (x, -10)).collect();
    grid.occupy(&cells, TileId(1));
    grid.discard_draws();

    assert_eq!(grid.clear_completed_rows(), 0);
    assert_eq!(grid.occupied_count(), 9);
    assert_eq!(grid.pending_draws(), 0);
}

#[test]
fn test_clear_emits_draw_calls() {
    let mut grid = Grid::new(4, 4);
    fill_row(&mut grid, -2, 1);
    grid.occupy(&[(0, -1)], TileId(2));
    grid.discard_draws();

    grid.clear_completed_rows();
    let mut calls: Vec<DrawCall> = Vec::new();
    grid.drain_draws_into(&mut calls);

    // Replaying the calls over the pre-clear view must land on the post-clear grid.
    assert!(calls.contains(&DrawCall::Occupy((0, -2), TileId(2))));
    assert_eq!(calls.last(), Some(&DrawCall::Vacate((0, -1))));
}

proptest! {
    #[test]
    fn is_valid_position_matches_bounds_and_occupancy(
        width in 1i32..16,
        height in 1i32..24,
        occupied in proptest::collection::vec((-10i32..10, -14i32..14), 0..20),
        anchor in (-10i32..10, -14i32..14),
        offsets in proptest::collection::vec((-3i32..4, -3i32..4), 1..5),
    ) {
        let mut grid = Grid::new(width, height);
        grid.occupy(&occupied, TileId(1));

        let expected = offsets.iter().all(|&(dx, dy)| {
            let (x, y) = (anchor.0 + dx, anchor.1 + dy);
            x >= grid.left() && x < grid.right()
                && y >= grid.bottom() && y < grid.top()
                && !grid.is_occupied((x, y))
        });
        prop_assert_eq!(grid.is_valid_position(anchor, &offsets), expected);
    }

    #[test]
    fn clearing_never_leaves_full_rows(
        rows in proptest::collection::vec(proptest::collection::vec(any::<bool>(), 6), 8),
    ) {
        let mut grid = Grid::new(6, 8);
        for (i, row) in rows.iter().enumerate() {
            let y = grid.bottom() + i as i32;
            let cells: Vec<Coord> = row
                .iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(|(x, _)| (grid.left() + x as i32, y))
                .collect();
            grid.occupy(&cells, TileId(3));
        }
        let full = rows.iter().filter(|r| r.iter().all(|&c| c)).count();
        let before = grid.occupied_count();

        let cleared = grid.clear_completed_rows();
        prop_assert_eq!(cleared, full);
        prop_assert_eq!(grid.occupied_count(), before - full * 6);
        for y in grid.bottom()..grid.top() {
            prop_assert!(!grid.is_row_full(y));
        }
    }
}
