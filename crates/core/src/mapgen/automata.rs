//! Random seeding and the two cellular-automata smoothing rules.

use crate::grid::Grid;
use crate::mapgen::rng::RandomSource;

/// Force the border solid and roll every interior cell: floor iff a draw
/// from `[1, 100)` lands strictly below `fill_probability`.
pub(super) fn seed_grid(grid: &mut Grid, fill_probability: i32, source: &mut dyn RandomSource) {
    for pos in grid.positions() {
        if grid.is_border(pos) {
            grid.set_open(pos, false);
        } else {
            let roll = source.next_between(1, 100) as i32;
            grid.set_open(pos, roll < fill_probability);
        }
    }
}

/// One smoothing pass: read `grid`, write a clone, return it as the new
/// current grid. Border cells are skipped (already solid from seeding).
///
/// The big-area rule adds a radius-2 clause that erodes large floor blobs
/// from their interior; the nearest-neighbor rule is plain 5-of-8 smoothing.
pub(super) fn smooth_pass(grid: &Grid, big_area_rule: bool) -> Grid {
    let mut next = grid.clone();
    for pos in grid.positions() {
        if grid.is_border(pos) {
            continue;
        }
        let near_walls = grid.walls_within(pos, 1);
        let becomes_wall = if big_area_rule {
            near_walls >= 5 || grid.walls_within(pos, 2) <= 2
        } else {
            near_walls >= 5
        };
        next.set_open(pos, !becomes_wall);
    }
    next
}
