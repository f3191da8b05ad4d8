//! Deterministic shortest-path search over walkable cells.
//!
//! The region analyzer only needs a reachability oracle: `Some(path)` means
//! two cells share a region, `None` is the normal "no path" signal and never
//! an error. Movement is 8-directional, so carved Bresenham tunnels (which
//! step diagonally) are traversable.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::Grid;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// A* over 8-way walkable adjacency, unit step cost. Returns the steps from
/// `start` to `goal` excluding `start` itself, or `None` when the cells are
/// not mutually reachable.
pub fn astar_path(grid: &Grid, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![]);
    }

    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = chebyshev(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0_u32);

    while let Some(current) = open_set.pop_first() {
        let pos = Pos { y: current.y, x: current.x };
        if pos == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        let current_g = *g_score.get(&pos).expect("open node must have a g-score");
        for next in neighbors(pos) {
            if !grid.is_walkable(next) {
                continue;
            }
            let tentative_g = current_g + 1;
            if tentative_g < *g_score.get(&next).unwrap_or(&u32::MAX) {
                came_from.insert(next, pos);
                g_score.insert(next, tentative_g);
                let h = chebyshev(next, goal);
                open_set.insert(OpenNode { f: tentative_g + h, h, y: next.y, x: next.x });
            }
        }
    }
    None
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut pos = goal;
    let mut path = vec![pos];
    while pos != start {
        pos = came_from[&pos];
        path.push(pos);
    }
    path.reverse();
    path.remove(0);
    path
}

fn neighbors(pos: Pos) -> [Pos; 8] {
    [
        Pos { y: pos.y - 1, x: pos.x - 1 },
        Pos { y: pos.y - 1, x: pos.x },
        Pos { y: pos.y - 1, x: pos.x + 1 },
        Pos { y: pos.y, x: pos.x - 1 },
        Pos { y: pos.y, x: pos.x + 1 },
        Pos { y: pos.y + 1, x: pos.x - 1 },
        Pos { y: pos.y + 1, x: pos.x },
        Pos { y: pos.y + 1, x: pos.x + 1 },
    ]
}

/// Admissible heuristic for unit-cost 8-way movement.
fn chebyshev(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}
