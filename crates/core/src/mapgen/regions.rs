//! Region bookkeeping and the pathfinder-oracle region analyzer.

use crate::grid::Grid;
use crate::pathfinding::astar_path;
use crate::types::Pos;

/// Axis-aligned bounding rectangle grown incrementally as cells are added.
/// `left`/`top` start at the `i32::MAX` unset sentinel, `right`/`bottom`
/// at 0; after the first cell, `left <= right && top <= bottom` holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn unset() -> Self {
        Self { left: i32::MAX, top: i32::MAX, right: 0, bottom: 0 }
    }

    pub fn include(&mut self, pos: Pos) {
        self.left = self.left.min(pos.x);
        self.top = self.top.min(pos.y);
        self.right = self.right.max(pos.x);
        self.bottom = self.bottom.max(pos.y);
    }

    pub fn center(&self) -> Pos {
        Pos { y: (self.top + self.bottom) / 2, x: (self.left + self.right) / 2 }
    }
}

/// A maximal set of mutually reachable walkable cells. Scratch data: rebuilt
/// by every analysis pass, never persisted across generation runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub cells: Vec<Pos>,
    pub bounds: Bounds,
}

impl Region {
    pub fn containing(pos: Pos) -> Self {
        let mut region = Self { cells: Vec::new(), bounds: Bounds::unset() };
        region.push(pos);
        region
    }

    pub fn push(&mut self, pos: Pos) {
        self.bounds.include(pos);
        self.cells.push(pos);
    }

    /// The first-added cell: a stable stand-in for the whole region, so the
    /// analyzer pathfinds against one member instead of every pair.
    pub fn representative(&self) -> Pos {
        self.cells[0]
    }
}

/// Partition all walkable cells into maximal reachable regions, in
/// discovery order. Each cell joins the first already-known region whose
/// representative it can reach; a pathfinder miss is normal signal meaning
/// "try the next region", and a cell no region accepts opens a new one.
pub fn analyze_regions(grid: &Grid) -> Vec<Region> {
    let mut regions: Vec<Region> = Vec::new();
    for pos in grid.positions() {
        if !grid.is_walkable(pos) {
            continue;
        }
        match regions
            .iter_mut()
            .find(|region| astar_path(grid, pos, region.representative()).is_some())
        {
            Some(region) => region.push(pos),
            None => regions.push(Region::containing(pos)),
        }
    }
    regions
}
