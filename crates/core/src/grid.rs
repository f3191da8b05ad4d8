//! Cell storage and the tile-space primitives the generator composes:
//! bounds queries, radius neighborhoods, and discrete line tracing.

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell solid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::solid(); width * height] }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    /// Whether `pos` lies on the outermost ring of the grid.
    pub fn is_border(&self, pos: Pos) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x == (self.width as i32) - 1
            || pos.y == (self.height as i32) - 1
    }

    /// Out-of-bounds reads as solid.
    pub fn cell_at(&self, pos: Pos) -> Cell {
        if !self.in_bounds(pos) {
            return Cell::solid();
        }
        self.cells[self.index(pos)]
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.cell_at(pos).walkable
    }

    /// Write both cell flags together; out-of-bounds writes are ignored.
    pub fn set_open(&mut self, pos: Pos, open: bool) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = if open { Cell::open() } else { Cell::solid() };
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    pub fn walkable_positions(&self) -> Vec<Pos> {
        self.positions().filter(|&pos| self.is_walkable(pos)).collect()
    }

    /// In-bounds positions within Chebyshev distance `radius` of `center`,
    /// center included, row-major order. Out-of-bounds slots are simply
    /// absent rather than substituted.
    pub fn positions_within(&self, center: Pos, radius: i32) -> Vec<Pos> {
        let mut positions = Vec::new();
        for y in (center.y - radius)..=(center.y + radius) {
            for x in (center.x - radius)..=(center.x + radius) {
                let pos = Pos { y, x };
                if self.in_bounds(pos) {
                    positions.push(pos);
                }
            }
        }
        positions
    }

    /// Walls within Chebyshev distance `radius` of `center`, excluding
    /// `center` itself.
    pub fn walls_within(&self, center: Pos, radius: i32) -> usize {
        self.positions_within(center, radius)
            .into_iter()
            .filter(|&pos| pos != center && !self.is_walkable(pos))
            .count()
    }

    /// Discrete Bresenham line from `from` to `to`, endpoints included,
    /// ordered from `from`.
    pub fn line_between(&self, from: Pos, to: Pos) -> Vec<Pos> {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let step_x = if from.x < to.x { 1 } else { -1 };
        let step_y = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut current = from;

        let mut line = Vec::new();
        loop {
            line.push(current);
            if current == to {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                current.x += step_x;
            }
            if doubled <= dx {
                err += dx;
                current.y += step_y;
            }
        }
        line
    }

    /// Byte-stable fingerprint input for determinism comparisons.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for cell in &self.cells {
            bytes.push(u8::from(cell.walkable) | (u8::from(cell.transparent) << 1));
        }
        bytes
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
