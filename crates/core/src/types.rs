use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid coordinate. Ordered row-major (`y` before `x`) so scans and
/// tie-breaks stay deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

/// One grid cell. The generator always writes `walkable` and `transparent`
/// together: a cell is either fully open or fully solid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub walkable: bool,
    pub transparent: bool,
}

impl Cell {
    pub fn open() -> Self {
        Self { walkable: true, transparent: true }
    }

    pub fn solid() -> Self {
        Self { walkable: false, transparent: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapGenError {
    /// Width or height leaves no non-border interior cell.
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for MapGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "grid dimensions {width}x{height} are too small: \
                     both sides must be at least 3 so a non-border interior exists"
                )
            }
        }
    }
}

impl Error for MapGenError {}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_solid() {
        assert_eq!(Cell::default(), Cell::solid());
    }

    #[test]
    fn invalid_dimensions_error_names_both_sides() {
        let message = MapGenError::InvalidDimensions { width: 2, height: 9 }.to_string();
        assert!(message.contains("2x9"), "unexpected message: {message}");
    }
}
