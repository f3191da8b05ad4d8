pub mod grid;
pub mod mapgen;
pub mod pathfinding;
pub mod types;

pub use grid::Grid;
pub use mapgen::{CaveConfig, CaveGenerator, generate_cave};
pub use types::*;
