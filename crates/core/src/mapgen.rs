//! Cave generation domain split into coherent submodules.

pub mod disjoint_set;
pub mod regions;
pub mod rng;

mod automata;
mod generator;

pub use disjoint_set::DisjointSet;
pub use generator::{CaveConfig, CaveGenerator};
pub use regions::{Bounds, Region, analyze_regions};
pub use rng::{ChaChaSource, RandomSource};

use crate::grid::Grid;
use crate::types::MapGenError;

pub fn generate_cave(config: CaveConfig, seed: u64) -> Result<Grid, MapGenError> {
    CaveGenerator::new(config, seed).generate()
}
