//! Gradient noise generation.
//!
//! The stack is layered bottom-up:
//!
//! - [`PermutationTable`] - shuffled lattice hash table
//! - [`PerlinNoise`] - single-octave gradient noise evaluator
//! - [`FractalNoise`] - octave summation (fractal Brownian motion)

mod fractal;
mod perlin;
mod permutation;

pub use fractal::{FractalNoise, NoiseError};
pub use perlin::{LatticeMode, PerlinNoise};
pub use permutation::PermutationTable;

/// Gradient vectors for Perlin noise.
///
/// The 16 vectors used in the corner dot products. Selecting one by
/// `hash & 15` is equivalent to Ken Perlin's reference `grad()` bit
/// selector; the last four entries repeat earlier vectors to pad the
/// set of 12 distinct directions to a power of two.
pub(crate) const GRADIENT: [[i32; 3]; 16] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
    [1, 1, 0],
    [0, -1, 1],
    [-1, 1, 0],
    [0, -1, -1],
];
