//! Improved Perlin noise evaluator.

use crate::math::{floor, lerp3, smoothstep};
use crate::noise::{GRADIENT, PermutationTable};

/// How the Z lattice coordinate is derived from the sample position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatticeMode {
    /// Z lattice coordinate comes from `floor(z)`.
    #[default]
    Standard,
    /// Z lattice coordinate comes from `floor(y)`, byte-compatible with
    /// output produced by the original generator, which carried this
    /// transcription slip in its lattice setup.
    LegacyZFromY,
}

/// Single-octave gradient noise evaluator.
///
/// Owns a [`PermutationTable`] built once per image and queried for every
/// sample. Evaluation is a pure function of the table and the coordinates:
/// repeated calls with identical inputs return bit-identical values.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    table: PermutationTable,
    mode: LatticeMode,
}

impl PerlinNoise {
    /// Create an evaluator over `table`.
    #[must_use]
    pub fn new(table: PermutationTable, mode: LatticeMode) -> Self {
        Self { table, mode }
    }

    /// Sample noise at the given position.
    ///
    /// Returns a value approximately in `[-1, 1]`.
    #[must_use]
    #[allow(clippy::many_single_char_names, clippy::similar_names)]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let xf = floor(x);
        let yf = floor(y);
        let zf = floor(z);

        // Lattice cell coordinates, wrapped to the table's period.
        let xi = (xf & 255) as usize;
        let yi = (yf & 255) as usize;
        let zi = match self.mode {
            LatticeMode::Standard => (zf & 255) as usize,
            LatticeMode::LegacyZFromY => (yf & 255) as usize,
        };

        // Offsets within the cell.
        let x = x - f64::from(xf);
        let y = y - f64::from(yf);
        let z = z - f64::from(zf);

        let u = smoothstep(x);
        let v = smoothstep(y);
        let w = smoothstep(z);

        // Hash the 8 cube corners through two chained lookups.
        let a = self.table.get(xi) + yi;
        let aa = self.table.get(a) + zi;
        let ab = self.table.get(a + 1) + zi;
        let b = self.table.get(xi + 1) + yi;
        let ba = self.table.get(b) + zi;
        let bb = self.table.get(b + 1) + zi;

        // Gradient dot products at each corner.
        let d000 = grad_dot(self.table.get(aa), x, y, z);
        let d100 = grad_dot(self.table.get(ba), x - 1.0, y, z);
        let d010 = grad_dot(self.table.get(ab), x, y - 1.0, z);
        let d110 = grad_dot(self.table.get(bb), x - 1.0, y - 1.0, z);
        let d001 = grad_dot(self.table.get(aa + 1), x, y, z - 1.0);
        let d101 = grad_dot(self.table.get(ba + 1), x - 1.0, y, z - 1.0);
        let d011 = grad_dot(self.table.get(ab + 1), x, y - 1.0, z - 1.0);
        let d111 = grad_dot(self.table.get(bb + 1), x - 1.0, y - 1.0, z - 1.0);

        lerp3(u, v, w, d000, d100, d010, d110, d001, d101, d011, d111)
    }
}

/// Dot product of the hashed gradient vector and the corner offset.
#[inline]
fn grad_dot(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let g = &GRADIENT[hash & 15];
    f64::from(g[0]) * x + f64::from(g[1]) * y + f64::from(g[2]) * z
}
