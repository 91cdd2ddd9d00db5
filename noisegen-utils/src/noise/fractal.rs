//! Octave summation (fractal Brownian motion) over a Perlin evaluator.

use thiserror::Error;

use crate::noise::PerlinNoise;

/// Errors from constructing the noise stack.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoiseError {
    /// Zero octaves would divide by a zero amplitude accumulator.
    #[error("octave count must be at least 1")]
    ZeroOctaves,
}

/// Multi-octave gradient noise.
///
/// Sums the base evaluator at geometrically increasing frequencies and
/// halving amplitudes, then normalizes by the accumulated amplitude so the
/// result stays in approximately `[-1, 1]` for any octave count. With a
/// single octave the result equals the base evaluator exactly.
#[derive(Debug, Clone)]
pub struct FractalNoise {
    noise: PerlinNoise,
    octaves: u32,
}

impl FractalNoise {
    /// Create a fractal stack over `noise` with the given octave count.
    ///
    /// # Errors
    /// Returns [`NoiseError::ZeroOctaves`] if `octaves` is zero.
    pub fn new(noise: PerlinNoise, octaves: u32) -> Result<Self, NoiseError> {
        if octaves == 0 {
            return Err(NoiseError::ZeroOctaves);
        }
        Ok(Self { noise, octaves })
    }

    /// Sample combined noise at the given position.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut sum = 0.0;
        let mut max_amplitude = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for _ in 0..self.octaves {
            sum += amplitude * self.noise.sample(x * frequency, y * frequency, z * frequency);
            max_amplitude += amplitude;

            frequency *= 2.0;
            amplitude *= 0.5;
        }

        sum / max_amplitude
    }

    /// Number of octaves in the stack.
    #[inline]
    #[must_use]
    pub const fn octaves(&self) -> u32 {
        self.octaves
    }

    /// The single-octave evaluator underneath the stack.
    #[must_use]
    pub const fn base(&self) -> &PerlinNoise {
        &self.noise
    }
}
