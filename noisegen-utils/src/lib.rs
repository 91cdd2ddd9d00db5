//! Noise generation primitives for the `noisegen` workspace.
//!
//! This crate holds everything below the field sampler: math helpers,
//! the seeded pseudo-random source, and the gradient noise stack
//! (permutation table, Perlin evaluator, fractal octave summation).
//! It performs no I/O.

pub mod math;
pub mod noise;
pub mod random;
