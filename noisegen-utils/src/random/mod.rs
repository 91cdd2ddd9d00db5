//! Seeded pseudo-random sources for noise generation.
//!
//! The table shuffle is the only consumer of randomness in this crate, and
//! it must be reproducible from an explicit seed so that identical inputs
//! produce identical images. Not suitable for cryptographic use.

pub mod xoroshiro;

pub use xoroshiro::Xoroshiro;

/// A seeded, deterministic pseudo-random source.
pub trait Random {
    /// Generate the next 64 random bits.
    fn next_u64(&mut self) -> u64;

    /// Generate a uniformly distributed integer in `[0, bound)`.
    ///
    /// Uses a widening multiply on the high 32 bits rather than a modulo
    /// reduction.
    ///
    /// # Panics
    /// Panics if `bound` is not positive.
    fn next_i32_bounded(&mut self, bound: i32) -> i32 {
        assert!(bound > 0, "bound must be positive, got {bound}");
        let bits = self.next_u64() >> 32;
        ((bits * bound as u64) >> 32) as i32
    }

    /// Generate a `f64` uniformly distributed in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        // 53 significand bits, scaled by 2^-53
        (self.next_u64() >> 11) as f64 * 1.110_223_024_625_156_5e-16
    }
}
