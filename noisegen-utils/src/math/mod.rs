//! Math utilities for noise generation.

/// Smoothstep - quintic Hermite interpolation.
///
/// Formula: `6x^5 - 15x^4 + 10x^3`
///
/// This is the standard fade curve used in improved Perlin noise; it has
/// zero first and second derivatives at 0 and 1, so the noise field stays
/// smooth across lattice cell boundaries.
#[inline]
#[must_use]
pub fn smoothstep(x: f64) -> f64 {
    x * x * x * (x * (x * 6.0 - 15.0) + 10.0)
}

/// Floor function returning an `i32`.
///
/// `v as i32` truncates toward zero, so negative values with a fractional
/// part need an extra step down.
#[inline]
#[must_use]
pub fn floor(v: f64) -> i32 {
    let i = v as i32;
    if v < f64::from(i) { i - 1 } else { i }
}

/// Linear interpolation.
///
/// Formula: `a + alpha * (b - a)`
#[inline]
#[must_use]
pub fn lerp(alpha: f64, a: f64, b: f64) -> f64 {
    a + alpha * (b - a)
}

/// Bilinear interpolation.
///
/// Interpolates between 4 values in a 2D grid: first along `a1`,
/// then along `a2`.
#[inline]
#[must_use]
pub fn lerp2(a1: f64, a2: f64, x00: f64, x10: f64, x01: f64, x11: f64) -> f64 {
    lerp(a2, lerp(a1, x00, x10), lerp(a1, x01, x11))
}

/// Trilinear interpolation.
///
/// Interpolates between 8 values in a 3D grid: innermost along `a1`,
/// then `a2`, then `a3`.
#[inline]
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn lerp3(
    a1: f64,
    a2: f64,
    a3: f64,
    x000: f64,
    x100: f64,
    x010: f64,
    x110: f64,
    x001: f64,
    x101: f64,
    x011: f64,
    x111: f64,
) -> f64 {
    lerp(
        a3,
        lerp2(a1, a2, x000, x100, x010, x110),
        lerp2(a1, a2, x001, x101, x011, x111),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_matches_f64_floor() {
        for v in [-2.7, -2.0, -0.3, 0.0, 0.4, 1.0, 3.9] {
            assert_eq!(i64::from(floor(v)), v.floor() as i64, "floor({v})");
        }
    }

    #[test]
    fn test_smoothstep_endpoints() {
        #[allow(clippy::float_cmp)]
        {
            assert_eq!(smoothstep(0.0), 0.0);
            assert_eq!(smoothstep(1.0), 1.0);
            assert_eq!(smoothstep(0.5), 0.5);
        }
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let mut prev = smoothstep(0.0);
        for i in 1..=100 {
            let v = smoothstep(f64::from(i) / 100.0);
            assert!(v >= prev, "smoothstep not monotonic at step {i}");
            prev = v;
        }
    }

    #[test]
    fn test_lerp3_corners() {
        let corners = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let [c000, c100, c010, c110, c001, c101, c011, c111] = corners;

        #[allow(clippy::float_cmp)]
        {
            assert_eq!(
                lerp3(0.0, 0.0, 0.0, c000, c100, c010, c110, c001, c101, c011, c111),
                c000
            );
            assert_eq!(
                lerp3(1.0, 0.0, 0.0, c000, c100, c010, c110, c001, c101, c011, c111),
                c100
            );
            assert_eq!(
                lerp3(0.0, 1.0, 0.0, c000, c100, c010, c110, c001, c101, c011, c111),
                c010
            );
            assert_eq!(
                lerp3(1.0, 1.0, 1.0, c000, c100, c010, c110, c001, c101, c011, c111),
                c111
            );
        }
    }
}
