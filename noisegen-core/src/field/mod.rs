//! Sampling a fractal noise field into a grayscale pixel buffer.

use thiserror::Error;

use noisegen_utils::noise::FractalNoise;

use crate::bitmap::{PIXEL_DATA_OFFSET, Pixel, PixelBuffer};

/// Errors from rendering a noise field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Width or height was zero.
    #[error("field dimensions must be nonzero, got {width}x{height}")]
    EmptyField {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The field does not fit in a bitmap file or in memory.
    #[error("field of {width}x{height} pixels exceeds the supported size")]
    FieldTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Sample `noise` over a `width` x `height` grid into a grayscale buffer.
///
/// Pixel `(x, y)` samples the noise at the normalized coordinates
/// `(x / width, y / height, 0)`, so the image always covers one unit of
/// noise space regardless of resolution. The scalar result is mapped to an
/// 8-bit intensity with `clamp(round((v + 1) * 128), 0, 255)` and assigned
/// to all three channels.
///
/// # Errors
/// - [`RenderError::EmptyField`] if either dimension is zero.
/// - [`RenderError::FieldTooLarge`] if the pixel data would overflow the
///   bitmap format's 32-bit file size or the buffer cannot be allocated.
pub fn render_field(
    noise: &FractalNoise,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyField { width, height });
    }
    if !fits_bitmap_limits(width, height) {
        return Err(RenderError::FieldTooLarge { width, height });
    }

    tracing::debug!(
        width,
        height,
        octaves = noise.octaves(),
        "rendering noise field"
    );

    let pixel_count = u64::from(width) * u64::from(height);
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(pixel_count as usize)
        .map_err(|_| RenderError::FieldTooLarge { width, height })?;

    for y in 0..height {
        let ny = f64::from(y) / f64::from(height);
        for x in 0..width {
            let nx = f64::from(x) / f64::from(width);
            let value = noise.sample(nx, ny, 0.0);
            pixels.push(Pixel::gray(intensity(value)));
        }
    }

    Ok(PixelBuffer::from_pixels(width, height, pixels))
}

/// Whether a field's serialized form fits the bitmap format's 32-bit
/// file size.
///
/// Sized against the strict encoder's padded row stride, the larger of
/// the two layouts, so an accepted buffer encodes without overflow in
/// either mode.
fn fits_bitmap_limits(width: u32, height: u32) -> bool {
    let stride = (u64::from(width) * 3).next_multiple_of(4);
    stride
        .checked_mul(u64::from(height))
        .and_then(|data| data.checked_add(u64::from(PIXEL_DATA_OFFSET)))
        .is_some_and(|total| total <= u64::from(u32::MAX))
}

/// Map a noise value in roughly `[-1, 1]` to an 8-bit intensity.
///
/// Saturates instead of wrapping when gradient-sum overshoot pushes the
/// value outside the nominal range.
#[inline]
fn intensity(value: f64) -> u8 {
    ((value + 1.0) * 128.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use noisegen_utils::noise::{LatticeMode, PermutationTable, PerlinNoise};
    use noisegen_utils::random::Xoroshiro;

    fn fractal(seed: u64, octaves: u32) -> FractalNoise {
        let mut rng = Xoroshiro::from_seed(seed);
        let noise = PerlinNoise::new(PermutationTable::new(&mut rng), LatticeMode::Standard);
        FractalNoise::new(noise, octaves).expect("octave count is nonzero")
    }

    #[test]
    fn test_field_dimensions() {
        let buffer = render_field(&fractal(0, 12), 100, 100).expect("valid field");
        assert_eq!(buffer.width(), 100);
        assert_eq!(buffer.height(), 100);
        assert_eq!(buffer.pixels().len(), 10_000);
    }

    #[test]
    fn test_field_is_grayscale() {
        let buffer = render_field(&fractal(3, 4), 16, 8).expect("valid field");
        for pixel in buffer.pixels() {
            assert_eq!(pixel.b, pixel.g);
            assert_eq!(pixel.g, pixel.r);
        }
    }

    #[test]
    fn test_field_deterministic() {
        let first = render_field(&fractal(77, 6), 32, 32).expect("valid field");
        let second = render_field(&fractal(77, 6), 32, 32).expect("valid field");
        assert_eq!(first, second);
    }

    #[test]
    fn test_field_varies() {
        let buffer = render_field(&fractal(1, 8), 64, 64).expect("valid field");
        let first = buffer.pixels()[0];
        assert!(
            buffer.pixels().iter().any(|p| *p != first),
            "rendered field is a single flat color"
        );
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let noise = fractal(0, 1);
        assert_eq!(
            render_field(&noise, 0, 10).err(),
            Some(RenderError::EmptyField {
                width: 0,
                height: 10
            })
        );
        assert_eq!(
            render_field(&noise, 10, 0).err(),
            Some(RenderError::EmptyField {
                width: 10,
                height: 0
            })
        );
    }

    #[test]
    fn test_oversized_field_rejected() {
        // 50000 * 50000 * 3 bytes is far past the format's u32 file size
        let noise = fractal(0, 1);
        assert_eq!(
            render_field(&noise, 50_000, 50_000).err(),
            Some(RenderError::FieldTooLarge {
                width: 50_000,
                height: 50_000
            })
        );
    }

    #[test]
    fn test_size_guard_uses_padded_rows() {
        // Width 1 serializes as 4-byte rows in strict mode; the cutoff
        // must account for the padding, not the raw 3 bytes per row.
        assert!(fits_bitmap_limits(1, 1_073_741_810));
        assert!(!fits_bitmap_limits(1, 1_073_741_811));
    }

    #[test]
    fn test_padded_field_near_u32_limit_rejected() {
        // 3 * 1_431_655_747 + 54 is exactly u32::MAX, but the padded
        // payload is 4 bytes per row and overflows; the guard must reject
        // this before any allocation happens.
        let noise = fractal(0, 1);
        assert_eq!(
            render_field(&noise, 1, 1_431_655_747).err(),
            Some(RenderError::FieldTooLarge {
                width: 1,
                height: 1_431_655_747
            })
        );
    }

    #[test]
    fn test_intensity_saturates() {
        assert_eq!(intensity(-2.0), 0);
        assert_eq!(intensity(-1.0), 0);
        assert_eq!(intensity(0.0), 128);
        assert_eq!(intensity(1.0), 255);
        assert_eq!(intensity(2.0), 255);
    }
}
