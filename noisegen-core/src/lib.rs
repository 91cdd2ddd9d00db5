//! Field sampling and bitmap encoding for the `noisegen` workspace.
//!
//! [`field`] turns a fractal noise stack into a grayscale pixel buffer;
//! [`bitmap`] serializes that buffer into an uncompressed 24-bit bitmap
//! file with an exact byte layout.

pub mod bitmap;
pub mod field;
