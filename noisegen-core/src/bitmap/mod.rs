//! Uncompressed 24-bit bitmap encoding.
//!
//! The file layout is a 14-byte file header, a 40-byte DIB info header,
//! and the pixel data at offset 54. All multi-byte fields are
//! little-endian. There is no read path; this module only produces files.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// Length of the bitmap file header in bytes.
pub const FILE_HEADER_LEN: usize = 14;
/// Length of the DIB info header in bytes.
pub const INFO_HEADER_LEN: usize = 40;
/// Offset of the pixel data from the start of the file.
pub const PIXEL_DATA_OFFSET: u32 = 54;
/// Horizontal/vertical resolution written to the info header
/// (3780 pixels per meter, roughly 96 DPI).
pub const RESOLUTION_PPM: i32 = 3780;

/// Errors from writing a bitmap artifact.
#[derive(Debug, Error)]
pub enum BitmapError {
    /// The sink could not be created or written.
    #[error("failed to write bitmap: {0}")]
    Io(#[from] io::Error),
}

/// One 24-bit pixel, stored in the file's blue-green-red channel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    /// Blue channel.
    pub b: u8,
    /// Green channel.
    pub g: u8,
    /// Red channel.
    pub r: u8,
}

impl Pixel {
    /// A grayscale pixel with all three channels set to `intensity`.
    #[inline]
    #[must_use]
    pub const fn gray(intensity: u8) -> Self {
        Self {
            b: intensity,
            g: intensity,
            r: intensity,
        }
    }
}

/// A row-major pixel grid, row 0 first.
///
/// Produced by the field sampler and consumed immutably by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Wrap an existing pixel vector.
    ///
    /// # Panics
    /// Panics if `pixels.len() != width * height`.
    #[must_use]
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel count does not match {width}x{height}"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Grid width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// All pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// One row of pixels.
    fn row(&self, y: u32) -> &[Pixel] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }
}

/// The 14-byte bitmap file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFileHeader {
    /// File type signature, always `"BM"`.
    pub signature: [u8; 2],
    /// Total file size in bytes.
    pub file_size: u32,
    /// Reserved, zero.
    pub reserved1: u16,
    /// Reserved, zero.
    pub reserved2: u16,
    /// Byte offset of the pixel data.
    pub offset: u32,
}

impl BitmapFileHeader {
    /// Header for a file whose pixel section is `data_size` bytes.
    #[must_use]
    pub const fn for_data_size(data_size: u32) -> Self {
        Self {
            signature: *b"BM",
            file_size: PIXEL_DATA_OFFSET + data_size,
            reserved1: 0,
            reserved2: 0,
            offset: PIXEL_DATA_OFFSET,
        }
    }

    /// Append the serialized header to `out`.
    fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.offset.to_le_bytes());
    }
}

/// The 40-byte DIB info header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapInfoHeader {
    /// Size of this header, always 40.
    pub header_size: u32,
    /// Image width in pixels.
    pub width: i32,
    /// Image height in pixels; positive means bottom-up row order.
    pub height: i32,
    /// Color plane count, always 1.
    pub color_planes: u16,
    /// Bits per pixel, always 24 here.
    pub bits_per_pixel: u16,
    /// Compression method, 0 for uncompressed.
    pub compression: u32,
    /// Size of the pixel data, or 0 for uncompressed images.
    pub raw_data_size: u32,
    /// Horizontal resolution in pixels per meter.
    pub horizontal_resolution: i32,
    /// Vertical resolution in pixels per meter.
    pub vertical_resolution: i32,
    /// Number of palette entries, 0 for true color.
    pub color_table_entries: u32,
    /// Number of important colors, 0 meaning all.
    pub important_colors: u32,
}

impl BitmapInfoHeader {
    /// Header for an uncompressed 24-bit image.
    #[must_use]
    pub const fn for_image(width: u32, height: u32, raw_data_size: u32) -> Self {
        Self {
            header_size: INFO_HEADER_LEN as u32,
            width: width as i32,
            height: height as i32,
            color_planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            raw_data_size,
            horizontal_resolution: RESOLUTION_PPM,
            vertical_resolution: RESOLUTION_PPM,
            color_table_entries: 0,
            important_colors: 0,
        }
    }

    /// Append the serialized header to `out`.
    fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.color_planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.raw_data_size.to_le_bytes());
        out.extend_from_slice(&self.horizontal_resolution.to_le_bytes());
        out.extend_from_slice(&self.vertical_resolution.to_le_bytes());
        out.extend_from_slice(&self.color_table_entries.to_le_bytes());
        out.extend_from_slice(&self.important_colors.to_le_bytes());
    }
}

/// Serializer for [`PixelBuffer`] into bitmap file bytes.
#[derive(Debug, Clone, Copy)]
pub struct BitmapEncoder {
    strict_format: bool,
}

impl BitmapEncoder {
    /// Create an encoder.
    ///
    /// With `strict_format` the encoder honors the format's row rules:
    /// rows are emitted bottom-up and padded with zero bytes to a multiple
    /// of 4, and `raw_data_size`/`file_size` account for the padding.
    /// Without it the encoder reproduces the original generator's byte
    /// stream: rows in buffer order, no padding, `raw_data_size` 0. The
    /// two layouts only coincide in payload size when `width * 3` is a
    /// multiple of 4.
    #[must_use]
    pub const fn new(strict_format: bool) -> Self {
        Self { strict_format }
    }

    /// Bytes per serialized row, including any padding.
    fn row_stride(&self, width: u32) -> usize {
        let row_bytes = width as usize * 3;
        if self.strict_format {
            (row_bytes + 3) & !3
        } else {
            row_bytes
        }
    }

    /// Serialize `buffer` into a complete bitmap file byte sequence.
    ///
    /// # Panics
    /// Panics if the serialized pixel data would overflow the format's
    /// 32-bit file size field. Buffers produced by
    /// [`render_field`](crate::field::render_field) are pre-checked
    /// against that limit and never trip this.
    #[must_use]
    pub fn encode(&self, buffer: &PixelBuffer) -> Vec<u8> {
        let width = buffer.width();
        let height = buffer.height();
        let row_bytes = width as usize * 3;
        let stride = self.row_stride(width);

        let data_size = stride as u64 * u64::from(height);
        assert!(
            data_size <= u64::from(u32::MAX - PIXEL_DATA_OFFSET),
            "pixel data of {data_size} bytes overflows the bitmap's 32-bit file size"
        );
        let data_size = data_size as u32;

        let raw_data_size = if self.strict_format { data_size } else { 0 };

        let mut out = Vec::with_capacity(FILE_HEADER_LEN + INFO_HEADER_LEN + data_size as usize);
        BitmapFileHeader::for_data_size(data_size).write_into(&mut out);
        BitmapInfoHeader::for_image(width, height, raw_data_size).write_into(&mut out);

        if self.strict_format {
            // Positive height declares bottom-up rows, so the last buffer
            // row is serialized first.
            let padding = stride - row_bytes;
            for y in (0..height).rev() {
                for pixel in buffer.row(y) {
                    out.extend_from_slice(&[pixel.b, pixel.g, pixel.r]);
                }
                out.extend_from_slice(&[0u8; 4][..padding]);
            }
        } else {
            for pixel in buffer.pixels() {
                out.extend_from_slice(&[pixel.b, pixel.g, pixel.r]);
            }
        }

        out
    }

    /// Serialize `buffer` and write the bytes to `sink`.
    ///
    /// # Errors
    /// Returns any error from the sink.
    pub fn write_to<W: Write>(&self, sink: &mut W, buffer: &PixelBuffer) -> io::Result<()> {
        sink.write_all(&self.encode(buffer))
    }

    /// Serialize `buffer` and write it to `path`.
    ///
    /// The bytes go to a uniquely named sibling temporary file first and
    /// are moved into place by rename, so a failed write never leaves a
    /// partial artifact at the destination and concurrent writers
    /// targeting the same path do not clobber each other's in-flight
    /// temp files.
    ///
    /// # Errors
    /// Returns [`BitmapError::Io`] if the file cannot be created, written,
    /// or renamed.
    pub fn write_file(&self, path: &Path, buffer: &PixelBuffer) -> Result<(), BitmapError> {
        let bytes = self.encode(buffer);
        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            strict = self.strict_format,
            "writing bitmap"
        );

        let tmp_path = temp_path(path);

        if let Err(err) = fs::write(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        Ok(())
    }
}

/// Per-process counter distinguishing concurrent temp files.
static TEMP_NONCE: AtomicU64 = AtomicU64::new(0);

/// A sibling path for the in-flight temp file, unique across processes
/// (pid) and across writers within one process (counter).
fn temp_path(path: &Path) -> PathBuf {
    let nonce = TEMP_NONCE.fetch_add(1, Ordering::Relaxed);
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("bitmap"), OsString::from);
    name.push(format!(".{}-{nonce}.tmp", process::id()));
    path.with_file_name(name)
}
