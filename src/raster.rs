//! Packed 1-bpp raster buffer
//!
//! A [`Raster`] stores one bit per pixel, eight pixels per byte, with the
//! most significant bit of each byte representing the leftmost pixel of
//! that byte's span. Bit value 1 is foreground (black), 0 is background
//! (white). Rows never decoded stay all-background.

/// A packed monochrome bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: usize,
    /// Height in rows.
    pub height: usize,
    /// Bytes per row, `ceil(width / 8)`.
    pub row_stride: usize,
    /// Packed pixel data, `row_stride * height` bytes.
    pub bits: Vec<u8>,
}

impl Raster {
    /// Create an all-background raster of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        let row_stride = width.div_ceil(8);
        Self {
            width,
            height,
            row_stride,
            bits: vec![0u8; row_stride * height],
        }
    }

    /// Read the pixel at (`x`, `y`); true is foreground.
    ///
    /// # Panics
    /// Panics if the coordinates lie outside the raster.
    pub fn bit(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width && y < self.height, "pixel out of range");
        let byte = self.bits[y * self.row_stride + x / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// The packed bytes of row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.bits[y * self.row_stride..(y + 1) * self.row_stride]
    }

    /// Mutable packed bytes of row `y`.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        &mut self.bits[y * self.row_stride..(y + 1) * self.row_stride]
    }
}
