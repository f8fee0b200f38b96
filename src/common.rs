//! Common types and constants for legacy Macintosh 1-bpp image decoding
//!
//! This module defines the format parameter structures, constants, and error
//! type shared by the PackBits codec, the title-page pipeline, and the
//! fixed-row variant decoders.

use thiserror::Error;

/// Framing and recovery parameters for a length-prefixed scanline stream.
///
/// The corruption-recovery knobs (`anomaly_threshold`) and the diagnostic
/// column are empirical properties of a specific asset, not of the format
/// family, so they travel with the format description rather than living as
/// inline constants in the decode logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitlePageFormat {
    /// Byte offset of the first scanline length prefix in the resource.
    pub start_offset: usize,
    /// Raster width in pixels.
    pub width: usize,
    /// Raster height in rows; also the parse target row count.
    pub height: usize,
    /// Declared-length values above this are treated as stray bytes and
    /// absorbed rather than consumed as row payloads.
    pub anomaly_threshold: u8,
    /// Pixel column known to be foreground on every correctly decoded row.
    pub diagnostic_column: usize,
}

impl TitlePageFormat {
    /// Bytes per packed scanline, `ceil(width / 8)`.
    pub fn row_stride(&self) -> usize {
        self.width.div_ceil(8)
    }
}

/// The 504x311 "Continuum Title Page" resource.
///
/// The anomaly threshold is empirical: the packed stride is 63 bytes and a
/// legal PackBits packing of 63 bytes never exceeds 64 bytes, so 71 leaves
/// slack without admitting junk. Historical decoders have used 71 and 127;
/// neither is documented anywhere authoritative.
pub const TITLE_PAGE: TitlePageFormat = TitlePageFormat {
    start_offset: 0x230,
    width: 504,
    height: 311,
    anomaly_threshold: 71,
    diagnostic_column: 500,
};

/// A decoded row longer than this multiple of the stride is treated as a
/// decode failure rather than written into the raster.
pub const OVERSIZE_ROW_FACTOR: usize = 2;

/// MacPaint fixed file header length.
pub const MACPAINT_HEADER_LEN: usize = 512;

/// MacPaint scanline stride in bytes (576 pixels).
pub const MACPAINT_ROW_BYTES: usize = 72;

/// MacPaint document height in rows.
pub const MACPAINT_ROWS: usize = 720;

/// Bytes decoded per row of the 512-wide title-screen resource variant.
pub const RESOURCE_DECODE_BYTES: usize = 72;

/// Bytes retained per row of the resource variant; the trailing 8 decoded
/// bytes are a hardware scan artifact and are discarded.
pub const RESOURCE_KEEP_BYTES: usize = 64;

/// Row count of the resource variant's full title screen.
pub const RESOURCE_SCREEN_ROWS: usize = 342;

/// Row count of the resource variant's status bar strip.
pub const RESOURCE_STATUS_BAR_ROWS: usize = 24;

/// Error type for decoding operations
///
/// Malformed *data* never produces an error anywhere in this crate; corrupt
/// input degrades to blank rows plus diagnostics. These variants cover
/// misconfiguration of the injectable format parameters.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The diagnostic column lies outside the raster
    #[error("diagnostic column {column} outside raster of width {width}")]
    ColumnOutOfRange {
        /// Requested column
        column: usize,
        /// Raster width in pixels
        width: usize,
    },
}

/// Result type alias for decoding operations
pub type Result<T> = std::result::Result<T, DecodeError>;
