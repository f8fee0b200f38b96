//! PackBits run-length codec
//!
//! This module implements the byte-oriented run-length scheme shared by
//! MacPaint documents, PICT bitmap rows, and the title-page resources:
//! a control byte below 0x80 introduces `control + 1` literal bytes, a
//! control byte above 0x80 repeats the following byte `257 - control`
//! times, and 0x80 itself is a no-op.
//!
//! The decoder is deliberately tolerant: the source assets are known to be
//! corrupted in places, so truncated or dangling runs degrade to partial
//! output instead of errors.

mod decoder;
mod encoder;

pub use decoder::{unpack, unpack_row};
pub use encoder::pack;

/// Control byte that emits nothing (historically used for padding).
pub const NO_OP: u8 = 0x80;

/// Longest run either opcode can express (bytes).
pub const MAX_RUN_LENGTH: usize = 128;

/// Shortest repeated sequence worth a repeat opcode when encoding.
pub const MIN_REPEAT_LENGTH: usize = 3;

/// Convenience function to expand a PackBits-compressed buffer in memory
pub fn unpack_bytes(data: &[u8]) -> Vec<u8> {
    unpack(data)
}

/// Convenience function to PackBits-compress a buffer in memory
pub fn pack_bytes(data: &[u8]) -> Vec<u8> {
    pack(data)
}
