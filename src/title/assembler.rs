//! Raster assembly from parsed scanlines
//!
//! Expands each row's payload with the PackBits codec and places it at a
//! fixed stride. Short expansions zero-pad; implausibly long expansions
//! mean the length prefix pointed at garbage, so the row is discarded
//! rather than written.

use log::warn;

use super::parser::CompressedRow;
use crate::common::OVERSIZE_ROW_FACTOR;
use crate::raster::Raster;
use crate::rle;

/// Assemble parsed rows into a fresh raster of the given dimensions.
///
/// Rows the parser never produced stay all-background, as do rows whose
/// expansion exceeds [`OVERSIZE_ROW_FACTOR`] times the stride.
pub fn assemble(rows: &[CompressedRow], width: usize, height: usize) -> Raster {
    let mut raster = Raster::new(width, height);
    let stride = raster.row_stride;

    for row in rows {
        if row.row_index >= height {
            warn!("row index {} beyond raster height {}, ignored", row.row_index, height);
            continue;
        }

        let expanded = rle::unpack(&row.compressed_bytes);
        if expanded.len() > OVERSIZE_ROW_FACTOR * stride {
            warn!(
                "row {} expanded to {} bytes against a {}-byte stride, discarded",
                row.row_index,
                expanded.len(),
                stride
            );
            continue;
        }

        let take = expanded.len().min(stride);
        raster.row_mut(row.row_index)[..take].copy_from_slice(&expanded[..take]);
    }

    raster
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, compressed: &[u8]) -> CompressedRow {
        CompressedRow {
            row_index: index,
            length_offset: 0,
            prefix_bytes: vec![compressed.len() as u8],
            compressed_bytes: compressed.to_vec(),
            border_missing: false,
            patched: false,
        }
    }

    #[test]
    fn test_exact_width_row() {
        // 16 pixels wide, stride 2: one repeat run filling the row.
        let rows = vec![row(0, &[0xFF, 0xF0])];
        let raster = assemble(&rows, 16, 2);
        assert_eq!(raster.row(0), &[0xF0, 0xF0]);
        assert_eq!(raster.row(1), &[0x00, 0x00]);
    }

    #[test]
    fn test_short_expansion_zero_pads() {
        let rows = vec![row(0, &[0x00, 0xAB])];
        let raster = assemble(&rows, 32, 1);
        assert_eq!(raster.row(0), &[0xAB, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_long_expansion_truncates_to_stride() {
        // 6 decoded bytes into a 4-byte stride: within the sanity bound,
        // so the first 4 land and the rest are dropped.
        let rows = vec![row(0, &[0x05, 1, 2, 3, 4, 5, 6])];
        let raster = assemble(&rows, 32, 1);
        assert_eq!(raster.row(0), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_oversized_expansion_discards_row() {
        // 9 decoded bytes against stride 4 exceeds the 2x guard.
        let rows = vec![row(0, &[0xF8, 0xFF])];
        let raster = assemble(&rows, 32, 1);
        assert_eq!(raster.row(0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_row_index_beyond_height_ignored() {
        let rows = vec![row(5, &[0x00, 0xFF])];
        let raster = assemble(&rows, 8, 2);
        assert!(raster.bits.iter().all(|&b| b == 0));
    }
}
