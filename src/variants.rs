//! Fixed-row format variant decoders
//!
//! MacPaint documents and the 512-wide title-screen resource carry no
//! per-row length prefixes: compressed runs simply follow one another, and
//! a row ends when its target byte count has been produced. Runs are not
//! aligned to row boundaries, so both decoders share the cursor-based
//! codec path and hand the cursor straight into the next row.

use log::warn;

use crate::common::{
    MACPAINT_HEADER_LEN, MACPAINT_ROWS, MACPAINT_ROW_BYTES, RESOURCE_DECODE_BYTES,
    RESOURCE_KEEP_BYTES,
};
use crate::raster::Raster;
use crate::rle;

/// Result of a fixed-row variant decode.
#[derive(Debug)]
pub struct VariantDecode {
    /// The assembled 1-bpp image; rows past `rows_decoded` are background.
    pub raster: Raster,
    /// Rows for which any payload was decoded before input ran out.
    pub rows_decoded: usize,
}

/// Decode a MacPaint document: a 512-byte header, then 720 rows of 72
/// packed bytes each. Truncated input zero-fills the remaining rows.
pub fn decode_macpaint(data: &[u8]) -> VariantDecode {
    decode_fixed_rows(
        data,
        MACPAINT_HEADER_LEN,
        MACPAINT_ROWS,
        MACPAINT_ROW_BYTES,
        MACPAINT_ROW_BYTES,
    )
}

/// Decode the 512-wide title-screen resource variant for `row_count`
/// rows: 72 bytes are decoded per row but only the first 64 are kept, the
/// remainder being a hardware scan artifact in the original data.
pub fn decode_title_resource(data: &[u8], row_count: usize) -> VariantDecode {
    decode_fixed_rows(data, 0, row_count, RESOURCE_DECODE_BYTES, RESOURCE_KEEP_BYTES)
}

fn decode_fixed_rows(
    data: &[u8],
    header_len: usize,
    row_count: usize,
    decode_bytes: usize,
    keep_bytes: usize,
) -> VariantDecode {
    let mut raster = Raster::new(keep_bytes * 8, row_count);
    let mut pos = header_len;
    let mut rows_decoded = 0;

    if pos > data.len() {
        warn!("input shorter than the {header_len}-byte header, nothing decoded");
        pos = data.len();
    }

    for y in 0..row_count {
        if pos >= data.len() {
            break;
        }
        let row = rle::unpack_row(data, &mut pos, decode_bytes);
        if row.is_empty() {
            break;
        }
        let keep = row.len().min(keep_bytes);
        raster.row_mut(y)[..keep].copy_from_slice(&row[..keep]);
        rows_decoded += 1;
    }

    if rows_decoded < row_count {
        warn!("input exhausted after {rows_decoded} of {row_count} rows");
    }

    VariantDecode {
        raster,
        rows_decoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rle::pack;

    fn packed_rows(row_count: usize, row_bytes: usize) -> (Vec<u8>, Vec<Vec<u8>>) {
        let mut stream = Vec::new();
        let mut rows = Vec::new();
        for y in 0..row_count {
            let row: Vec<u8> = (0..row_bytes).map(|x| ((x + y * 7) % 251) as u8).collect();
            stream.extend(pack(&row));
            rows.push(row);
        }
        (stream, rows)
    }

    #[test]
    fn test_macpaint_full_decode() {
        let (stream, rows) = packed_rows(MACPAINT_ROWS, MACPAINT_ROW_BYTES);
        let mut data = vec![0u8; MACPAINT_HEADER_LEN];
        data.extend(stream);

        let decoded = decode_macpaint(&data);
        assert_eq!(decoded.rows_decoded, MACPAINT_ROWS);
        assert_eq!(decoded.raster.bits.len(), MACPAINT_ROWS * MACPAINT_ROW_BYTES);
        assert_eq!(decoded.raster.row(0), rows[0].as_slice());
        assert_eq!(decoded.raster.row(719), rows[719].as_slice());
    }

    #[test]
    fn test_macpaint_truncated_input() {
        let (stream, _) = packed_rows(MACPAINT_ROWS, MACPAINT_ROW_BYTES);
        let mut data = vec![0u8; MACPAINT_HEADER_LEN];
        data.extend(stream);
        data.truncate(MACPAINT_HEADER_LEN + 100);

        let decoded = decode_macpaint(&data);
        assert_eq!(decoded.raster.bits.len(), MACPAINT_ROWS * MACPAINT_ROW_BYTES);
        assert!(decoded.rows_decoded < MACPAINT_ROWS);
        // Undecoded rows stay background.
        assert!(decoded.raster.row(719).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_header_only_input() {
        let data = vec![0u8; MACPAINT_HEADER_LEN];
        let decoded = decode_macpaint(&data);
        assert_eq!(decoded.rows_decoded, 0);
        assert!(decoded.raster.bits.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_resource_discards_artifact_bytes() {
        // One row whose final 8 decoded bytes are artifact: marker byte
        // 0xEE must not appear in the kept 64.
        let mut row = vec![0x55u8; RESOURCE_KEEP_BYTES];
        row.extend(std::iter::repeat(0xEE).take(RESOURCE_DECODE_BYTES - RESOURCE_KEEP_BYTES));
        let stream = pack(&row);

        let decoded = decode_title_resource(&stream, 1);
        assert_eq!(decoded.rows_decoded, 1);
        assert_eq!(decoded.raster.width, 512);
        assert_eq!(decoded.raster.row(0), vec![0x55u8; RESOURCE_KEEP_BYTES].as_slice());
    }

    #[test]
    fn test_resource_overshooting_run_truncates_and_resumes() {
        // A 128-byte repeat run against a 72-byte row target: the row
        // truncates, the run is consumed whole, and the next row resumes
        // at the following run.
        let stream = vec![0x81, 0xFF, 0xF1, 0xAA];
        let decoded = decode_title_resource(&stream, 2);
        assert_eq!(decoded.rows_decoded, 2);
        assert_eq!(decoded.raster.row(0), vec![0xFFu8; 64].as_slice());
        let mut second = vec![0xAAu8; 16];
        second.resize(64, 0x00);
        assert_eq!(decoded.raster.row(1), second.as_slice());
    }
}
