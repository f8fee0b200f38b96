//! Scanline stream parsing
//!
//! The title-page resource frames each compressed scanline with a one-byte
//! length prefix, but the surviving asset interleaves stray zero bytes and
//! the occasional garbage byte between rows. The parser absorbs those into
//! the next row's prefix instead of consuming payload at the wrong offset,
//! which is the difference between losing one row and desynchronizing the
//! rest of the image.

use log::{debug, warn};

/// One parsed scanline record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedRow {
    /// 0-based position in the output raster.
    pub row_index: usize,
    /// Offset of this row's declared-length byte in the source buffer.
    pub length_offset: usize,
    /// Bytes consumed to locate this row: any absorbed stray bytes in
    /// order, then the declared-length byte itself.
    pub prefix_bytes: Vec<u8>,
    /// Raw compressed payload, exactly as long as the prefix declared.
    pub compressed_bytes: Vec<u8>,
    /// Set by the border audit: the diagnostic column decoded to
    /// background where a correct row always has foreground.
    pub border_missing: bool,
    /// Set when a repair pass replaced this row's payload.
    pub patched: bool,
}

/// Walk a length-prefixed scanline stream, returning up to `target_rows`
/// rows with dense, strictly increasing indices.
///
/// Length bytes of zero are skip markers; length bytes above
/// `anomaly_threshold` are assumed to be stray non-row bytes and absorbed
/// without consuming a payload. Running out of input mid-row simply stops
/// the parse. Never fails.
pub fn parse_scanlines(
    data: &[u8],
    start: usize,
    target_rows: usize,
    anomaly_threshold: u8,
) -> Vec<CompressedRow> {
    let mut rows = Vec::with_capacity(target_rows);
    // Stray bytes absorbed since the previous row; folded into the next
    // row's prefix so the original byte stream remains reconstructible.
    let mut skipped: Vec<u8> = Vec::new();
    let mut pos = start;

    while rows.len() < target_rows && pos < data.len() {
        let length_offset = pos;
        let declared = data[pos];
        pos += 1;

        if declared == 0 {
            skipped.push(declared);
            continue;
        }

        if declared > anomaly_threshold {
            debug!(
                "absorbed anomalous length byte {declared:#04x} at offset {length_offset:#06x}"
            );
            skipped.push(declared);
            continue;
        }

        let length = declared as usize;
        if pos + length > data.len() {
            // Not enough payload left for the declared length; the row is
            // simply not produced.
            break;
        }

        let mut prefix = std::mem::take(&mut skipped);
        prefix.push(declared);
        rows.push(CompressedRow {
            row_index: rows.len(),
            length_offset,
            prefix_bytes: prefix,
            compressed_bytes: data[pos..pos + length].to_vec(),
            border_missing: false,
            patched: false,
        });
        pos += length;
    }

    if rows.len() < target_rows {
        warn!(
            "scanline stream exhausted after {} of {} rows",
            rows.len(),
            target_rows
        );
    }

    rows
}
