//! Tests for the PackBits codec
//!
//! These tests pin the exact control-byte semantics the legacy assets
//! depend on, including the tolerant handling of truncated and dangling
//! runs.

use macbits::{pack_bytes, unpack_bytes};

/// Repeat-run control bytes map 129..=255 to counts 128 down to 2
#[test]
fn test_repeat_run_semantics() {
    assert_eq!(unpack_bytes(&[0xFF, 0x41]), vec![0x41, 0x41]);
    assert_eq!(unpack_bytes(&[0xFE, 0x05]), vec![0x05; 3]);
    assert_eq!(unpack_bytes(&[0x81, 0x20]), vec![0x20; 128]);
}

/// Literal-run control bytes map 0..=127 to counts 1..=128
#[test]
fn test_literal_run_semantics() {
    assert_eq!(unpack_bytes(&[0x02, 0x01, 0x02, 0x03]), vec![0x01, 0x02, 0x03]);

    let mut max_literal = vec![0x7F];
    max_literal.extend(0..128u8);
    assert_eq!(unpack_bytes(&max_literal), (0..128u8).collect::<Vec<_>>());
}

/// The 0x80 control byte emits nothing wherever it appears
#[test]
fn test_no_op_byte_is_transparent() {
    let rest = [0xFE, 0x33, 0x01, 0x0A, 0x0B];
    let mut padded = vec![0x80];
    padded.extend_from_slice(&rest);
    assert_eq!(unpack_bytes(&padded), unpack_bytes(&rest));

    // Interleaved no-ops between runs.
    let interleaved = [0xFE, 0x33, 0x80, 0x80, 0x01, 0x0A, 0x0B];
    assert_eq!(unpack_bytes(&interleaved), unpack_bytes(&rest));
}

/// A literal run claiming more bytes than remain copies what is available
#[test]
fn test_truncated_literal_is_safe() {
    assert_eq!(unpack_bytes(&[0x05, 0x01, 0x02]), vec![0x01, 0x02]);
}

/// A repeat control with no value byte emits nothing
#[test]
fn test_dangling_control_dropped() {
    assert_eq!(unpack_bytes(&[0xF0]), Vec::<u8>::new());
    assert_eq!(unpack_bytes(&[0x01, 0xAA, 0xBB, 0xF0]), vec![0xAA, 0xBB]);
}

/// Round trip through the encoder for representative scanline data
#[test]
fn test_round_trip() {
    let cases: Vec<Vec<u8>> = vec![
        vec![],
        vec![0x42],
        vec![0x00; 63],
        vec![0xFF; 200],
        (0..=255u8).collect(),
        {
            // Border, detail, border: the shape of a real title-page row.
            let mut row = vec![0xFFu8; 4];
            row.extend([0x12, 0x34, 0x56, 0x78, 0x9A]);
            row.extend(std::iter::repeat(0x00).take(50));
            row.extend([0x0F; 4]);
            row
        },
    ];

    for original in cases {
        let packed = pack_bytes(&original);
        let unpacked = unpack_bytes(&packed);
        assert_eq!(
            original,
            unpacked,
            "round trip failed for {} byte input",
            original.len()
        );
    }
}

/// Compression is effective on run-heavy 1-bpp scanline data
#[test]
fn test_compression_ratio_on_scanlines() {
    let mut row = vec![0x00u8; 40];
    row.extend(std::iter::repeat(0xFF).take(20));
    row.extend(std::iter::repeat(0x00).take(3));

    let packed = pack_bytes(&row);
    assert!(
        packed.len() < row.len() / 2,
        "expected run-heavy row to pack well: {} -> {}",
        row.len(),
        packed.len()
    );
}
