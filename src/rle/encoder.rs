//! PackBits compression
//!
//! The encoder exists for round-trip testing and for building synthetic
//! resources; the legacy assets this crate targets were compressed forty
//! years ago. Output follows the usual convention: repeats of three or
//! more bytes become repeat runs, everything else is emitted literally.

use super::{MAX_RUN_LENGTH, MIN_REPEAT_LENGTH};

/// PackBits-compress a buffer.
pub fn pack(input: &[u8]) -> Vec<u8> {
    if input.is_empty() {
        return Vec::new();
    }

    let mut output = Vec::with_capacity(input.len() + input.len() / MAX_RUN_LENGTH + 1);
    let mut i = 0;

    while i < input.len() {
        let mut run_len = 1;
        while i + run_len < input.len()
            && input[i + run_len] == input[i]
            && run_len < MAX_RUN_LENGTH
        {
            run_len += 1;
        }

        if run_len >= MIN_REPEAT_LENGTH {
            output.push((257 - run_len) as u8);
            output.push(input[i]);
            i += run_len;
        } else {
            let start = i;
            i += run_len;
            while i < input.len() && i - start < MAX_RUN_LENGTH {
                // A repeat of 3+ ahead ends the literal sequence.
                if i + 2 < input.len() && input[i] == input[i + 1] && input[i] == input[i + 2] {
                    break;
                }
                i += 1;
            }
            output.push((i - start - 1) as u8);
            output.extend_from_slice(&input[start..i]);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rle::unpack;

    #[test]
    fn test_pack_empty() {
        assert!(pack(&[]).is_empty());
    }

    #[test]
    fn test_pack_single_byte() {
        assert_eq!(pack(&[42]), vec![0x00, 42]);
    }

    #[test]
    fn test_pack_run() {
        // 5 identical bytes: control 257 - 5 = 0xFC, then the byte.
        assert_eq!(pack(&[0xAA; 5]), vec![0xFC, 0xAA]);
    }

    #[test]
    fn test_pack_literal() {
        assert_eq!(pack(&[1, 2, 3, 4]), vec![0x03, 1, 2, 3, 4]);
    }

    #[test]
    fn test_pack_mixed() {
        let input = [1, 2, 3, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA];
        assert_eq!(pack(&input), vec![0x02, 1, 2, 3, 0xFC, 0xAA]);
    }

    #[test]
    fn test_run_split_at_max_length() {
        let input = vec![7u8; MAX_RUN_LENGTH + 3];
        let packed = pack(&input);
        assert_eq!(packed, vec![0x81, 7, 0xFE, 7]);
        assert_eq!(unpack(&packed), input);
    }

    #[test]
    fn test_round_trip_scanline() {
        // Typical 1-bpp scanline texture: long background runs broken by
        // short detail spans.
        let mut row = vec![0x00u8; 20];
        row.extend_from_slice(&[0x3C, 0x42, 0x81, 0x81, 0x42, 0x3C]);
        row.extend(std::iter::repeat(0xFF).take(30));
        row.push(0x08);
        let packed = pack(&row);
        assert_eq!(unpack(&packed), row);
        assert!(packed.len() < row.len());
    }
}
