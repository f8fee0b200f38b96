//! PackBits expansion
//!
//! Two entry points share the control-byte logic: [`unpack`] expands a
//! whole compressed buffer (the length-prefixed title-page rows), and
//! [`unpack_row`] expands against a running cursor until a target output
//! length is reached (the MacPaint-style fixed-row formats, where runs are
//! not aligned to row boundaries in the source stream).

use super::NO_OP;

/// Expand a complete PackBits buffer.
///
/// Malformed input never fails: a literal run claiming more bytes than
/// remain copies what is available, and a trailing repeat control with no
/// value byte is dropped silently.
pub fn unpack(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(data.len() * 2);
    let mut pos = 0;

    while pos < data.len() {
        let control = data[pos];
        pos += 1;

        if control == NO_OP {
            continue;
        }

        if control > NO_OP {
            // Repeat run: the next byte, 257 - control times.
            let count = 257 - control as usize;
            let Some(&value) = data.get(pos) else {
                // Dangling control byte at end of input.
                break;
            };
            pos += 1;
            output.extend(std::iter::repeat(value).take(count));
        } else {
            // Literal run: control + 1 verbatim bytes.
            let count = control as usize + 1;
            let end = (pos + count).min(data.len());
            output.extend_from_slice(&data[pos..end]);
            pos = end;
        }
    }

    output
}

/// Expand one fixed-target row from `data`, advancing `pos`.
///
/// Decoding stops once `target` bytes have been produced, truncating a run
/// mid-way if it would overshoot; the cursor still advances past the whole
/// run, so the next row resumes exactly where this row's run logic left
/// off. Returns fewer than `target` bytes only when the input is
/// exhausted; the caller decides how to pad.
pub fn unpack_row(data: &[u8], pos: &mut usize, target: usize) -> Vec<u8> {
    let mut row = Vec::with_capacity(target);

    while row.len() < target && *pos < data.len() {
        let control = data[*pos];
        *pos += 1;

        if control == NO_OP {
            continue;
        }

        if control > NO_OP {
            let count = 257 - control as usize;
            let Some(&value) = data.get(*pos) else {
                break;
            };
            *pos += 1;
            let take = count.min(target - row.len());
            row.extend(std::iter::repeat(value).take(take));
        } else {
            let count = control as usize + 1;
            let end = (*pos + count).min(data.len());
            let take = (end - *pos).min(target - row.len());
            row.extend_from_slice(&data[*pos..*pos + take]);
            // Consume the full declared run even when output was truncated.
            *pos = end;
        }
    }

    row
}
