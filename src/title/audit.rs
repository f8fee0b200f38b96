//! Border validity audit
//!
//! The correct title-page image has foreground at one fixed column of
//! every scanline (part of its frame). A background pixel there is strong
//! evidence the row mis-decoded. The audit only annotates; it never
//! touches pixel data, and the flags feed the repair passes and the CLI
//! report.

use super::parser::CompressedRow;
use crate::common::{DecodeError, Result};
use crate::raster::Raster;

/// Flag every row whose diagnostic-column pixel decoded to background.
///
/// Returns the number of flagged rows. Errors only if `column` lies
/// outside the raster, which is configuration misuse rather than data
/// corruption.
pub fn audit_border(raster: &Raster, column: usize, rows: &mut [CompressedRow]) -> Result<usize> {
    if column >= raster.width {
        return Err(DecodeError::ColumnOutOfRange {
            column,
            width: raster.width,
        });
    }

    let mut flagged = 0;
    for row in rows.iter_mut() {
        if row.row_index >= raster.height {
            continue;
        }
        row.border_missing = !raster.bit(column, row.row_index);
        if row.border_missing {
            flagged += 1;
        }
    }

    Ok(flagged)
}
