//! Title-page decode pipeline
//!
//! Orchestrates the full recovery path for the corrupted length-prefixed
//! title-page resource: parse the scanline stream, assemble the raster,
//! audit the border column, optionally run the repair passes, then
//! assemble and audit again so the report reflects the corrected rows.

mod assembler;
mod audit;
mod parser;
mod patch;

pub use assembler::assemble;
pub use audit::audit_border;
pub use parser::{parse_scanlines, CompressedRow};
pub use patch::{
    apply_patch_table, retry_shifted_rows, RowPatch, DEFAULT_RETRY_SHIFT, TITLE_PAGE_PATCHES,
};

use crate::common::{Result, TitlePageFormat, TITLE_PAGE};
use crate::raster::Raster;

/// Options for [`decode_title_page_with`].
#[derive(Debug, Clone)]
pub struct TitleDecodeOptions {
    /// Stream framing and recovery parameters.
    pub format: TitlePageFormat,
    /// Manual patch table to apply after parsing, if any.
    pub patches: Option<Vec<RowPatch>>,
    /// Shift for the offset-retry pass over flagged rows, if enabled.
    pub retry_shift: Option<usize>,
}

impl Default for TitleDecodeOptions {
    fn default() -> Self {
        Self {
            format: TITLE_PAGE,
            patches: Some(TITLE_PAGE_PATCHES.to_vec()),
            retry_shift: None,
        }
    }
}

/// Result of a title-page decode: the raster, the annotated row records,
/// and summary counts for the diagnostic report.
#[derive(Debug)]
pub struct TitlePageDecode {
    /// The assembled 1-bpp image.
    pub raster: Raster,
    /// Per-row parse records with audit and patch flags.
    pub rows: Vec<CompressedRow>,
    /// Rows whose diagnostic-column pixel is background after all passes.
    pub border_missing: usize,
    /// Rows replaced by a repair pass.
    pub patched: usize,
}

/// Decode the standard 504x311 title page with the built-in patch table.
pub fn decode_title_page(data: &[u8]) -> Result<TitlePageDecode> {
    decode_title_page_with(data, &TitleDecodeOptions::default())
}

/// Decode a title-page resource with explicit format and repair options.
///
/// Corrupt data never fails this call; the worst case is a raster with
/// blank rows and a nonzero `border_missing` count. Errors indicate
/// misconfigured options only.
pub fn decode_title_page_with(data: &[u8], options: &TitleDecodeOptions) -> Result<TitlePageDecode> {
    let format = &options.format;

    let mut rows = parse_scanlines(
        data,
        format.start_offset,
        format.height,
        format.anomaly_threshold,
    );
    let mut raster = assemble(&rows, format.width, format.height);
    let mut border_missing = audit_border(&raster, format.diagnostic_column, &mut rows)?;

    let mut patched = 0;
    if let Some(table) = &options.patches {
        patched += apply_patch_table(data, &mut rows, table, format);
    }
    if let Some(shift) = options.retry_shift {
        // The retry pass keys off the audit flags set above.
        patched += retry_shifted_rows(data, &mut rows, format, shift);
    }

    if patched > 0 {
        raster = assemble(&rows, format.width, format.height);
        border_missing = audit_border(&raster, format.diagnostic_column, &mut rows)?;
    }

    Ok(TitlePageDecode {
        raster,
        rows,
        border_missing,
        patched,
    })
}
