use crate::expand::opts::MissPolicy;
use crate::foundation::core::{RowRange, SearchRadius};
use crate::foundation::error::{TexpandError, TexpandResult};
use crate::raster::image::ImageF32;
use crate::raster::mask::{MASK_VALID, Mask};
use crate::search::nearest::find_nearest;

/// Per-run counters for a dilation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Rows visited.
    pub rows: u64,
    /// Unused texels that received a color.
    pub pixels_filled: u64,
    /// Unused texels left at their seed value.
    pub pixels_unresolved: u64,
    /// Rows abandoned after a miss.
    pub rows_aborted: u64,
}

impl ScanStats {
    pub(crate) fn accumulate(&mut self, other: &ScanStats) {
        self.rows += other.rows;
        self.pixels_filled += other.pixels_filled;
        self.pixels_unresolved += other.pixels_unresolved;
        self.rows_aborted += other.rows_aborted;
    }
}

/// Dilate `rows` of `output` on the calling thread.
///
/// Every unused texel receives the RGB of the nearest used texel in `image`; alpha and
/// used texels are left as seeded. Inputs are validated before anything is written.
pub fn expand_scanlines(
    output: &mut ImageF32,
    image: &ImageF32,
    mask: &Mask,
    rows: RowRange,
    radius: SearchRadius,
    miss: MissPolicy,
) -> TexpandResult<ScanStats> {
    validate_inputs(output, image, mask)?;
    validate_rows(rows, image.height())?;
    let dst = output.rows_mut(rows.start, rows.end);
    Ok(fill_rows(dst, rows.start, image, mask, radius, miss))
}

pub(crate) fn validate_inputs(
    output: &ImageF32,
    image: &ImageF32,
    mask: &Mask,
) -> TexpandResult<()> {
    if output.format() != image.format() {
        return Err(TexpandError::format_mismatch(
            "output",
            image.format(),
            output.format().to_string(),
        ));
    }
    if mask.dimensions() != image.dimensions() {
        return Err(TexpandError::dimension_mismatch(
            "image vs mask",
            image.dimensions(),
            mask.dimensions(),
        ));
    }
    if output.dimensions() != image.dimensions() {
        return Err(TexpandError::dimension_mismatch(
            "image vs output",
            image.dimensions(),
            output.dimensions(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_rows(rows: RowRange, height: u32) -> TexpandResult<()> {
    if rows.start > rows.end || rows.end > height {
        return Err(TexpandError::validation(format!(
            "row range {}..{} exceeds image height {height}",
            rows.start, rows.end
        )));
    }
    Ok(())
}

/// Fill the rows held in `dst`, whose first row is image row `first_row`.
pub(crate) fn fill_rows(
    dst: &mut [f32],
    first_row: u32,
    image: &ImageF32,
    mask: &Mask,
    radius: SearchRadius,
    miss: MissPolicy,
) -> ScanStats {
    let ch = image.channels();
    let mut stats = ScanStats::default();

    for (i, row_out) in dst.chunks_exact_mut(image.row_stride()).enumerate() {
        let y = first_row + i as u32;
        let mask_row = mask.row(y);
        stats.rows += 1;

        for (x, &m) in mask_row.iter().enumerate() {
            if m == MASK_VALID {
                continue;
            }
            match find_nearest(mask, x as u32, y, radius) {
                Some((sx, sy)) => {
                    let src = image.pixel(sx, sy);
                    let off = x * ch;
                    row_out[off..off + 3].copy_from_slice(&src[..3]);
                    stats.pixels_filled += 1;
                }
                None => match miss {
                    MissPolicy::AbortRow => {
                        let left = mask_row[x..].iter().filter(|&&v| v != MASK_VALID).count();
                        stats.pixels_unresolved += left as u64;
                        stats.rows_aborted += 1;
                        break;
                    }
                    MissPolicy::SkipPixel => stats.pixels_unresolved += 1,
                },
            }
        }
    }

    stats
}

#[cfg(test)]
#[path = "../../tests/unit/expand/scanline.rs"]
mod tests;
