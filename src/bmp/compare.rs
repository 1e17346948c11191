//! Pixel-by-pixel comparison of two decoded images of the same shape.

use log::debug;

use super::header::BitDepth;
use super::image::BmpImage;
use crate::error::BmpError;

/// Most coordinates a [`DiffReport`] records: 100 reported plus one more
/// marking the cutoff.
pub const MAX_RECORDED_DIFFS: usize = 101;

/// Outcome of a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Equal,
    Unequal,
}

/// Coordinates of differing pixels, in scan order, plus the total count.
///
/// `y` counts stored rows, so for bottom-up files row 0 is the bottom of the
/// picture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffReport {
    coordinates: Vec<(u32, u32)>,
    differing_pixels: u64,
}

impl DiffReport {
    /// Recorded `(x, y)` pairs, at most [`MAX_RECORDED_DIFFS`].
    pub fn coordinates(&self) -> &[(u32, u32)] {
        &self.coordinates
    }

    /// Total number of differing pixels, recorded or not.
    pub fn differing_pixels(&self) -> u64 {
        self.differing_pixels
    }

    /// Whether differences were found past the recording cap.
    pub fn is_truncated(&self) -> bool {
        self.differing_pixels > self.coordinates.len() as u64
    }

    pub fn verdict(&self) -> Verdict {
        if self.differing_pixels == 0 {
            Verdict::Equal
        } else {
            Verdict::Unequal
        }
    }

    fn record<F: FnMut(u32, u32)>(&mut self, x: u32, y: u32, on_diff: &mut F) {
        self.differing_pixels += 1;
        if self.coordinates.len() < MAX_RECORDED_DIFFS {
            self.coordinates.push((x, y));
            on_diff(x, y);
        }
    }
}

/// Compare two images and collect the differing coordinates.
pub fn compare(first: &BmpImage, second: &BmpImage) -> Result<DiffReport, BmpError> {
    compare_with(first, second, |_, _| {})
}

/// Like [`compare`], calling `on_diff(x, y)` for each recorded coordinate as
/// soon as it is found.
///
/// Both images must share width, `|height|` and bit depth. Rows are walked
/// in storage order and row padding is never compared. 8-bit pixels are
/// compared by the colour their index resolves to in each image's own
/// palette, so two files with permuted palettes can still be equal. An
/// index past the end of its palette reads as black.
pub fn compare_with<F: FnMut(u32, u32)>(
    first: &BmpImage,
    second: &BmpImage,
    mut on_diff: F,
) -> Result<DiffReport, BmpError> {
    check_comparable(first, second)?;

    let depth = first.bit_depth();
    let bpp = depth.bytes_per_pixel();
    let mut report = DiffReport::default();

    for (y, (row_a, row_b)) in first.rows().zip(second.rows()).enumerate() {
        for (x, (pa, pb)) in row_a.chunks_exact(bpp).zip(row_b.chunks_exact(bpp)).enumerate() {
            let differs = match depth {
                BitDepth::Indexed8 => {
                    first.palette().resolve(pa[0]) != second.palette().resolve(pb[0])
                }
                BitDepth::Truecolor24 => pa != pb,
            };
            if differs {
                report.record(x as u32, y as u32, &mut on_diff);
            }
        }
    }

    debug!(
        "compared {}x{} {}-bit images: {} differing pixels",
        first.header().width(),
        first.header().abs_height(),
        depth.bits(),
        report.differing_pixels
    );
    Ok(report)
}

fn check_comparable(first: &BmpImage, second: &BmpImage) -> Result<(), BmpError> {
    let (a, b) = (first.header(), second.header());
    if a.width() != b.width() || a.abs_height() != b.abs_height() {
        return Err(BmpError::DimensionMismatch {
            first_width: a.width(),
            first_height: a.abs_height(),
            second_width: b.width(),
            second_height: b.abs_height(),
        });
    }
    if a.bit_depth() != b.bit_depth() {
        return Err(BmpError::BitDepthMismatch {
            first: a.bits_per_pixel(),
            second: b.bits_per_pixel(),
        });
    }
    Ok(())
}
