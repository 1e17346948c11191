//! Colour negation that keeps the file's structure.
//!
//! 8-bit images are negated through the colour table, 24-bit images pixel by
//! pixel. The header, pixel indices and row padding are carried over
//! untouched, so the output is the same size and layout as the input.

use std::path::Path;

use log::debug;

use super::header::BitDepth;
use super::image::{BmpImage, write_file};
use crate::error::BmpError;
use crate::limits::Limits;

/// Invert B, G and R of every colour in `image`.
///
/// Applying this twice restores the original bytes.
pub fn negate_in_place(image: &mut BmpImage) {
    match image.bit_depth() {
        BitDepth::Indexed8 => image.palette_mut().invert(),
        BitDepth::Truecolor24 => {
            let stride = image.header().row_stride();
            let row_bytes = image.header().width_px() * 3;
            for row in image.pixels_mut().chunks_exact_mut(stride) {
                for byte in &mut row[..row_bytes] {
                    *byte = !*byte;
                }
            }
        }
    }
}

/// Negate `image` and serialise it with its original header.
pub fn negate(mut image: BmpImage) -> Result<Vec<u8>, BmpError> {
    negate_in_place(&mut image);
    image.to_bytes()
}

/// Read `input`, negate it and write the result to `output`.
///
/// The input is fully buffered and closed before `output` is created, so the
/// two paths may name the same file.
pub fn negate_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    limits: Option<&Limits>,
) -> Result<(), BmpError> {
    let image = BmpImage::open(input, limits)?;
    let depth = image.bit_depth();
    let bytes = negate(image)?;
    debug!("negated {}-bit image, {} bytes", depth.bits(), bytes.len());
    write_file(output.as_ref(), &bytes)
}
