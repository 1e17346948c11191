//! BMP (BITMAPINFOHEADER, 8-bit indexed and 24-bit truecolor) codec,
//! comparison and negation.

mod compare;
mod encode;
mod header;
mod image;
mod negate;
mod planes;

#[cfg(test)]
pub(crate) mod test_support;

pub use compare::{DiffReport, MAX_RECORDED_DIFFS, Verdict, compare, compare_with};
pub use encode::{encode_rgb, reencode_negative, reencode_negative_file, to_rgb};
pub use header::{
    BitDepth, BmpHeader, HEADER_SIZE, INFO_HEADER_SIZE, MAX_PALETTE_ENTRIES, PALETTE_ENTRY_SIZE,
};
pub use image::{BmpImage, write_file};
pub use negate::{negate, negate_file, negate_in_place};
pub use planes::{Palette, PixelPlanes, read_planes};
