//! Pixel-level path: resolve every pixel to RGB, then write a fresh
//! uncompressed 24-bit BMP.
//!
//! Unlike [`super::negate`], this does not preserve the input's structure: an
//! 8-bit input comes out as 24-bit, and the header is rebuilt.

use std::path::Path;

use imgref::{ImgRef, ImgVec};
use log::debug;
use rgb::RGB8;

use super::header::{BitDepth, HEADER_SIZE, INFO_HEADER_SIZE};
use super::image::{BmpImage, write_file};
use super::planes::alloc_buffer;
use crate::error::BmpError;
use crate::limits::Limits;

/// 72 DPI in pixels per metre.
const DEFAULT_PIXELS_PER_METER: i32 = 2835;

/// Resolve `image` into a top-down RGB raster.
pub fn to_rgb(image: &BmpImage) -> Result<ImgVec<RGB8>, BmpError> {
    let header = image.header();
    let w = header.width_px();
    let h = header.abs_height() as usize;
    let len = w
        .checked_mul(h)
        .ok_or(BmpError::AllocationError { bytes: u64::MAX })?;
    let mut buf: Vec<RGB8> = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| BmpError::AllocationError {
            bytes: (len * 3) as u64,
        })?;

    let mut rows: Vec<&[u8]> = image.rows().collect();
    if !header.is_top_down() {
        rows.reverse();
    }

    for row in rows {
        match image.bit_depth() {
            BitDepth::Indexed8 => {
                buf.extend(row.iter().map(|&index| image.palette().resolve(index)));
            }
            BitDepth::Truecolor24 => {
                buf.extend(row.chunks_exact(3).map(|p| RGB8::new(p[2], p[1], p[0])));
            }
        }
    }

    Ok(ImgVec::new(buf, w, h))
}

/// Encode a top-down RGB raster as a bottom-up 24-bit BMP.
pub fn encode_rgb(img: ImgRef<'_, RGB8>) -> Result<Vec<u8>, BmpError> {
    let w = img.width();
    let h = img.height();
    let too_large = || {
        BmpError::UnsupportedFormat(format!("{w}x{h} image does not fit in a BMP file"))
    };

    let row_stride = BitDepth::Truecolor24.row_stride(w as u64);
    let pixel_data_size = row_stride.checked_mul(h as u64).ok_or_else(too_large)?;
    let file_size = pixel_data_size
        .checked_add(HEADER_SIZE as u64)
        .filter(|&size| size <= u64::from(u32::MAX))
        .ok_or_else(too_large)?;
    let width = i32::try_from(w).map_err(|_| too_large())?;
    let height = i32::try_from(h).map_err(|_| too_large())?;

    let mut out = alloc_buffer(file_size as usize, None)?;
    write_bmp_header(&mut out, file_size as u32, pixel_data_size as u32, width, height);

    let pad_bytes = (row_stride - w as u64 * 3) as usize;
    let buf: &[RGB8] = img.buf();
    let stride = img.stride();
    for row in (0..h).rev() {
        let start = row * stride;
        for px in &buf[start..start + w] {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}

fn write_bmp_header(
    out: &mut Vec<u8>,
    file_size: u32,
    pixel_data_size: u32,
    width: i32,
    height: i32,
) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes()); // data offset

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&DEFAULT_PIXELS_PER_METER.to_le_bytes()); // h resolution
    out.extend_from_slice(&DEFAULT_PIXELS_PER_METER.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}

/// Negate every pixel and re-encode as 24-bit.
///
/// Top-down (negative height) images are rejected.
pub fn reencode_negative(image: &BmpImage) -> Result<Vec<u8>, BmpError> {
    if image.header().is_top_down() {
        return Err(BmpError::UnsupportedFormat(
            "negative height (top-down) images cannot be re-encoded; \
             use the structure-preserving negation"
                .into(),
        ));
    }
    let mut raster = to_rgb(image)?;
    for px in raster.buf_mut().iter_mut() {
        *px = RGB8::new(!px.r, !px.g, !px.b);
    }
    encode_rgb(raster.as_ref())
}

/// File-level [`reencode_negative`].
pub fn reencode_negative_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    limits: Option<&Limits>,
) -> Result<(), BmpError> {
    let image = BmpImage::open(input, limits)?;
    let bytes = reencode_negative(&image)?;
    debug!(
        "re-encoded {}-bit image as 24-bit, {} bytes",
        image.bit_depth().bits(),
        bytes.len()
    );
    write_file(output.as_ref(), &bytes)
}
