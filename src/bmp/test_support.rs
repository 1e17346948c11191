//! Synthetic BMP builders for unit tests.

use super::header::{BitDepth, HEADER_SIZE};

/// Filler written into row padding so tests can see it is left alone.
pub(crate) const PAD_BYTE: u8 = 0xAB;

fn header(
    width: i32,
    height: i32,
    bits: u16,
    palette_entries: u32,
    pixel_bytes: usize,
) -> Vec<u8> {
    let offset = HEADER_SIZE as u32 + palette_entries * 4;
    let file_size = offset + pixel_bytes as u32;
    let mut out = Vec::with_capacity(file_size as usize);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(pixel_bytes as u32).to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&palette_entries.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out
}

/// 24-bit file; `pixel(x, y)` gives the stored B, G, R of row `y` in storage order.
pub(crate) fn truecolor_bmp(
    width: i32,
    height: i32,
    pixel: impl Fn(usize, usize) -> [u8; 3],
) -> Vec<u8> {
    let w = width.unsigned_abs() as usize;
    let h = height.unsigned_abs() as usize;
    let pad = BitDepth::Truecolor24.row_padding(w as u64) as usize;
    let mut out = header(width, height, 24, 0, (w * 3 + pad) * h);
    for y in 0..h {
        for x in 0..w {
            out.extend_from_slice(&pixel(x, y));
        }
        out.extend(std::iter::repeat_n(PAD_BYTE, pad));
    }
    out
}

/// 8-bit file with the given colour table; `index(x, y)` gives the stored index.
pub(crate) fn indexed_bmp(
    width: i32,
    height: i32,
    palette: &[[u8; 4]],
    index: impl Fn(usize, usize) -> u8,
) -> Vec<u8> {
    let w = width.unsigned_abs() as usize;
    let h = height.unsigned_abs() as usize;
    let pad = BitDepth::Indexed8.row_padding(w as u64) as usize;
    let mut out = header(width, height, 8, palette.len() as u32, (w + pad) * h);
    for entry in palette {
        out.extend_from_slice(entry);
    }
    for y in 0..h {
        for x in 0..w {
            out.push(index(x, y));
        }
        out.extend(std::iter::repeat_n(PAD_BYTE, pad));
    }
    out
}

pub(crate) fn patch_u16(file: &mut [u8], offset: usize, value: u16) {
    file[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub(crate) fn patch_u32(file: &mut [u8], offset: usize, value: u32) {
    file[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
