//! Synthetic BMP files for the integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

pub fn checkerboard(x: usize, y: usize) -> [u8; 3] {
    if (x + y) % 2 == 0 {
        [200, 220, 240]
    } else {
        [10, 40, 70]
    }
}

pub fn noise(seed: u32) -> impl Fn(usize, usize) -> [u8; 3] {
    move |x, y| {
        let mut state = seed ^ ((x as u32) << 16) ^ (y as u32) ^ 0xDEAD_BEEF;
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let b = state.to_le_bytes();
        [b[0], b[1], b[2]]
    }
}

/// Filler written into row padding, matching the crate's unit-test builders.
pub const PAD_BYTE: u8 = 0xAB;

fn header(
    width: i32,
    height: i32,
    bits: u16,
    palette_entries: u32,
    pixel_bytes: usize,
) -> Vec<u8> {
    let offset = 54 + palette_entries * 4;
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
pub fn truecolor_bmp(
    width: i32,
    height: i32,
    pixel: impl Fn(usize, usize) -> [u8; 3],
) -> Vec<u8> {
    let w = width.unsigned_abs() as usize;
    let h = height.unsigned_abs() as usize;
    let pad = w % 4;
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
pub fn indexed_bmp(
    width: i32,
    height: i32,
    palette: &[[u8; 4]],
    index: impl Fn(usize, usize) -> u8,
) -> Vec<u8> {
    let w = width.unsigned_abs() as usize;
    let h = height.unsigned_abs() as usize;
    let pad = (4 - w % 4) % 4;
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

pub fn gray_palette(entries: usize) -> Vec<[u8; 4]> {
    (0..entries)
        .map(|i| {
            let v = (i * 255 / entries.max(2).saturating_sub(1)).min(255) as u8;
            [v, v, v, 0]
        })
        .collect()
}

/// A per-test scratch directory under the system temp dir.
pub fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bmpkit-{}-{test}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
