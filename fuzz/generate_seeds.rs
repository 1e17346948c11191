#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(
    bmp: &mut [u8],
    file_size: u32,
    offset: u32,
    width: i32,
    height: i32,
    bpp: u16,
    colors: u32,
) {
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&file_size.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&height.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes()); // bpp
    bmp[46..50].copy_from_slice(&colors.to_le_bytes()); // palette entries
}

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_roundtrip"] {
        fs::create_dir_all(dir).unwrap();

        // Minimal BMP 1x1 24-bit
        let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
        header(&mut bmp, 58, 54, 1, 1, 24, 0);
        bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
        fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp).unwrap();

        // Top-down 2x2 24-bit
        let mut bmp = vec![0u8; 70]; // 54 header + 2 rows of 8
        header(&mut bmp, 70, 54, 2, -2, 24, 0);
        bmp[54..60].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        fs::write(format!("{dir}/bmp24_2x2_topdown.bmp"), bmp).unwrap();

        // 3x1 8-bit with a 2-entry palette
        let mut bmp = vec![0u8; 66]; // 54 header + 8 palette + 4 pixel
        header(&mut bmp, 66, 62, 3, 1, 8, 2);
        bmp[54..62].copy_from_slice(&[0, 0, 0, 0, 255, 255, 255, 0]);
        bmp[62..65].copy_from_slice(&[0, 1, 0]);
        fs::write(format!("{dir}/bmp8_3x1.bmp"), bmp).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    }

    println!("Generated seed corpora under fuzz/corpus/");
}
