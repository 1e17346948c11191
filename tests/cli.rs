//! Exit codes of the command-line tools.
#![cfg(feature = "cli")]

mod common;

use std::fs;
use std::path::Path;
use std::process::Command;

use common::{checkerboard, gray_palette, indexed_bmp, noise, scratch_dir, truecolor_bmp};

const COMPARE: &str = env!("CARGO_BIN_EXE_bmp-compare");
const NEGATE: &str = env!("CARGO_BIN_EXE_bmp-negate");

/// Exit status as the signed value passed to `exit`.
fn run(bin: &str, args: &[&Path]) -> (i32, String) {
    let out = Command::new(bin).args(args).output().unwrap();
    let code = out.status.code().unwrap();
    let code = if cfg!(unix) { code as u8 as i8 as i32 } else { code };
    (code, String::from_utf8_lossy(&out.stderr).into_owned())
}

#[test]
fn compare_exit_codes() {
    let dir = scratch_dir("cli_compare");
    let a = dir.join("a.bmp");
    let b = dir.join("b.bmp");
    let c = dir.join("c.bmp");
    let pal = dir.join("pal.bmp");
    let junk = dir.join("junk.bmp");
    fs::write(&a, truecolor_bmp(2, 2, |_, _| [1, 2, 3])).unwrap();
    let one_off = |x: usize, y: usize| if (x, y) == (1, 1) { [1, 2, 4] } else { [1, 2, 3] };
    fs::write(&b, truecolor_bmp(2, 2, one_off)).unwrap();
    fs::write(&c, truecolor_bmp(3, 2, checkerboard)).unwrap();
    fs::write(&pal, indexed_bmp(2, 2, &gray_palette(2), |_, _| 0)).unwrap();
    fs::write(&junk, b"not a bitmap").unwrap();
    let lying = dir.join("lying.bmp");
    let mut file = truecolor_bmp(2, 2, checkerboard);
    file[2] ^= 1;
    fs::write(&lying, file).unwrap();

    assert_eq!(run(COMPARE, &[&a, &a]).0, 0);
    let no_palette = dir.join("no_palette.bmp");
    fs::write(&no_palette, indexed_bmp(4, 1, &[], |x, _| x as u8)).unwrap();
    assert_eq!(run(COMPARE, &[&no_palette, &no_palette]).0, 0);

    let (code, stderr) = run(COMPARE, &[&a, &b]);
    assert_eq!(code, 1);
    assert!(stderr.contains("(1 , 1)"), "{stderr}");

    // Different bit depths are reported, not fatal.
    assert_eq!(run(COMPARE, &[&a, &pal]).0, 0);

    assert_eq!(run(COMPARE, &[&a, &c]).0, -1);
    // No signature is a read failure; a bad field after it is a validation one.
    assert_eq!(run(COMPARE, &[&a, &junk]).0, -1);
    assert_eq!(run(COMPARE, &[&junk, &a]).0, -1);
    assert_eq!(run(COMPARE, &[&a, &lying]).0, -2);
    assert_eq!(run(COMPARE, &[&dir.join("missing.bmp"), &a]).0, -2);
    assert_eq!(run(COMPARE, &[&a, &dir.join("missing.bmp")]).0, -1);
    assert_eq!(run(COMPARE, &[&a]).0, -2);
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn negate_exit_codes() {
    let dir = scratch_dir("cli_negate");
    let input = dir.join("in.bmp");
    let top_down = dir.join("top.bmp");
    let junk = dir.join("junk.bmp");
    let out = dir.join("out.bmp");
    let file = truecolor_bmp(5, 3, noise(1));
    fs::write(&input, &file).unwrap();
    fs::write(&top_down, truecolor_bmp(2, -2, checkerboard)).unwrap();
    fs::write(&junk, b"BM").unwrap();
    let no_palette = dir.join("no_palette.bmp");
    fs::write(&no_palette, indexed_bmp(3, 3, &[], |x, y| (x * y) as u8)).unwrap();
    let unsigned = dir.join("unsigned.bmp");
    fs::write(&unsigned, [b'X'; 60]).unwrap();

    let mine = Path::new("--mine");
    let theirs = Path::new("--theirs");

    assert_eq!(run(NEGATE, &[mine, &input, &out]).0, 0);
    let once = fs::read(&out).unwrap();
    assert_eq!(once.len(), file.len());

    assert_eq!(run(NEGATE, &[theirs, &input, &out]).0, 0);
    assert_eq!(run(NEGATE, &[theirs, &top_down, &out]).0, -2);
    assert_eq!(run(NEGATE, &[mine, &top_down, &out]).0, 0);
    assert_eq!(run(NEGATE, &[theirs, &no_palette, &out]).0, 0);

    assert_eq!(run(NEGATE, &[mine, &junk, &out]).0, -1);
    assert_eq!(run(NEGATE, &[mine, &unsigned, &out]).0, -1);
    assert_eq!(run(NEGATE, &[theirs, &unsigned, &out]).0, -1);
    assert_eq!(run(NEGATE, &[mine, &dir.join("missing.bmp"), &out]).0, -1);
    assert_eq!(run(NEGATE, &[&input, &out]).0, -1);
    assert_eq!(run(NEGATE, &[mine, theirs, &input, &out]).0, -1);
    fs::remove_dir_all(dir).unwrap();
}
