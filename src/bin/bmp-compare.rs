//! Compare two BMP files pixel by pixel.
//!
//! Exit codes: 0 equal (or different bit depths, which is only reported),
//! 1 different, -1 unreadable file (I/O, truncated header, no `BM`
//! signature) or incomparable images, -2 bad arguments or a header that
//! fails validation.

use std::path::{Path, PathBuf};
use std::process::exit;

use bmpkit::cli::{EXIT_FAILURE, EXIT_INVALID};
use bmpkit::{Verdict, cli, compare_with};
use clap::error::ErrorKind;
use clap::{Arg, ArgMatches, Command, value_parser};
use log::{error, info, warn};

const EXIT_EQUAL: i32 = 0;
const EXIT_DIFFERENT: i32 = 1;

#[rustfmt::skip]
fn create_cmd_args() -> Command {
    let cmd = Command::new("bmp-compare")
        .about("Compare two 8-bit or 24-bit BMP files and list differing pixels")
        .arg(Arg::new("first")
            .help("First BMP file")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("second")
            .help("Second BMP file")
            .value_parser(value_parser!(PathBuf))
            .required(true));
    cli::with_global_args(cmd)
}

fn run(first: &Path, second: &Path, options: &ArgMatches) -> i32 {
    let limits = cli::limits_from(options);

    let Ok(first_file) = cli::open_input(first) else {
        return EXIT_INVALID;
    };
    let Ok(second_file) = cli::open_input(second) else {
        return EXIT_FAILURE;
    };

    let first_image = match cli::load(first, first_file, &limits) {
        Ok(image) => image,
        Err(e) => return cli::exit_code(&e),
    };
    let second_image = match cli::load(second, second_file, &limits) {
        Ok(image) => image,
        Err(e) => return cli::exit_code(&e),
    };

    let (a, b) = (first_image.header(), second_image.header());
    if a.bit_depth() != b.bit_depth() {
        warn!(
            "Files have different bit depths: {} is {}-bit, {} is {}-bit",
            first.display(),
            a.bits_per_pixel(),
            second.display(),
            b.bits_per_pixel()
        );
        return EXIT_EQUAL;
    }

    let report = compare_with(&first_image, &second_image, |x, y| {
        eprintln!("({x} , {y})");
    });
    match report {
        Ok(report) => {
            info!(
                "{} differing pixels, {} reported",
                report.differing_pixels(),
                report.coordinates().len()
            );
            match report.verdict() {
                Verdict::Equal => EXIT_EQUAL,
                Verdict::Unequal => EXIT_DIFFERENT,
            }
        }
        Err(e) => {
            error!("{} vs {}: {e}", first.display(), second.display());
            cli::exit_code(&e)
        }
    }
}

fn main() {
    let options = match create_cmd_args().try_get_matches() {
        Ok(options) => options,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_EQUAL,
                _ => EXIT_INVALID,
            };
            exit(code);
        }
    };
    cli::setup_logger(&options);

    let (Some(first), Some(second)) = (
        options.get_one::<PathBuf>("first"),
        options.get_one::<PathBuf>("second"),
    ) else {
        exit(EXIT_INVALID);
    };

    exit(run(first, second, &options));
}
