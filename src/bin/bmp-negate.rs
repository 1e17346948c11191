//! Write the colour negative of a BMP file.
//!
//! `--mine` keeps the file's structure (palette inverted for 8-bit, pixels
//! for 24-bit, header copied verbatim). `--theirs` resolves every pixel and
//! writes a fresh 24-bit file; it does not accept top-down images.
//!
//! Exit codes: 0 success, -1 bad arguments or an unreadable file (I/O,
//! truncated header, no `BM` signature), -2 a header that fails validation,
//! -3 failure in the `--theirs` path.

use std::path::{Path, PathBuf};
use std::process::exit;

use bmpkit::bmp::write_file;
use bmpkit::cli::{EXIT_FAILURE, EXIT_INVALID};
use bmpkit::{cli, negate, reencode_negative};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, value_parser};
use log::{error, info};

const EXIT_OK: i32 = 0;
const EXIT_REENCODE: i32 = -3;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Mode {
    /// Structure-preserving negation.
    Mine,
    /// Pixel-level re-encode.
    Theirs,
}

#[rustfmt::skip]
fn create_cmd_args() -> Command {
    let cmd = Command::new("bmp-negate")
        .about("Write the colour negative of an 8-bit or 24-bit BMP file")
        .arg(Arg::new("mine")
            .long("mine")
            .action(ArgAction::SetTrue)
            .help("Negate in place, keeping the original header and layout"))
        .arg(Arg::new("theirs")
            .long("theirs")
            .action(ArgAction::SetTrue)
            .help("Negate pixel by pixel and write a new 24-bit file (bottom-up images only)"))
        .group(ArgGroup::new("mode")
            .args(["mine", "theirs"])
            .required(true))
        .arg(Arg::new("input")
            .help("BMP file to read")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("output")
            .help("BMP file to write (created or truncated)")
            .value_parser(value_parser!(PathBuf))
            .required(true));
    cli::with_global_args(cmd)
}

fn run(mode: Mode, input: &Path, output: &Path, options: &ArgMatches) -> i32 {
    let limits = cli::limits_from(options);

    let Ok(reader) = cli::open_input(input) else {
        return EXIT_FAILURE;
    };
    let image = match cli::load(input, reader, &limits) {
        Ok(image) => image,
        Err(e) => return cli::exit_code(&e),
    };
    info!(
        "{}: {}x{} {}-bit",
        input.display(),
        image.header().width(),
        image.header().height(),
        image.header().bits_per_pixel()
    );

    let (encoded, failure_code) = match mode {
        Mode::Mine => (negate(image), EXIT_FAILURE),
        Mode::Theirs => {
            if image.header().is_top_down() {
                error!(
                    "{}: negative height images are not supported by --theirs, use --mine",
                    input.display()
                );
                return EXIT_INVALID;
            }
            (reencode_negative(&image), EXIT_REENCODE)
        }
    };

    let result = encoded.and_then(|bytes| write_file(output, &bytes));
    match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            error!("{} -> {}: {e}", input.display(), output.display());
            failure_code
        }
    }
}

fn main() {
    let options = match create_cmd_args().try_get_matches() {
        Ok(options) => options,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
                _ => EXIT_FAILURE,
            };
            exit(code);
        }
    };
    cli::setup_logger(&options);

    let mode = if options.get_flag("theirs") {
        Mode::Theirs
    } else {
        Mode::Mine
    };
    let (Some(input), Some(output)) = (
        options.get_one::<PathBuf>("input"),
        options.get_one::<PathBuf>("output"),
    ) else {
        exit(EXIT_FAILURE);
    };

    exit(run(mode, input, output, &options));
}
