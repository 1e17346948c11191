//! Shared plumbing for the `bmp-compare` and `bmp-negate` tools.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use log::{Level, error, info};

use crate::bmp::BmpImage;
use crate::error::{BmpError, ErrorCategory, Section};
use crate::limits::Limits;

/// Exit code for a file that could not be read as far as the end of its
/// header: I/O failures, truncation, a missing `BM` signature, allocation.
pub const EXIT_FAILURE: i32 = -1;
/// Exit code for a header that was read but failed validation.
pub const EXIT_INVALID: i32 = -2;

/// Map a load or comparison failure to the tools' exit code.
pub fn exit_code(err: &BmpError) -> i32 {
    match (err, err.category()) {
        (BmpError::BadMagic, _) => EXIT_FAILURE,
        (_, ErrorCategory::Format | ErrorCategory::Consistency) => EXIT_INVALID,
        (_, ErrorCategory::Io | ErrorCategory::Allocation | ErrorCategory::Precondition) => {
            EXIT_FAILURE
        }
    }
}

/// Add the logging and resource-limit flags every tool understands.
#[rustfmt::skip]
pub fn with_global_args(cmd: Command) -> Command {
    cmd
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the files being processed"))
        .arg(Arg::new("max-memory")
            .long("max-memory")
            .value_name("BYTES")
            .value_parser(value_parser!(u64))
            .help_heading("LIMITS")
            .help("Refuse to allocate a palette or pixel buffer larger than this"))
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("could not initialise logger: {e}");
    }
    info!("Log level: {}", log_level);
}

pub fn limits_from(options: &ArgMatches) -> Limits {
    Limits {
        max_memory_bytes: options.get_one::<u64>("max-memory").copied(),
        ..Default::default()
    }
}

/// Open `path` read-only, reporting failures against the file name.
pub fn open_input(path: &Path) -> Result<BufReader<File>, BmpError> {
    File::open(path).map(BufReader::new).map_err(|e| {
        error!("{}: could not open: {e}", path.display());
        BmpError::Io {
            what: Section::Open,
            source: e,
        }
    })
}

/// Decode an already opened file; the reader is consumed and closed.
pub fn load(
    path: &Path,
    mut reader: BufReader<File>,
    limits: &Limits,
) -> Result<BmpImage, BmpError> {
    BmpImage::from_reader(&mut reader, Some(limits)).inspect_err(|e| {
        error!("{}: {e}", path.display());
    })
}
