//! # bmpkit
//!
//! Strict reader, comparer and colour negator for uncompressed Windows BMP
//! files with a BITMAPINFOHEADER.
//!
//! ## Supported Formats
//!
//! - **8-bit** palette-indexed, up to 256 colour table entries
//! - **24-bit** truecolor (B, G, R byte order)
//!
//! Rows may be stored bottom-up (positive height) or top-down (negative
//! height). Every file is checked for cross-field consistency before any
//! pixel data is read: the declared file size must match the real length,
//! rows padded to a DWORD boundary must exactly fill the pixel array, and an
//! 8-bit colour table must exactly fill the space between header and pixels.
//!
//! ## Non-Goals
//!
//! - Compressed BMPs (RLE, bitfields, embedded JPEG/PNG)
//! - Other bit depths, other DIB header versions
//! - Image processing beyond equality diffs and negation
//!
//! ## Usage
//!
//! ```no_run
//! use bmpkit::{BmpImage, Verdict, compare};
//!
//! let a = BmpImage::open("a.bmp", None)?;
//! let b = BmpImage::open("b.bmp", None)?;
//! let report = compare(&a, &b)?;
//! if report.verdict() == Verdict::Unequal {
//!     for (x, y) in report.coordinates() {
//!         println!("({x} , {y})");
//!     }
//! }
//!
//! // Negate into a new file, keeping the original header.
//! bmpkit::negate_file("a.bmp", "a-negative.bmp", None)?;
//! # Ok::<(), bmpkit::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod limits;

pub mod bmp;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports
pub use bmp::{
    BitDepth, BmpHeader, BmpImage, DiffReport, Palette, Verdict, compare, compare_with, negate,
    negate_file, negate_in_place, reencode_negative, reencode_negative_file,
};
pub use error::{BmpError, ErrorCategory, Section};
pub use limits::Limits;
