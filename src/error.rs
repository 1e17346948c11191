use std::fmt;
use std::io;

/// Which part of the file an I/O failure happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    /// Opening or creating a file.
    Open,
    /// Probing the stream length / rewinding.
    Seek,
    /// The `BM` signature.
    Magic,
    /// The 52 bytes following the signature.
    Header,
    /// Colour table (8-bit only).
    Palette,
    /// Bytes between the header and a 24-bit pixel array.
    Gap,
    /// Pixel array.
    PixelArray,
    /// Writing an encoded image.
    Output,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Seek => "seek",
            Self::Magic => "signature",
            Self::Header => "header",
            Self::Palette => "palette",
            Self::Gap => "gap before pixel array",
            Self::PixelArray => "pixel array",
            Self::Output => "output",
        })
    }
}

/// Coarse grouping of [`BmpError`] used by the command-line tools to pick
/// exit codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Open/seek/read/write failures, including truncation.
    Io,
    /// Not a BMP, or a BMP variant this crate does not handle.
    Format,
    /// Parseable but self-contradictory metadata.
    Consistency,
    /// The two images cannot be compared.
    Precondition,
    /// A buffer could not be reserved, or a configured limit was hit.
    Allocation,
}

/// Errors from BMP decoding, comparison and negation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("{what} I/O error: {source}")]
    Io {
        what: Section,
        #[source]
        source: io::Error,
    },

    #[error("unexpected end of file while reading {what}")]
    UnexpectedEof { what: Section },

    #[error("not a BMP file (missing 'BM' signature)")]
    BadMagic,

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("inconsistent metadata: {0}")]
    InconsistentMetadata(String),

    #[error("dimensions differ: {first_width}x{first_height} vs {second_width}x{second_height}")]
    DimensionMismatch {
        first_width: i32,
        first_height: u32,
        second_width: i32,
        second_height: u32,
    },

    #[error("bit depths differ: {first}-bit vs {second}-bit")]
    BitDepthMismatch { first: u16, second: u16 },

    #[error("could not allocate {bytes} bytes")]
    AllocationError { bytes: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl BmpError {
    /// Maps an I/O error, turning `UnexpectedEof` into the dedicated variant.
    pub(crate) fn io(what: Section, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            BmpError::UnexpectedEof { what }
        } else {
            BmpError::Io { what, source }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io { .. } | Self::UnexpectedEof { .. } => ErrorCategory::Io,
            Self::BadMagic | Self::UnsupportedFormat(_) => ErrorCategory::Format,
            Self::InconsistentMetadata(_) => ErrorCategory::Consistency,
            Self::DimensionMismatch { .. } | Self::BitDepthMismatch { .. } => {
                ErrorCategory::Precondition
            }
            Self::AllocationError { .. } | Self::LimitExceeded(_) => ErrorCategory::Allocation,
        }
    }
}
