//! BMP file header + BITMAPINFOHEADER codec.
//!
//! The 54-byte header is the `BM` signature followed by 13 little-endian
//! 32-bit words (planes and bit count share one word). Decoding validates
//! every cross-field invariant before any pixel data is touched.

use std::io::{Cursor, Read, Seek, SeekFrom};

use log::{debug, trace};

use crate::error::{BmpError, Section};

/// Size of the file header plus BITMAPINFOHEADER.
pub const HEADER_SIZE: usize = 54;

/// The only DIB header variant accepted.
pub const INFO_HEADER_SIZE: u32 = 40;

/// Largest colour table an 8-bit image may carry.
pub const MAX_PALETTE_ENTRIES: u32 = 256;

/// Bytes per colour table entry (B, G, R, reserved).
pub const PALETTE_ENTRY_SIZE: usize = 4;

pub(crate) const MAGIC: [u8; 2] = *b"BM";

/// The two supported pixel layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// One byte per pixel, an index into the colour table.
    Indexed8,
    /// Three bytes per pixel, stored B, G, R.
    Truecolor24,
}

impl BitDepth {
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(Self::Indexed8),
            24 => Some(Self::Truecolor24),
            _ => None,
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            Self::Indexed8 => 8,
            Self::Truecolor24 => 24,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Indexed8 => 1,
            Self::Truecolor24 => 3,
        }
    }

    /// Padding bytes appended to each row of `width` pixels.
    ///
    /// 24-bit rows use `width % 4`, 8-bit rows `(4 - width % 4) % 4`. Both
    /// agree with the usual round-up-to-DWORD rule for every width, since
    /// `3 * width ≡ -width (mod 4)`.
    pub fn row_padding(self, width: u64) -> u64 {
        match self {
            Self::Indexed8 => (4 - width % 4) % 4,
            Self::Truecolor24 => width % 4,
        }
    }

    /// Padded row length in bytes.
    pub fn row_stride(self, width: u64) -> u64 {
        width * self.bytes_per_pixel() as u64 + self.row_padding(width)
    }
}

/// A parsed, validated BMP header.
///
/// Only obtainable through [`BmpHeader::decode`] / [`BmpHeader::from_bytes`],
/// so every accessor can rely on the invariants having been checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    file_size: u32,
    reserved: u32,
    pixel_array_offset: u32,
    dib_header_size: u32,
    width: i32,
    height: i32,
    planes: u16,
    bits_per_pixel: u16,
    compression: u32,
    image_size: u32,
    x_pixels_per_meter: i32,
    y_pixels_per_meter: i32,
    colors_in_palette: u32,
    important_colors: u32,
}

fn u16_at(raw: &[u8; HEADER_SIZE], off: usize) -> u16 {
    u16::from_le_bytes([raw[off], raw[off + 1]])
}

fn u32_at(raw: &[u8; HEADER_SIZE], off: usize) -> u32 {
    u32::from_le_bytes([raw[off], raw[off + 1], raw[off + 2], raw[off + 3]])
}

fn i32_at(raw: &[u8; HEADER_SIZE], off: usize) -> i32 {
    i32::from_le_bytes([raw[off], raw[off + 1], raw[off + 2], raw[off + 3]])
}

impl BmpHeader {
    /// Read and validate the header from the start of `reader`.
    ///
    /// The stream length is probed by seeking to the end; on success the
    /// reader is left positioned right after the 54-byte header.
    pub fn decode<R: Read + Seek>(reader: &mut R) -> Result<Self, BmpError> {
        let stream_len = reader
            .seek(SeekFrom::End(0))
            .map_err(|e| BmpError::io(Section::Seek, e))?;
        reader
            .seek(SeekFrom::Start(0))
            .map_err(|e| BmpError::io(Section::Seek, e))?;

        let mut raw = [0u8; HEADER_SIZE];
        reader
            .read_exact(&mut raw[..2])
            .map_err(|e| BmpError::io(Section::Magic, e))?;
        if raw[..2] != MAGIC {
            return Err(BmpError::BadMagic);
        }
        reader
            .read_exact(&mut raw[2..])
            .map_err(|e| BmpError::io(Section::Header, e))?;

        let header = Self::parse(&raw);
        header.validate(stream_len)?;

        debug!(
            "BMP header: {}x{} {}-bit, {} palette entries, pixel array at {}",
            header.width,
            header.height,
            header.bits_per_pixel,
            header.colors_in_palette,
            header.pixel_array_offset
        );
        Ok(header)
    }

    /// Decode the header of an in-memory file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        Self::decode(&mut Cursor::new(data))
    }

    /// Split the raw block into fields. No validation; the signature is
    /// assumed to have been checked.
    fn parse(raw: &[u8; HEADER_SIZE]) -> Self {
        let header = Self {
            file_size: u32_at(raw, 2),
            reserved: u32_at(raw, 6),
            pixel_array_offset: u32_at(raw, 10),
            dib_header_size: u32_at(raw, 14),
            width: i32_at(raw, 18),
            height: i32_at(raw, 22),
            planes: u16_at(raw, 26),
            bits_per_pixel: u16_at(raw, 28),
            compression: u32_at(raw, 30),
            image_size: u32_at(raw, 34),
            x_pixels_per_meter: i32_at(raw, 38),
            y_pixels_per_meter: i32_at(raw, 42),
            colors_in_palette: u32_at(raw, 46),
            important_colors: u32_at(raw, 50),
        };
        trace!("raw header fields: {header:?}");
        header
    }

    fn validate(&self, stream_len: u64) -> Result<(), BmpError> {
        if u64::from(self.file_size) != stream_len {
            return Err(BmpError::InconsistentMetadata(format!(
                "file size field says {} bytes but the file is {stream_len} bytes",
                self.file_size
            )));
        }
        if self.reserved != 0 {
            return Err(BmpError::InconsistentMetadata(format!(
                "reserved field must be 0, found {:#x}",
                self.reserved
            )));
        }
        if self.dib_header_size != INFO_HEADER_SIZE {
            return Err(BmpError::UnsupportedFormat(format!(
                "DIB header size {} (only the 40-byte BITMAPINFOHEADER is supported)",
                self.dib_header_size
            )));
        }
        if self.planes != 1 {
            return Err(BmpError::UnsupportedFormat(format!(
                "{} colour planes, expected 1",
                self.planes
            )));
        }
        let depth = BitDepth::from_bits(self.bits_per_pixel).ok_or_else(|| {
            BmpError::UnsupportedFormat(format!(
                "{}-bit images (only 8-bit and 24-bit are supported)",
                self.bits_per_pixel
            ))
        })?;
        if self.compression != 0 {
            return Err(BmpError::UnsupportedFormat(format!(
                "compression method {} (only uncompressed images are supported)",
                self.compression
            )));
        }
        if depth == BitDepth::Indexed8 && self.colors_in_palette > MAX_PALETTE_ENTRIES {
            return Err(BmpError::InconsistentMetadata(format!(
                "{} palette entries, at most {MAX_PALETTE_ENTRIES} allowed",
                self.colors_in_palette
            )));
        }

        self.check_pixel_array(depth)?;

        if depth == BitDepth::Indexed8 {
            let palette_bytes = u64::from(self.colors_in_palette) * PALETTE_ENTRY_SIZE as u64;
            let gap = u64::from(self.pixel_array_offset) - HEADER_SIZE as u64;
            if palette_bytes != gap {
                return Err(BmpError::InconsistentMetadata(format!(
                    "{} palette entries need {palette_bytes} bytes \
                     but the pixel array starts {gap} bytes after the header",
                    self.colors_in_palette
                )));
            }
        }
        Ok(())
    }

    /// Stride consistency: padded rows times |height| must fill exactly the
    /// bytes between the pixel array offset and the end of the file.
    fn check_pixel_array(&self, depth: BitDepth) -> Result<(), BmpError> {
        if self.width <= 0 {
            return Err(BmpError::InconsistentMetadata(format!(
                "width must be positive, found {}",
                self.width
            )));
        }
        let offset = u64::from(self.pixel_array_offset);
        let file_size = u64::from(self.file_size);
        if offset < HEADER_SIZE as u64 || offset > file_size {
            return Err(BmpError::InconsistentMetadata(format!(
                "pixel array offset {offset} lies outside [{HEADER_SIZE}, {file_size}]"
            )));
        }

        let stride = depth.row_stride(u64::from(self.width.unsigned_abs()));
        let expected = stride * u64::from(self.height.unsigned_abs());
        let actual = file_size - offset;
        if expected != actual {
            return Err(BmpError::InconsistentMetadata(format!(
                "pixel array holds {actual} bytes but {}x{} at {}-bit \
                 with a {stride}-byte stride needs {expected}",
                self.width,
                self.height,
                depth.bits()
            )));
        }
        Ok(())
    }

    /// Re-serialise the header exactly as it was read.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..2].copy_from_slice(&MAGIC);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..10].copy_from_slice(&self.reserved.to_le_bytes());
        out[10..14].copy_from_slice(&self.pixel_array_offset.to_le_bytes());
        out[14..18].copy_from_slice(&self.dib_header_size.to_le_bytes());
        out[18..22].copy_from_slice(&self.width.to_le_bytes());
        out[22..26].copy_from_slice(&self.height.to_le_bytes());
        out[26..28].copy_from_slice(&self.planes.to_le_bytes());
        out[28..30].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[30..34].copy_from_slice(&self.compression.to_le_bytes());
        out[34..38].copy_from_slice(&self.image_size.to_le_bytes());
        out[38..42].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[42..46].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[46..50].copy_from_slice(&self.colors_in_palette.to_le_bytes());
        out[50..54].copy_from_slice(&self.important_colors.to_le_bytes());
        out
    }

    pub fn file_size(&self) -> u32 {
        self.file_size
    }

    pub fn reserved(&self) -> u32 {
        self.reserved
    }

    pub fn pixel_array_offset(&self) -> u32 {
        self.pixel_array_offset
    }

    pub fn dib_header_size(&self) -> u32 {
        self.dib_header_size
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    /// Signed height; negative means rows are stored top-down.
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn planes(&self) -> u16 {
        self.planes
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    pub fn compression(&self) -> u32 {
        self.compression
    }

    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    pub fn x_pixels_per_meter(&self) -> i32 {
        self.x_pixels_per_meter
    }

    pub fn y_pixels_per_meter(&self) -> i32 {
        self.y_pixels_per_meter
    }

    pub fn colors_in_palette(&self) -> u32 {
        self.colors_in_palette
    }

    pub fn important_colors(&self) -> u32 {
        self.important_colors
    }

    pub fn bit_depth(&self) -> BitDepth {
        if self.bits_per_pixel == 8 {
            BitDepth::Indexed8
        } else {
            BitDepth::Truecolor24
        }
    }

    /// Width in pixels as an unsigned count.
    pub fn width_px(&self) -> usize {
        self.width.unsigned_abs() as usize
    }

    /// Number of stored rows.
    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Padding bytes after each row.
    pub fn row_padding(&self) -> usize {
        self.bit_depth()
            .row_padding(u64::from(self.width.unsigned_abs())) as usize
    }

    /// Padded row length in bytes.
    pub fn row_stride(&self) -> usize {
        self.bit_depth()
            .row_stride(u64::from(self.width.unsigned_abs())) as usize
    }

    /// Length of the pixel array, `file_size - pixel_array_offset`.
    pub fn pixel_array_len(&self) -> usize {
        (self.file_size - self.pixel_array_offset) as usize
    }

    /// Colour table length in bytes; zero for 24-bit images.
    pub fn palette_len(&self) -> usize {
        match self.bit_depth() {
            BitDepth::Indexed8 => self.colors_in_palette as usize * PALETTE_ENTRY_SIZE,
            BitDepth::Truecolor24 => 0,
        }
    }

    /// Bytes between the end of the header and the pixel array that are not
    /// colour table.
    pub fn gap_len(&self) -> usize {
        self.pixel_array_offset as usize - HEADER_SIZE - self.palette_len()
    }
}
