//! Colour table and pixel array reading.

use std::io::{Read, Seek, SeekFrom};

use log::trace;
use rgb::RGB8;

use super::header::{BitDepth, BmpHeader, HEADER_SIZE, PALETTE_ENTRY_SIZE};
use crate::error::{BmpError, Section};
use crate::limits::Limits;

/// An 8-bit image's colour table: 4 bytes per entry, stored B, G, R, reserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    bytes: Vec<u8>,
}

impl Palette {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.bytes.len() / PALETTE_ENTRY_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw table bytes, exactly as stored in the file.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Resolve an index to its colour, ignoring the reserved byte.
    pub fn color(&self, index: u8) -> Option<RGB8> {
        let off = usize::from(index) * PALETTE_ENTRY_SIZE;
        let entry = self.bytes.get(off..off + PALETTE_ENTRY_SIZE)?;
        Some(RGB8::new(entry[2], entry[1], entry[0]))
    }

    /// [`Palette::color`], with indices past the end of the table resolving
    /// to black.
    pub fn resolve(&self, index: u8) -> RGB8 {
        self.color(index).unwrap_or_default()
    }

    /// Invert B, G and R of every entry. Reserved bytes are kept.
    pub(crate) fn invert(&mut self) {
        for entry in self.bytes.chunks_exact_mut(PALETTE_ENTRY_SIZE) {
            for channel in &mut entry[..3] {
                *channel = !*channel;
            }
        }
    }
}

/// The buffers read after the header.
#[derive(Clone, Debug)]
pub struct PixelPlanes {
    pub palette: Palette,
    /// Bytes between the header and a 24-bit pixel array, kept as read.
    pub gap: Vec<u8>,
    /// Padded rows in storage order, `file_size - pixel_array_offset` bytes.
    pub pixels: Vec<u8>,
}

/// Read everything after the header: the colour table (8-bit only), any
/// gap before the pixel array, then the pixel array itself.
///
/// Validation guarantees an 8-bit table exactly fills the space up to
/// `pixel_array_offset`, so only 24-bit images can carry a gap.
pub fn read_planes<R: Read + Seek>(
    reader: &mut R,
    header: &BmpHeader,
    limits: Option<&Limits>,
) -> Result<PixelPlanes, BmpError> {
    if let Some(limits) = limits {
        limits.check(header.width_px() as u64, u64::from(header.abs_height()))?;
    }

    reader
        .seek(SeekFrom::Start(HEADER_SIZE as u64))
        .map_err(|e| BmpError::io(Section::Seek, e))?;

    let palette = match header.bit_depth() {
        BitDepth::Indexed8 => {
            let bytes = read_buffer(reader, header.palette_len(), Section::Palette, limits)?;
            Palette::from_bytes(bytes)
        }
        BitDepth::Truecolor24 => Palette::default(),
    };
    let gap = read_buffer(reader, header.gap_len(), Section::Gap, limits)?;
    let pixels = read_buffer(
        reader,
        header.pixel_array_len(),
        Section::PixelArray,
        limits,
    )?;
    trace!(
        "read {} palette entries, {} gap bytes and {} pixel bytes",
        palette.len(),
        gap.len(),
        pixels.len()
    );

    Ok(PixelPlanes {
        palette,
        gap,
        pixels,
    })
}

/// Reserve `len` bytes without aborting on failure, then fill them.
pub(crate) fn alloc_buffer(len: usize, limits: Option<&Limits>) -> Result<Vec<u8>, BmpError> {
    if let Some(limits) = limits {
        limits.check_memory(len as u64)?;
    }
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| BmpError::AllocationError { bytes: len as u64 })?;
    Ok(buf)
}

fn read_buffer<R: Read>(
    reader: &mut R,
    len: usize,
    what: Section,
    limits: Option<&Limits>,
) -> Result<Vec<u8>, BmpError> {
    let mut buf = alloc_buffer(len, limits)?;
    buf.resize(len, 0);
    reader
        .read_exact(&mut buf)
        .map_err(|e| BmpError::io(what, e))?;
    Ok(buf)
}
