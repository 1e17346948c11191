//! A decoded BMP: validated header plus owned palette and pixel buffers.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;

use log::debug;

use super::header::{BitDepth, BmpHeader};
use super::planes::{Palette, alloc_buffer, read_planes};
use crate::error::{BmpError, Section};
use crate::limits::Limits;

/// A fully buffered BMP image.
///
/// Buffers are owned by the image and released when it is dropped; the
/// source stream is not retained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpImage {
    header: BmpHeader,
    palette: Palette,
    gap: Vec<u8>,
    pixels: Vec<u8>,
}

impl BmpImage {
    /// Open, validate and buffer a BMP file. The file is closed before this
    /// returns.
    pub fn open<P: AsRef<Path>>(path: P, limits: Option<&Limits>) -> Result<Self, BmpError> {
        let path = path.as_ref();
        debug!("opening {}", path.display());
        let file = File::open(path).map_err(|e| BmpError::Io {
            what: Section::Open,
            source: e,
        })?;
        Self::from_reader(&mut BufReader::new(file), limits)
    }

    /// Decode from any seekable stream.
    pub fn from_reader<R: Read + Seek>(
        reader: &mut R,
        limits: Option<&Limits>,
    ) -> Result<Self, BmpError> {
        let header = BmpHeader::decode(reader)?;
        let planes = read_planes(reader, &header, limits)?;
        Ok(Self {
            header,
            palette: planes.palette,
            gap: planes.gap,
            pixels: planes.pixels,
        })
    }

    /// Decode an in-memory file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        Self::from_reader(&mut Cursor::new(data), None)
    }

    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.header.bit_depth()
    }

    /// Colour table; empty for 24-bit images.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Bytes found between the header and a 24-bit pixel array.
    pub fn gap(&self) -> &[u8] {
        &self.gap
    }

    /// Raw pixel array including row padding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Rows in storage order with the padding cut off.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let row_bytes = self.header.width_px() * self.bit_depth().bytes_per_pixel();
        self.pixels
            .chunks_exact(self.header.row_stride())
            .map(move |row| &row[..row_bytes])
    }

    /// Serialise: the original header, the colour table or the bytes that
    /// preceded the pixel array, then the pixel array.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BmpError> {
        let mut out = alloc_buffer(self.header.file_size() as usize, None)?;
        out.extend_from_slice(&self.header.to_bytes());
        out.extend_from_slice(self.palette.as_bytes());
        out.extend_from_slice(&self.gap);
        out.extend_from_slice(&self.pixels);
        debug_assert_eq!(out.len(), self.header.file_size() as usize);
        Ok(out)
    }

    /// Write the serialised image to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), BmpError> {
        let bytes = self.to_bytes()?;
        writer
            .write_all(&bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| BmpError::io(Section::Output, e))
    }

    /// Create or truncate `path` and write the image to it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BmpError> {
        write_file(path.as_ref(), &self.to_bytes()?)
    }
}

/// Create or truncate `path` and write `bytes` to it.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), BmpError> {
    debug!("writing {} bytes to {}", bytes.len(), path.display());
    let mut file = File::create(path).map_err(|e| BmpError::Io {
        what: Section::Open,
        source: e,
    })?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|e| BmpError::io(Section::Output, e))
}
