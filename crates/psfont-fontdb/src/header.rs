// this_file: crates/psfont-fontdb/src/header.rs

//! PSF1 and PSF2 file headers.

use psfont_core::{error::FontLoadError, Glyph};

use crate::reader::ByteReader;

pub const PSF1_MAGIC: [u8; 2] = [0x36, 0x04];
pub const PSF2_MAGIC: [u8; 4] = [0x72, 0xB5, 0x4A, 0x86];

/// PSF1 mode bit: 512 glyphs instead of 256
pub const PSF1_MODE_512: u8 = 0x01;
/// PSF1 mode bit: a Unicode table follows the glyphs
pub const PSF1_MODE_HAS_TAB: u8 = 0x02;
/// PSF1 mode bit: the Unicode table contains sequences
pub const PSF1_MODE_HAS_SEQ: u8 = 0x04;

/// PSF2 flag bit: a Unicode table follows the glyphs
pub const PSF2_HAS_UNICODE_TABLE: u32 = 0x01;

/// PSF1 glyphs are always one byte wide
pub const PSF1_WIDTH: u32 = 8;

/// Which of the two on-disk layouts a font came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PsfVersion {
    Psf1,
    Psf2,
}

impl PsfVersion {
    /// Identify the format from the leading magic bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&PSF2_MAGIC) {
            Some(Self::Psf2)
        } else if bytes.starts_with(&PSF1_MAGIC) {
            Some(Self::Psf1)
        } else {
            None
        }
    }
}

impl std::fmt::Display for PsfVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Psf1 => f.write_str("PSF1"),
            Self::Psf2 => f.write_str("PSF2"),
        }
    }
}

/// The four-byte PSF1 header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Psf1Header {
    pub mode: u8,
    /// Bytes per glyph, which is also the glyph height
    pub charsize: u8,
}

impl Psf1Header {
    pub const SIZE: usize = 4;

    pub fn glyph_count(&self) -> u32 {
        if self.mode & PSF1_MODE_512 != 0 {
            512
        } else {
            256
        }
    }

    pub fn has_unicode_table(&self) -> bool {
        self.mode & (PSF1_MODE_HAS_TAB | PSF1_MODE_HAS_SEQ) != 0
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self, FontLoadError> {
        reader.take(PSF1_MAGIC.len(), "PSF1 header")?;
        let mode = reader.u8("PSF1 header")?;
        let charsize = reader.u8("PSF1 header")?;
        if charsize == 0 {
            return Err(FontLoadError::InvalidHeader(
                "PSF1 charsize is zero".to_string(),
            ));
        }
        Ok(Self { mode, charsize })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&PSF1_MAGIC);
        out.push(self.mode);
        out.push(self.charsize);
    }
}

/// The 32-byte PSF2 header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Psf2Header {
    pub version: u32,
    /// Absolute offset of the glyph bitmaps
    pub header_size: u32,
    pub flags: u32,
    /// Number of glyphs
    pub length: u32,
    /// Bytes per glyph
    pub charsize: u32,
    pub height: u32,
    pub width: u32,
}

impl Psf2Header {
    pub const SIZE: usize = 32;

    pub fn has_unicode_table(&self) -> bool {
        self.flags & PSF2_HAS_UNICODE_TABLE != 0
    }

    /// Size of the glyph bitmap block
    pub fn glyph_region_len(&self) -> Result<usize, FontLoadError> {
        (self.length as usize)
            .checked_mul(self.charsize as usize)
            .ok_or_else(|| {
                FontLoadError::InvalidHeader(format!(
                    "{} glyphs of {} bytes overflow the address space",
                    self.length, self.charsize
                ))
            })
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self, FontLoadError> {
        reader.take(PSF2_MAGIC.len(), "PSF2 header")?;
        let header = Self {
            version: reader.u32_le("PSF2 header")?,
            header_size: reader.u32_le("PSF2 header")?,
            flags: reader.u32_le("PSF2 header")?,
            length: reader.u32_le("PSF2 header")?,
            charsize: reader.u32_le("PSF2 header")?,
            height: reader.u32_le("PSF2 header")?,
            width: reader.u32_le("PSF2 header")?,
        };
        header.validate()?;
        Ok(header)
    }

    /// Reject geometry no glyph table could satisfy
    fn validate(&self) -> Result<(), FontLoadError> {
        if self.width == 0 || self.height == 0 {
            return Err(FontLoadError::InvalidHeader(format!(
                "glyph size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.length == 0 {
            return Err(FontLoadError::InvalidHeader(
                "font declares zero glyphs".to_string(),
            ));
        }
        if (self.header_size as usize) < Self::SIZE {
            return Err(FontLoadError::InvalidHeader(format!(
                "header size {} is smaller than {}",
                self.header_size,
                Self::SIZE
            )));
        }
        let bitmap = (Glyph::row_bytes_for(self.width) as u64) * self.height as u64;
        if (self.charsize as u64) < bitmap {
            return Err(FontLoadError::InvalidHeader(format!(
                "charsize {} cannot hold a {}x{} bitmap ({} bytes)",
                self.charsize, self.width, self.height, bitmap
            )));
        }
        Ok(())
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&PSF2_MAGIC);
        for field in [
            self.version,
            self.header_size,
            self.flags,
            self.length,
            self.charsize,
            self.height,
            self.width,
        ] {
            out.extend_from_slice(&field.to_le_bytes());
        }
    }
}

/// Header of a loaded font, whichever format it was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsfHeader {
    V1(Psf1Header),
    V2(Psf2Header),
}

impl PsfHeader {
    pub fn version(&self) -> PsfVersion {
        match self {
            Self::V1(_) => PsfVersion::Psf1,
            Self::V2(_) => PsfVersion::Psf2,
        }
    }

    pub fn has_unicode_table(&self) -> bool {
        match self {
            Self::V1(header) => header.has_unicode_table(),
            Self::V2(header) => header.has_unicode_table(),
        }
    }
}
