// this_file: crates/psfont-fontdb/src/font.rs

//! The decoded font descriptor.

use std::fs;
use std::path::Path;

use psfont_core::{error::FontLoadError, Glyph, Result};
use psfont_unicode::GlyphIndexMap;

use crate::header::{Psf1Header, Psf2Header, PsfHeader, PsfVersion, PSF1_WIDTH};
use crate::reader::ByteReader;
use crate::unicode_table::UnicodeTable;

/// A console font in memory: fixed-size 1-bit glyphs in one flat buffer
///
/// Immutable once built. Glyph `i` occupies `glyph_data[i * stride..][..stride]`;
/// each row is `ceil(width / 8)` bytes, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsfFont {
    header: PsfHeader,
    width: u32,
    height: u32,
    glyph_count: u32,
    stride: usize,
    glyph_data: Vec<u8>,
    unicode_table: Option<UnicodeTable>,
}

impl PsfFont {
    /// Decode a PSF1 or PSF2 font
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match PsfVersion::detect(bytes) {
            Some(PsfVersion::Psf1) => Self::parse_psf1(bytes),
            Some(PsfVersion::Psf2) => Self::parse_psf2(bytes),
            None => Err(FontLoadError::UnsupportedFormat {
                magic: bytes.iter().take(4).copied().collect(),
            }
            .into()),
        }
    }

    /// Read and decode a font file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;
        Self::from_bytes(&data)
    }

    fn parse_psf1(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let header = Psf1Header::read(&mut reader)?;

        let glyph_count = header.glyph_count();
        let stride = header.charsize as usize;
        let glyph_data = reader
            .take(glyph_count as usize * stride, "glyph bitmaps")?
            .to_vec();
        let unicode_table = header
            .has_unicode_table()
            .then(|| UnicodeTable::parse_psf1(reader.rest(), glyph_count as usize));

        log::debug!(
            "Loaded PSF1 font: mode {:#04x}, {} glyphs of {}x{}",
            header.mode,
            glyph_count,
            PSF1_WIDTH,
            header.charsize
        );

        Ok(Self {
            header: PsfHeader::V1(header),
            width: PSF1_WIDTH,
            height: header.charsize as u32,
            glyph_count,
            stride,
            glyph_data,
            unicode_table,
        })
    }

    fn parse_psf2(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let header = Psf2Header::read(&mut reader)?;
        if header.version != 0 {
            log::warn!(
                "PSF2 version {} is newer than 0; reading it as version 0",
                header.version
            );
        }

        reader.seek(header.header_size as usize, "PSF2 header")?;
        let glyph_data = reader
            .take(header.glyph_region_len()?, "glyph bitmaps")?
            .to_vec();
        let unicode_table = header
            .has_unicode_table()
            .then(|| UnicodeTable::parse_psf2(reader.rest(), header.length as usize));

        log::debug!(
            "Loaded PSF2 font: {} glyphs of {}x{}, stride {}, header {} bytes, flags {:#x}",
            header.length,
            header.width,
            header.height,
            header.charsize,
            header.header_size,
            header.flags
        );

        Ok(Self {
            header: PsfHeader::V2(header),
            width: header.width,
            height: header.height,
            glyph_count: header.length,
            stride: header.charsize as usize,
            glyph_data,
            unicode_table,
        })
    }

    /// Assemble a font from validated parts
    pub(crate) fn from_parts(
        header: PsfHeader,
        width: u32,
        height: u32,
        glyph_count: u32,
        glyph_data: Vec<u8>,
        unicode_table: Option<UnicodeTable>,
    ) -> Result<Self> {
        if width == 0 || height == 0 || glyph_count == 0 {
            return Err(FontLoadError::InvalidHeader(format!(
                "{glyph_count} glyphs of {width}x{height} is an empty font"
            ))
            .into());
        }
        let stride = Glyph::row_bytes_for(width) as usize * height as usize;
        if glyph_data.len() != glyph_count as usize * stride {
            return Err(FontLoadError::InvalidHeader(format!(
                "glyph buffer holds {} bytes, expected {}",
                glyph_data.len(),
                glyph_count as usize * stride
            ))
            .into());
        }
        Ok(Self {
            header,
            width,
            height,
            glyph_count,
            stride,
            glyph_data,
            unicode_table,
        })
    }

    pub fn version(&self) -> PsfVersion {
        self.header.version()
    }

    pub fn is_version2(&self) -> bool {
        self.version() == PsfVersion::Psf2
    }

    /// Header as it was read (or as it will be written)
    pub fn header(&self) -> &PsfHeader {
        &self.header
    }

    /// Glyph width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Glyph height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    /// Bytes per glyph bitmap, including any row padding
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// All glyph bitmaps back to back
    pub fn glyph_data(&self) -> &[u8] {
        &self.glyph_data
    }

    /// Bitmap of glyph `index`, or `None` past the end of the font
    #[inline]
    pub fn glyph(&self, index: u32) -> Option<Glyph<'_>> {
        if index >= self.glyph_count {
            return None;
        }
        let start = index as usize * self.stride;
        let data = self.glyph_data.get(start..start + self.stride)?;
        Glyph::new(data, self.width, self.height)
    }

    /// Every glyph in index order
    pub fn glyphs(&self) -> impl Iterator<Item = Glyph<'_>> + '_ {
        (0..self.glyph_count).filter_map(move |index| self.glyph(index))
    }

    /// The embedded Unicode table, when the font carries one
    pub fn unicode_table(&self) -> Option<&UnicodeTable> {
        self.unicode_table.as_ref()
    }

    /// Resolver for this font: its own Unicode table when it has one with
    /// single mappings, the code page 866 Cyrillic map otherwise
    pub fn glyph_index_map(&self) -> GlyphIndexMap {
        match &self.unicode_table {
            Some(table) if table.single_count() > 0 => {
                GlyphIndexMap::from_entries(table.map_entries())
            },
            _ => GlyphIndexMap::cp866(),
        }
    }
}
