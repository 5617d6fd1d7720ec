// this_file: crates/psfont-fontdb/src/encode.rs

//! Writing fonts back out, and building them from scratch.

use std::collections::BTreeMap;

use psfont_core::{error::FontLoadError, Glyph, Result};

use crate::font::PsfFont;
use crate::header::{
    Psf1Header, Psf2Header, PsfHeader, PsfVersion, PSF1_MODE_512, PSF1_MODE_HAS_SEQ,
    PSF1_MODE_HAS_TAB, PSF1_WIDTH, PSF2_HAS_UNICODE_TABLE,
};
use crate::unicode_table::{UnicodeMapping, UnicodeTable};

impl PsfFont {
    /// Encode as PSF2 with a 32-byte header
    ///
    /// Row padding in the stride is kept as is. The Unicode table, when
    /// present, follows the glyphs.
    pub fn to_psf2_bytes(&self) -> Result<Vec<u8>> {
        let table = self.unicode_table().filter(|table| !table.is_empty());
        let header = Psf2Header {
            version: 0,
            header_size: Psf2Header::SIZE as u32,
            flags: if table.is_some() {
                PSF2_HAS_UNICODE_TABLE
            } else {
                0
            },
            length: self.glyph_count(),
            charsize: self.stride() as u32,
            height: self.height(),
            width: self.width(),
        };

        let mut out = Vec::with_capacity(Psf2Header::SIZE + self.glyph_data().len());
        header.write(&mut out);
        out.extend_from_slice(self.glyph_data());
        if let Some(table) = table {
            table.write_psf2(&mut out, self.glyph_count() as usize)?;
        }
        Ok(out)
    }

    /// Encode as PSF1
    ///
    /// Only 8 px wide fonts of 256 or 512 glyphs under 256 px tall fit the
    /// format; anything else is [`FontLoadError::InvalidHeader`].
    pub fn to_psf1_bytes(&self) -> Result<Vec<u8>> {
        let charsize = psf1_charsize(self.width(), self.height(), self.glyph_count())?;
        let table = self.unicode_table().filter(|table| !table.is_empty());

        let mut mode = 0;
        if self.glyph_count() == 512 {
            mode |= PSF1_MODE_512;
        }
        if let Some(table) = table {
            mode |= PSF1_MODE_HAS_TAB;
            if table.has_sequences() {
                mode |= PSF1_MODE_HAS_SEQ;
            }
        }

        let mut out = Vec::with_capacity(Psf1Header::SIZE + self.glyph_data().len());
        Psf1Header { mode, charsize }.write(&mut out);
        // PSF1 has no row padding; drop whatever a PSF2 stride carried
        for glyph in self.glyphs() {
            out.extend_from_slice(&glyph.data()[..charsize as usize]);
        }
        if let Some(table) = table {
            table.write_psf1(&mut out, self.glyph_count() as usize)?;
        }
        Ok(out)
    }
}

fn psf1_charsize(width: u32, height: u32, glyph_count: u32) -> Result<u8> {
    if width != PSF1_WIDTH {
        return Err(FontLoadError::InvalidHeader(format!(
            "PSF1 glyphs are 8 px wide, not {width}"
        ))
        .into());
    }
    if glyph_count != 256 && glyph_count != 512 {
        return Err(FontLoadError::InvalidHeader(format!(
            "PSF1 holds 256 or 512 glyphs, not {glyph_count}"
        ))
        .into());
    }
    u8::try_from(height).map_err(|_| {
        FontLoadError::InvalidHeader(format!("PSF1 glyphs are at most 255 px tall, not {height}"))
            .into()
    })
}

/// Assemble a font in memory
///
/// Unset glyphs are blank. Rows are packed `ceil(width / 8)` bytes each.
///
/// ```
/// use psfont_fontdb::PsfFontBuilder;
///
/// let font = PsfFontBuilder::new(8, 8)
///     .glyph(b'A' as u32, &[0x18, 0x24, 0x42, 0x7E, 0x42, 0x42, 0x42, 0x00])
///     .mapping(b'A' as u32, 'A' as u32)
///     .build()
///     .unwrap();
/// assert_eq!(font.glyph_count(), 256);
/// assert!(font.glyph(65).unwrap().is_set(3, 0));
/// ```
#[derive(Debug, Clone)]
pub struct PsfFontBuilder {
    version: PsfVersion,
    width: u32,
    height: u32,
    glyph_count: u32,
    glyphs: BTreeMap<u32, Vec<u8>>,
    mappings: Vec<(u32, UnicodeMapping)>,
}

impl PsfFontBuilder {
    /// A blank 256-glyph PSF2 font
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            version: PsfVersion::Psf2,
            width,
            height,
            glyph_count: 256,
            glyphs: BTreeMap::new(),
            mappings: Vec::new(),
        }
    }

    pub fn version(mut self, version: PsfVersion) -> Self {
        self.version = version;
        self
    }

    pub fn glyph_count(mut self, glyph_count: u32) -> Self {
        self.glyph_count = glyph_count;
        self
    }

    /// Set the bitmap of glyph `index`; short bitmaps are zero-padded
    pub fn glyph(mut self, index: u32, bitmap: &[u8]) -> Self {
        self.glyphs.insert(index, bitmap.to_vec());
        self
    }

    /// Declare that glyph `index` depicts `codepoint`
    pub fn mapping(mut self, index: u32, codepoint: u32) -> Self {
        self.mappings.push((index, UnicodeMapping::Single(codepoint)));
        self
    }

    /// Declare that glyph `index` depicts a combining sequence
    pub fn sequence(mut self, index: u32, codepoints: Vec<u32>) -> Self {
        self.mappings.push((index, UnicodeMapping::Sequence(codepoints)));
        self
    }

    pub fn build(self) -> Result<PsfFont> {
        let glyph_count = self.glyph_count;
        let stride = Glyph::row_bytes_for(self.width) as usize * self.height as usize;
        let mut glyph_data = vec![0u8; stride * self.glyph_count as usize];

        for (index, bitmap) in &self.glyphs {
            check_index(*index, glyph_count)?;
            if bitmap.len() > stride {
                return Err(FontLoadError::InvalidHeader(format!(
                    "glyph {index} has {} bytes, the stride is {stride}",
                    bitmap.len()
                ))
                .into());
            }
            let start = *index as usize * stride;
            glyph_data[start..start + bitmap.len()].copy_from_slice(bitmap);
        }

        let unicode_table = if self.mappings.is_empty() {
            None
        } else {
            let mut table = UnicodeTable::new(self.glyph_count as usize);
            for (index, mapping) in self.mappings {
                check_index(index, glyph_count)?;
                table.push(index as usize, mapping);
            }
            Some(table)
        };
        let has_table = unicode_table.is_some();

        let header = match self.version {
            PsfVersion::Psf1 => {
                let charsize = psf1_charsize(self.width, self.height, self.glyph_count)?;
                let mut mode = if self.glyph_count == 512 { PSF1_MODE_512 } else { 0 };
                if has_table {
                    mode |= PSF1_MODE_HAS_TAB;
                }
                if unicode_table.as_ref().is_some_and(UnicodeTable::has_sequences) {
                    mode |= PSF1_MODE_HAS_SEQ;
                }
                PsfHeader::V1(Psf1Header { mode, charsize })
            },
            PsfVersion::Psf2 => PsfHeader::V2(Psf2Header {
                version: 0,
                header_size: Psf2Header::SIZE as u32,
                flags: if has_table { PSF2_HAS_UNICODE_TABLE } else { 0 },
                length: self.glyph_count,
                charsize: stride as u32,
                height: self.height,
                width: self.width,
            }),
        };

        PsfFont::from_parts(
            header,
            self.width,
            self.height,
            self.glyph_count,
            glyph_data,
            unicode_table,
        )
    }
}

fn check_index(index: u32, glyph_count: u32) -> Result<()> {
    if index >= glyph_count {
        return Err(FontLoadError::InvalidHeader(format!(
            "glyph {index} is past the end of a {glyph_count}-glyph font"
        ))
        .into());
    }
    Ok(())
}
