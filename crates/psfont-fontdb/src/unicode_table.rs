// this_file: crates/psfont-fontdb/src/unicode_table.rs

//! Embedded glyph-to-Unicode tables.
//!
//! Each glyph gets a list of the codepoints it depicts, terminated by a
//! separator. A start-of-sequence marker introduces a combining sequence;
//! from then on every value belongs to a sequence until the next marker or
//! the separator. PSF1 stores 16-bit little-endian units, PSF2 stores UTF-8.

use psfont_core::error::FontLoadError;
use psfont_unicode::{decode_with, MapEntry, Utf8Mode};

pub const PSF1_SEPARATOR: u16 = 0xFFFF;
pub const PSF1_STARTSEQ: u16 = 0xFFFE;
pub const PSF2_SEPARATOR: u8 = 0xFF;
pub const PSF2_STARTSEQ: u8 = 0xFE;

/// Largest value the four-byte UTF-8 form can carry
const MAX_ENCODABLE: u32 = 0x1F_FFFF;

/// What one table entry says about a glyph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnicodeMapping {
    /// The glyph depicts this codepoint
    Single(u32),
    /// The glyph depicts this combining sequence
    Sequence(Vec<u32>),
}

/// Per-glyph mapping lists, indexed by glyph
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnicodeTable {
    glyphs: Vec<Vec<UnicodeMapping>>,
}

impl UnicodeTable {
    pub fn new(glyph_count: usize) -> Self {
        Self {
            glyphs: vec![Vec::new(); glyph_count],
        }
    }

    /// Append a mapping to `glyph`, growing the table if needed
    pub fn push(&mut self, glyph: usize, mapping: UnicodeMapping) {
        if self.glyphs.len() <= glyph {
            self.glyphs.resize(glyph + 1, Vec::new());
        }
        self.glyphs[glyph].push(mapping);
    }

    pub fn mappings(&self, glyph: usize) -> &[UnicodeMapping] {
        self.glyphs.get(glyph).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of glyph slots the table describes
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.iter().all(Vec::is_empty)
    }

    pub fn single_count(&self) -> usize {
        self.iter_singles().count()
    }

    pub fn sequence_count(&self) -> usize {
        self.glyphs
            .iter()
            .flatten()
            .filter(|m| matches!(m, UnicodeMapping::Sequence(_)))
            .count()
    }

    pub fn has_sequences(&self) -> bool {
        self.sequence_count() > 0
    }

    /// First glyph that lists `codepoint` as a single mapping
    pub fn glyph_for(&self, codepoint: u32) -> Option<u32> {
        self.iter_singles()
            .find(|entry| entry.codepoint == codepoint)
            .map(|entry| entry.glyph)
    }

    /// Single mappings as resolver entries, in glyph order
    pub fn map_entries(&self) -> Vec<MapEntry> {
        self.iter_singles().collect()
    }

    fn iter_singles(&self) -> impl Iterator<Item = MapEntry> + '_ {
        self.glyphs.iter().enumerate().flat_map(|(glyph, mappings)| {
            mappings.iter().filter_map(move |mapping| match mapping {
                UnicodeMapping::Single(cp) => Some(MapEntry::new(*cp, glyph as u32)),
                UnicodeMapping::Sequence(_) => None,
            })
        })
    }

    pub(crate) fn parse_psf1(data: &[u8], glyph_count: usize) -> Self {
        let mut table = Self::new(glyph_count);
        let mut units = data
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));

        let mut glyph = 0;
        'glyphs: while glyph < glyph_count {
            let mut builder = EntryBuilder::default();
            loop {
                let Some(unit) = units.next() else {
                    builder.finish(&mut table, glyph);
                    break 'glyphs;
                };
                match unit {
                    PSF1_SEPARATOR => break,
                    PSF1_STARTSEQ => builder.start_sequence(&mut table, glyph),
                    cp => builder.add(&mut table, glyph, cp as u32),
                }
            }
            builder.finish(&mut table, glyph);
            glyph += 1;
        }

        warn_if_truncated("PSF1", glyph, glyph_count);
        table
    }

    pub(crate) fn parse_psf2(data: &[u8], glyph_count: usize) -> Self {
        let mut table = Self::new(glyph_count);
        let mut pos = 0;

        let mut glyph = 0;
        'glyphs: while glyph < glyph_count {
            let mut builder = EntryBuilder::default();
            loop {
                let Some(&byte) = data.get(pos) else {
                    builder.finish(&mut table, glyph);
                    break 'glyphs;
                };
                match byte {
                    PSF2_SEPARATOR => {
                        pos += 1;
                        break;
                    },
                    PSF2_STARTSEQ => {
                        pos += 1;
                        builder.start_sequence(&mut table, glyph);
                    },
                    _ => {
                        let (cp, consumed) = decode_with(Utf8Mode::Validating, data, pos);
                        pos += consumed;
                        // A one-byte decode above 0x7F is a rejected sequence
                        if consumed == 1 && byte >= 0x80 {
                            log::debug!("Skipping malformed UTF-8 byte {byte:#04x} in Unicode table");
                            continue;
                        }
                        builder.add(&mut table, glyph, cp);
                    },
                }
            }
            builder.finish(&mut table, glyph);
            glyph += 1;
        }

        warn_if_truncated("PSF2", glyph, glyph_count);
        table
    }

    pub(crate) fn write_psf1(&self, out: &mut Vec<u8>, glyph_count: usize) -> Result<(), FontLoadError> {
        let unit = |cp: u32| -> Result<[u8; 2], FontLoadError> {
            match u16::try_from(cp) {
                Ok(value) if value < PSF1_STARTSEQ => Ok(value.to_le_bytes()),
                _ => Err(FontLoadError::InvalidHeader(format!(
                    "U+{cp:04X} does not fit a PSF1 Unicode table"
                ))),
            }
        };

        for glyph in 0..glyph_count {
            for cp in self.singles_of(glyph) {
                out.extend_from_slice(&unit(cp)?);
            }
            for sequence in self.sequences_of(glyph) {
                out.extend_from_slice(&PSF1_STARTSEQ.to_le_bytes());
                for &cp in sequence {
                    out.extend_from_slice(&unit(cp)?);
                }
            }
            out.extend_from_slice(&PSF1_SEPARATOR.to_le_bytes());
        }
        Ok(())
    }

    pub(crate) fn write_psf2(&self, out: &mut Vec<u8>, glyph_count: usize) -> Result<(), FontLoadError> {
        for glyph in 0..glyph_count {
            for cp in self.singles_of(glyph) {
                push_utf8(out, cp)?;
            }
            for sequence in self.sequences_of(glyph) {
                out.push(PSF2_STARTSEQ);
                for &cp in sequence {
                    push_utf8(out, cp)?;
                }
            }
            out.push(PSF2_SEPARATOR);
        }
        Ok(())
    }

    // Singles are written before sequences: once a sequence starts, every
    // later value belongs to one.
    fn singles_of(&self, glyph: usize) -> impl Iterator<Item = u32> + '_ {
        self.mappings(glyph).iter().filter_map(|m| match m {
            UnicodeMapping::Single(cp) => Some(*cp),
            UnicodeMapping::Sequence(_) => None,
        })
    }

    fn sequences_of(&self, glyph: usize) -> impl Iterator<Item = &[u32]> + '_ {
        self.mappings(glyph).iter().filter_map(|m| match m {
            UnicodeMapping::Sequence(seq) => Some(seq.as_slice()),
            UnicodeMapping::Single(_) => None,
        })
    }
}

/// Collects one glyph's entries while parsing
#[derive(Default)]
struct EntryBuilder {
    sequence: Option<Vec<u32>>,
}

impl EntryBuilder {
    fn add(&mut self, table: &mut UnicodeTable, glyph: usize, cp: u32) {
        match self.sequence.as_mut() {
            Some(seq) => seq.push(cp),
            None => table.push(glyph, UnicodeMapping::Single(cp)),
        }
    }

    fn start_sequence(&mut self, table: &mut UnicodeTable, glyph: usize) {
        self.finish(table, glyph);
        self.sequence = Some(Vec::new());
    }

    fn finish(&mut self, table: &mut UnicodeTable, glyph: usize) {
        if let Some(seq) = self.sequence.take() {
            if !seq.is_empty() {
                table.push(glyph, UnicodeMapping::Sequence(seq));
            }
        }
    }
}

fn warn_if_truncated(format: &str, parsed: usize, expected: usize) {
    if parsed < expected {
        log::warn!(
            "{format} Unicode table ends after {parsed} of {expected} glyphs; remaining glyphs are unmapped"
        );
    }
}

/// UTF-8 encode without the surrogate check, so decoded tables re-encode
fn push_utf8(out: &mut Vec<u8>, cp: u32) -> Result<(), FontLoadError> {
    match cp {
        0..=0x7F => out.push(cp as u8),
        0x80..=0x7FF => {
            out.push(0xC0 | (cp >> 6) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        },
        0x800..=0xFFFF => {
            out.push(0xE0 | (cp >> 12) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        },
        0x1_0000..=MAX_ENCODABLE => {
            out.push(0xF0 | (cp >> 18) as u8);
            out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        },
        _ => {
            return Err(FontLoadError::InvalidHeader(format!(
                "codepoint {cp:#x} cannot be UTF-8 encoded"
            )))
        },
    }
    Ok(())
}
