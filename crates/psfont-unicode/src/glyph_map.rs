//! Codepoint to glyph index resolution.
//!
//! Console fonts store printable ASCII at the slot matching its code, so
//! `[32, 126]` resolves without a lookup. Everything else goes through a
//! small ordered table, scanned linearly; the first matching entry wins.
//! Anything the table misses renders as a space, which keeps every
//! codepoint exactly one cell wide.

use std::borrow::Cow;
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Glyph index of the space character, the universal fallback
pub const SPACE_GLYPH: u32 = 32;

/// Codepoints whose glyph index equals the codepoint
pub const ASCII_DIRECT: RangeInclusive<u32> = 32..=126;

/// One `codepoint -> glyph index` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapEntry {
    pub codepoint: u32,
    pub glyph: u32,
}

impl MapEntry {
    pub const fn new(codepoint: u32, glyph: u32) -> Self {
        Self { codepoint, glyph }
    }
}

const CP866_LEN: usize = 76;

/// Cyrillic alphabet in code page 866 glyph order
///
/// The layout of most Cyrillic console fonts: А-Я at 0x80, а-п at 0xA0,
/// р-я at 0xE0, then Ё ё Є є Ї ї Ў ў from 0xF0, ° at 0xF8, № at 0xFC.
/// Code page 866 has no Ukrainian І/і; they share the Latin I/i glyphs.
pub static CP866_CYRILLIC: [MapEntry; CP866_LEN] = cp866_table();

const fn cp866_table() -> [MapEntry; CP866_LEN] {
    const EXTRAS: [(u32, u32); 12] = [
        (0x0401, 0xF0), // Ё
        (0x0451, 0xF1), // ё
        (0x0404, 0xF2), // Є
        (0x0454, 0xF3), // є
        (0x0407, 0xF4), // Ї
        (0x0457, 0xF5), // ї
        (0x040E, 0xF6), // Ў
        (0x045E, 0xF7), // ў
        (0x00B0, 0xF8), // °
        (0x2116, 0xFC), // №
        (0x0406, 0x49), // І
        (0x0456, 0x69), // і
    ];

    let mut table = [MapEntry::new(0, 0); CP866_LEN];
    let mut i = 0;
    // А..Я
    while i < 32 {
        table[i] = MapEntry::new(0x0410 + i as u32, 0x80 + i as u32);
        i += 1;
    }
    // а..п
    while i < 48 {
        table[i] = MapEntry::new(0x0430 + (i - 32) as u32, 0xA0 + (i - 32) as u32);
        i += 1;
    }
    // р..я
    while i < 64 {
        table[i] = MapEntry::new(0x0440 + (i - 48) as u32, 0xE0 + (i - 48) as u32);
        i += 1;
    }
    while i < CP866_LEN {
        let (codepoint, glyph) = EXTRAS[i - 64];
        table[i] = MapEntry::new(codepoint, glyph);
        i += 1;
    }
    table
}

/// Ordered resolution table for one alphabet
///
/// Cheap to clone when built from a static table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphIndexMap {
    entries: Cow<'static, [MapEntry]>,
}

impl GlyphIndexMap {
    /// Resolve printable ASCII only; everything else becomes a space
    pub const fn ascii_only() -> Self {
        Self {
            entries: Cow::Borrowed(&[]),
        }
    }

    /// The built-in code page 866 Cyrillic map
    pub fn cp866() -> Self {
        Self::from_static(&CP866_CYRILLIC)
    }

    pub const fn from_static(entries: &'static [MapEntry]) -> Self {
        Self {
            entries: Cow::Borrowed(entries),
        }
    }

    /// Build from owned entries, keeping their order as priority
    pub fn from_entries(entries: Vec<MapEntry>) -> Self {
        let mut seen = HashSet::with_capacity(entries.len());
        let shadowed = entries
            .iter()
            .filter(|entry| !seen.insert(entry.codepoint))
            .count();
        log::debug!(
            "Glyph map built: {} entries, {} shadowed by earlier duplicates",
            entries.len(),
            shadowed
        );
        Self {
            entries: Cow::Owned(entries),
        }
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Table lookup only, without the ASCII fast path or the space fallback
    pub fn lookup(&self, codepoint: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.codepoint == codepoint)
            .map(|entry| entry.glyph)
    }

    /// Glyph index for `codepoint`; never fails
    ///
    /// ```
    /// use psfont_unicode::{GlyphIndexMap, SPACE_GLYPH};
    ///
    /// let map = GlyphIndexMap::cp866();
    /// assert_eq!(map.resolve('A' as u32), 65);
    /// assert_eq!(map.resolve('Ж' as u32), 0x86);
    /// assert_eq!(map.resolve(0x1F600), SPACE_GLYPH);
    /// ```
    #[inline]
    pub fn resolve(&self, codepoint: u32) -> u32 {
        if ASCII_DIRECT.contains(&codepoint) {
            return codepoint;
        }
        self.lookup(codepoint).unwrap_or(SPACE_GLYPH)
    }
}

impl Default for GlyphIndexMap {
    fn default() -> Self {
        Self::cp866()
    }
}

impl FromIterator<MapEntry> for GlyphIndexMap {
    fn from_iter<I: IntoIterator<Item = MapEntry>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}
