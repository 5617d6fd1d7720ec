// this_file: crates/psfont-unicode/src/lib.rs

//! From UTF-8 bytes to glyph indices.
//!
//! Two small pieces live here: a forgiving UTF-8 decoder that never stalls
//! on bad input, and the resolver that turns a codepoint into a slot in a
//! console font.

pub mod glyph_map;
pub mod utf8;

pub use glyph_map::{GlyphIndexMap, MapEntry, ASCII_DIRECT, CP866_CYRILLIC, SPACE_GLYPH};
pub use utf8::{
    codepoints, decode, decode_with, utf8_length, utf8_length_with, Codepoints, Utf8Mode,
    REPLACEMENT,
};

/// Decode `text` and resolve every codepoint against `map`
///
/// ```
/// use psfont_unicode::{glyph_indices, GlyphIndexMap};
///
/// let glyphs: Vec<u32> = glyph_indices("Hi Ж", &GlyphIndexMap::cp866()).collect();
/// assert_eq!(glyphs, vec![72, 105, 32, 0x86]);
/// ```
pub fn glyph_indices<'a, T: AsRef<[u8]> + ?Sized>(
    text: &'a T,
    map: &'a GlyphIndexMap,
) -> impl Iterator<Item = u32> + 'a {
    codepoints(text).map(move |cp| map.resolve(cp))
}

#[cfg(test)]
mod tests;

#[cfg(test)]
mod proptests;
