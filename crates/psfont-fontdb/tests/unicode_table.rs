//! Embedded Unicode tables and the resolver they produce

use psfont_fontdb::{
    PsfFont, UnicodeMapping, PSF1_MAGIC, PSF1_MODE_HAS_TAB, PSF1_SEPARATOR, PSF1_STARTSEQ,
    PSF2_HAS_UNICODE_TABLE, PSF2_MAGIC, PSF2_SEPARATOR,
};
use psfont_unicode::SPACE_GLYPH;

fn psf1_with_table(units: &[u16]) -> Vec<u8> {
    let mut bytes = vec![PSF1_MAGIC[0], PSF1_MAGIC[1], PSF1_MODE_HAS_TAB, 8];
    bytes.resize(4 + 256 * 8, 0);
    for unit in units {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

fn psf2_with_table(glyph_count: u32, table: &[u8]) -> Vec<u8> {
    let mut bytes = PSF2_MAGIC.to_vec();
    for field in [0, 32, PSF2_HAS_UNICODE_TABLE, glyph_count, 8, 8, 8] {
        bytes.extend_from_slice(&u32::to_le_bytes(field));
    }
    bytes.resize(32 + glyph_count as usize * 8, 0);
    bytes.extend_from_slice(table);
    bytes
}

#[test]
fn test_psf1_table_drives_resolution() {
    // Glyph 0 is Ж, glyph 1 is both Ё and Е with diaeresis as a sequence
    let mut units = vec![0x0416, PSF1_SEPARATOR, 0x0401, PSF1_STARTSEQ, 0x0415, 0x0308, PSF1_SEPARATOR];
    units.extend(std::iter::repeat(PSF1_SEPARATOR).take(254));
    let font = PsfFont::from_bytes(&psf1_with_table(&units)).unwrap();

    let table = font.unicode_table().unwrap();
    assert_eq!(table.len(), 256);
    assert_eq!(table.single_count(), 2);
    assert_eq!(table.sequence_count(), 1);
    assert_eq!(
        table.mappings(1),
        &[
            UnicodeMapping::Single(0x0401),
            UnicodeMapping::Sequence(vec![0x0415, 0x0308])
        ]
    );

    let map = font.glyph_index_map();
    assert_eq!(map.resolve(0x0416), 0);
    assert_eq!(map.resolve(0x0401), 1);
    assert_eq!(map.resolve(b'A' as u32), 65);
    // The font's own table replaces the built-in Cyrillic map
    assert_eq!(map.resolve(0x0410), SPACE_GLYPH);
}

#[test]
fn test_psf2_table_with_utf8() {
    let mut table = Vec::new();
    table.extend_from_slice("€".as_bytes());
    table.push(PSF2_SEPARATOR);
    table.extend_from_slice("ÄÆ".as_bytes());
    table.push(PSF2_SEPARATOR);
    let font = PsfFont::from_bytes(&psf2_with_table(2, &table)).unwrap();

    let map = font.glyph_index_map();
    assert_eq!(map.resolve(0x20AC), 0);
    assert_eq!(map.resolve(0xC4), 1);
    assert_eq!(map.resolve(0xC6), 1);
    assert_eq!(map.len(), 3);
}

#[test]
fn test_truncated_table_is_not_fatal() {
    let units = [0x0416, PSF1_SEPARATOR, 0x0401];
    let font = PsfFont::from_bytes(&psf1_with_table(&units)).unwrap();
    let table = font.unicode_table().unwrap();
    assert_eq!(table.glyph_for(0x0416), Some(0));
    assert_eq!(table.glyph_for(0x0401), Some(1));
    assert!(table.mappings(2).is_empty());
}

#[test]
fn test_flagged_but_missing_table() {
    let font = PsfFont::from_bytes(&psf2_with_table(4, &[])).unwrap();
    let table = font.unicode_table().unwrap();
    assert!(table.is_empty());
    // No single mappings: fall back to the built-in map
    assert_eq!(font.glyph_index_map().resolve(0x0410), 0x80);
}

#[test]
fn test_font_without_table_uses_cp866() {
    let mut bytes = psf1_with_table(&[]);
    bytes[2] = 0;
    let font = PsfFont::from_bytes(&bytes).unwrap();
    assert!(font.unicode_table().is_none());
    let map = font.glyph_index_map();
    assert_eq!(map.resolve('Я' as u32), 0x9F);
    assert_eq!(map.resolve(0x1F600), SPACE_GLYPH);
}
