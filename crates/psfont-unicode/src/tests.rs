use super::*;

#[test]
fn test_decode_ascii() {
    assert_eq!(decode(b"A", 0), (0x41, 1));
    assert_eq!(decode(b"\n", 0), (0x0A, 1));
    assert_eq!(decode(b"abc", 2), (0x63, 1));
}

#[test]
fn test_decode_multibyte() {
    assert_eq!(decode("Ж".as_bytes(), 0), (0x0416, 2));
    assert_eq!(decode("€".as_bytes(), 0), (0x20AC, 3));
    assert_eq!(decode("😀".as_bytes(), 0), (0x1F600, 4));
    assert_eq!(decode("aЖ".as_bytes(), 1), (0x0416, 2));
}

#[test]
fn test_decode_invalid_lead() {
    assert_eq!(decode(&[0x80], 0), (REPLACEMENT, 1));
    assert_eq!(decode(&[0xBF, 0x41], 0), (REPLACEMENT, 1));
    assert_eq!(decode(&[0xF8, 0x80, 0x80], 0), (REPLACEMENT, 1));
    assert_eq!(decode(&[0xFF], 0), (REPLACEMENT, 1));
}

#[test]
fn test_decode_past_end() {
    assert_eq!(decode(b"", 0), (REPLACEMENT, 0));
    assert_eq!(decode(b"ab", 5), (REPLACEMENT, 0));
}

#[test]
fn test_lenient_ignores_continuation_bits() {
    // 0x41 is not a continuation byte but still contributes its low 6 bits
    assert_eq!(decode(&[0xC3, 0x41], 0), ((0x03 << 6) | 0x01, 2));
}

#[test]
fn test_validating_rejects_bad_continuation() {
    assert_eq!(
        decode_with(Utf8Mode::Validating, &[0xC3, 0x41], 0),
        (REPLACEMENT, 1)
    );
    assert_eq!(
        decode_with(Utf8Mode::Validating, "Ж".as_bytes(), 0),
        (0x0416, 2)
    );
}

#[test]
fn test_truncated_sequence() {
    // E2 82 is the start of U+20AC with the last byte missing
    assert_eq!(decode(&[0xE2, 0x82], 0), ((0x02 << 12) | (0x02 << 6), 2));
    assert_eq!(
        decode_with(Utf8Mode::Validating, &[0xE2, 0x82], 0),
        (REPLACEMENT, 1)
    );
}

#[test]
fn test_utf8_length() {
    assert_eq!(utf8_length(""), 0);
    assert_eq!(utf8_length("Hello"), 5);
    assert_eq!(utf8_length("Привіт"), 6);
    assert_eq!(utf8_length("a€😀"), 3);
    assert_eq!(utf8_length(&[0x80u8, 0x80, 0x41][..]), 3);
}

#[test]
fn test_codepoints_offsets() {
    let mut iter = codepoints("aЖ");
    assert_eq!(iter.offset(), 0);
    assert_eq!(iter.next(), Some(0x61));
    assert_eq!(iter.offset(), 1);
    assert_eq!(iter.next(), Some(0x0416));
    assert_eq!(iter.offset(), 3);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_resolve_ascii_direct() {
    let map = GlyphIndexMap::ascii_only();
    assert_eq!(map.resolve(32), 32);
    assert_eq!(map.resolve(b'A' as u32), 65);
    assert_eq!(map.resolve(126), 126);
}

#[test]
fn test_resolve_fallback_to_space() {
    let map = GlyphIndexMap::ascii_only();
    assert_eq!(map.resolve(127), SPACE_GLYPH);
    assert_eq!(map.resolve(0x0A), SPACE_GLYPH);
    assert_eq!(map.resolve(0), SPACE_GLYPH);
    assert_eq!(map.resolve(0x1F600), SPACE_GLYPH);
}

#[test]
fn test_cp866_layout() {
    let map = GlyphIndexMap::cp866();
    assert_eq!(map.len(), CP866_CYRILLIC.len());
    assert_eq!(map.resolve('А' as u32), 0x80);
    assert_eq!(map.resolve('Я' as u32), 0x9F);
    assert_eq!(map.resolve('а' as u32), 0xA0);
    assert_eq!(map.resolve('п' as u32), 0xAF);
    assert_eq!(map.resolve('р' as u32), 0xE0);
    assert_eq!(map.resolve('я' as u32), 0xEF);
    assert_eq!(map.resolve('Ё' as u32), 0xF0);
    assert_eq!(map.resolve('ё' as u32), 0xF1);
    assert_eq!(map.resolve('ї' as u32), 0xF5);
    assert_eq!(map.resolve('№' as u32), 0xFC);
    assert_eq!(map.resolve('і' as u32), b'i' as u32);
}

#[test]
fn test_cp866_has_unique_codepoints() {
    let mut seen = std::collections::HashSet::new();
    for entry in CP866_CYRILLIC.iter() {
        assert!(seen.insert(entry.codepoint), "duplicate {:#x}", entry.codepoint);
    }
}

#[test]
fn test_first_match_wins() {
    let map = GlyphIndexMap::from_entries(vec![
        MapEntry::new(0x0416, 200),
        MapEntry::new(0x0416, 201),
    ]);
    assert_eq!(map.resolve(0x0416), 200);
    assert_eq!(map.lookup(0x0417), None);
}

#[test]
fn test_table_cannot_override_ascii() {
    let map: GlyphIndexMap = [MapEntry::new(b'A' as u32, 5)].into_iter().collect();
    assert_eq!(map.resolve(b'A' as u32), 65);
    assert_eq!(map.lookup(b'A' as u32), Some(5));
}

#[test]
fn test_default_is_cp866() {
    assert_eq!(GlyphIndexMap::default(), GlyphIndexMap::cp866());
    assert!(GlyphIndexMap::ascii_only().is_empty());
}

#[test]
fn test_glyph_indices() {
    let map = GlyphIndexMap::cp866();
    let glyphs: Vec<u32> = glyph_indices("Ок!\u{1F600}", &map).collect();
    assert_eq!(glyphs, vec![0x8E, 0xAA, 33, SPACE_GLYPH]);
}
