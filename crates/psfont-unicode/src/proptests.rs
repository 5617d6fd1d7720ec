use super::*;
use proptest::prelude::*;

proptest! {
    // Every decode step makes progress and stays inside the buffer
    #[test]
    fn prop_decode_always_advances(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let mut offset = 0;
        while offset < bytes.len() {
            let (_, consumed) = decode(&bytes, offset);
            prop_assert!(consumed >= 1);
            prop_assert!(offset + consumed <= bytes.len());
            offset += consumed;
        }
    }

    // On valid input both modes agree with std
    #[test]
    fn prop_matches_std_on_valid_text(s in "\\PC*") {
        let expected: Vec<u32> = s.chars().map(|c| c as u32).collect();
        let lenient: Vec<u32> = codepoints(&s).collect();
        let strict: Vec<u32> = Codepoints::new(s.as_bytes(), Utf8Mode::Validating).collect();
        prop_assert_eq!(&lenient, &expected);
        prop_assert_eq!(&strict, &expected);
    }

    #[test]
    fn prop_length_counts_chars(s in "\\PC*") {
        prop_assert_eq!(utf8_length(&s), s.chars().count());
    }

    #[test]
    fn prop_two_byte_text_halves(s in "[\u{0080}-\u{07FF}]{0,32}") {
        prop_assert_eq!(utf8_length(&s) * 2, s.len());
    }

    #[test]
    fn prop_printable_ascii_is_identity(cp in 32u32..=126) {
        prop_assert_eq!(GlyphIndexMap::cp866().resolve(cp), cp);
        prop_assert_eq!(GlyphIndexMap::ascii_only().resolve(cp), cp);
    }

    // Unmapped codepoints always land on the space glyph
    #[test]
    fn prop_unmapped_is_space(cp in 0x3000u32..0x10FFFF) {
        prop_assert_eq!(GlyphIndexMap::cp866().resolve(cp), SPACE_GLYPH);
    }
}
