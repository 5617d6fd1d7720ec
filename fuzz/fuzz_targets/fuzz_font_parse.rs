//! Fuzz font parsing to catch crashes from malformed font files
//!
//! Arbitrary bytes go through format detection, header validation, glyph
//! slicing and Unicode table parsing. Whatever decodes must also survive
//! re-encoding and every accessor.

#![no_main]

use libfuzzer_sys::fuzz_target;
use psfont_fontdb::PsfFont;

fuzz_target!(|data: &[u8]| {
    // Skip very large inputs to avoid timeouts
    if data.len() > 4_000_000 {
        return;
    }

    let Ok(font) = PsfFont::from_bytes(data) else {
        return;
    };

    assert_eq!(font.glyphs().count(), font.glyph_count() as usize);
    assert!(font.glyph(font.glyph_count()).is_none());
    let map = font.glyph_index_map();
    let _ = map.resolve('A' as u32);

    // A decoded PSF2 font must re-encode to something that decodes the same
    if font.is_version2() {
        if let Ok(bytes) = font.to_psf2_bytes() {
            let again = PsfFont::from_bytes(&bytes).expect("re-encoded font must decode");
            assert_eq!(again.glyph_data(), font.glyph_data());
        }
    }
});
