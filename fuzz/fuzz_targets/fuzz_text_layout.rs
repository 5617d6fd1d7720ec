//! Fuzz text layout with arbitrary (often invalid) UTF-8
//!
//! The decoder must always make progress and the layout must never index
//! past the font or the canvas, whatever the bytes.

#![no_main]

use std::num::NonZeroU32;

use libfuzzer_sys::fuzz_target;
use psfont::prelude::*;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 || data.len() > 64 * 1024 {
        return;
    }
    let (knobs, text) = data.split_at(2);

    let Ok(font) = PsfFontBuilder::new(8, 8).glyph_count(128).build() else {
        return;
    };
    let scale = NonZeroU32::new((knobs[0] % 4) as u32 + 1).unwrap_or(NonZeroU32::MIN);
    let spacing = (knobs[1] % 8) as i32 - 2;
    let mode = if knobs[1] & 0x80 != 0 {
        Utf8Mode::Validating
    } else {
        Utf8Mode::Lenient
    };
    let params = LayoutParams::default()
        .with_scale(scale)
        .with_spacing(spacing)
        .with_padding(3)
        .with_utf8_mode(mode)
        .with_max_lines(Some(16), LineOverflow::Truncate);
    let renderer = TextRenderer::new(&font).with_params(params);

    let mut canvas = Canvas::new(64, 64);
    renderer.draw(text, -8, -8, Color::WHITE, &mut canvas);
    let _ = renderer.draw_boxed(text, 4, 4, Color::BLACK, &mut canvas);

    let cache = GlyphMaskCache::new(32);
    let fractional = 0.5 + (knobs[0] as f32) / 64.0;
    let _ = renderer.draw_text_filtered(text, 0, 0, spacing, fractional, Color::RED, &mut canvas, &cache);
});
