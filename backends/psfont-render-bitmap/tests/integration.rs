//! Integration tests for the bitmap rasterizer
//!
//! Glyphs come from real PSF fonts built in memory, drawn onto a `Canvas`.

use std::collections::HashSet;
use std::num::NonZeroU32;

use proptest::prelude::*;
use psfont_core::{Canvas, Color, Glyph, PixelSink};
use psfont_fontdb::{PsfFont, PsfFontBuilder, PsfVersion};
use psfont_render_bitmap::{draw_glyph, draw_glyph_scaled, draw_mask, AlphaMask, FilterMode};

/// An 8x16 'A'-ish glyph
const GLYPH_A: [u8; 16] = [
    0x00, 0x00, 0x10, 0x38, 0x6C, 0xC6, 0xC6, 0xFE, 0xC6, 0xC6, 0xC6, 0xC6, 0x00, 0x00, 0x00, 0x00,
];

fn psf1_font() -> PsfFont {
    let font = PsfFontBuilder::new(8, 16)
        .version(PsfVersion::Psf1)
        .glyph(65, &GLYPH_A)
        .build()
        .unwrap();
    // Go through the file format so the decoder is part of the path
    PsfFont::from_bytes(&font.to_psf1_bytes().unwrap()).unwrap()
}

fn lit(canvas: &Canvas) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();
    for y in 0..canvas.height() as i32 {
        for x in 0..canvas.width() as i32 {
            if canvas.pixel(x, y) != Some(Color::BLACK) {
                pixels.insert((x, y));
            }
        }
    }
    pixels
}

#[test]
fn test_glyph_65_pixel_for_pixel() {
    let font = psf1_font();
    let glyph = font.glyph(65).unwrap();
    let mut canvas = Canvas::new(8, 16);
    draw_glyph(&glyph, 0, 0, Color::WHITE, &mut canvas);

    for (row, bits) in GLYPH_A.iter().enumerate() {
        for col in 0..8 {
            let expected = if bits & (0x80 >> col) != 0 {
                Color::WHITE
            } else {
                Color::BLACK
            };
            assert_eq!(
                canvas.pixel(col, row as i32),
                Some(expected),
                "pixel ({col}, {row})"
            );
        }
    }
}

#[test]
fn test_scale_3_blocks() {
    let font = psf1_font();
    let glyph = font.glyph(65).unwrap();
    let mut canvas = Canvas::new(24, 48);
    draw_glyph_scaled(&glyph, 0, 0, NonZeroU32::new(3).unwrap(), Color::GREEN, &mut canvas);

    for y in 0..48 {
        for x in 0..24 {
            let set = glyph.is_set(x as u32 / 3, y as u32 / 3);
            let expected = if set { Color::GREEN } else { Color::BLACK };
            assert_eq!(canvas.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn test_scale_1_matches_unscaled() {
    let font = psf1_font();
    let glyph = font.glyph(65).unwrap();
    let mut plotted = Canvas::new(8, 16);
    let mut filled = Canvas::new(8, 16);
    draw_glyph(&glyph, 0, 0, Color::WHITE, &mut plotted);
    draw_glyph_scaled(&glyph, 0, 0, NonZeroU32::MIN, Color::WHITE, &mut filled);
    assert_eq!(plotted, filled);
}

#[test]
fn test_drawing_off_canvas_clips() {
    let font = psf1_font();
    let glyph = font.glyph(65).unwrap();
    let mut canvas = Canvas::new(8, 16);
    draw_glyph(&glyph, -4, -8, Color::WHITE, &mut canvas);
    draw_glyph_scaled(&glyph, 6, 10, NonZeroU32::new(4).unwrap(), Color::WHITE, &mut canvas);

    // Canvas (x, y) shows glyph (x + 4, y + 8); row 8 is 0xC6
    assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
    assert_eq!(canvas.pixel(1, 0), Some(Color::WHITE));
    assert_eq!(canvas.pixel(2, 0), Some(Color::WHITE));
    assert_eq!(canvas.pixel(3, 0), Some(Color::BLACK));
    // The scaled copy starts on blank rows and never reaches the canvas
    assert_eq!(canvas.pixel(7, 15), Some(Color::BLACK));
}

#[test]
fn test_background_is_left_alone() {
    let font = psf1_font();
    let glyph = font.glyph(65).unwrap();
    let mut canvas = Canvas::filled(8, 16, Color::BLUE);
    draw_glyph(&glyph, 0, 0, Color::WHITE, &mut canvas);
    assert_eq!(canvas.pixel(0, 0), Some(Color::BLUE));
    assert_eq!(canvas.pixel(3, 2), Some(Color::WHITE));
}

#[test]
fn test_nearest_mask_matches_block_rasterizer() {
    let font = psf1_font();
    let glyph = font.glyph(65).unwrap();

    let mut blocks = Canvas::new(32, 64);
    draw_glyph_scaled(&glyph, 0, 0, NonZeroU32::new(4).unwrap(), Color::WHITE, &mut blocks);

    let mut textured = Canvas::new(32, 64);
    let mask = AlphaMask::from_glyph(&glyph).scaled(4.0, FilterMode::for_scale(4.0));
    draw_mask(&mask, 0, 0, Color::WHITE, &mut textured);

    assert_eq!(blocks, textured);
}

#[test]
fn test_fractional_mask_covers_scaled_box() {
    let font = psf1_font();
    let glyph = font.glyph(65).unwrap();
    let mask = AlphaMask::from_glyph(&glyph).scaled(1.5, FilterMode::for_scale(1.5));
    assert_eq!((mask.width(), mask.height()), (12, 24));

    let mut canvas = Canvas::new(12, 24);
    draw_mask(&mask, 0, 0, Color::WHITE, &mut canvas);
    let lit = lit(&canvas);
    assert!(!lit.is_empty());
    // Top two glyph rows are blank, so the first two scaled rows stay dark
    assert!(lit.iter().all(|&(_, y)| y >= 2));
}

/// Collects the pixels each bit's own `scale x scale` block would cover
#[derive(Default)]
struct PixelSet(HashSet<(i32, i32)>);

impl PixelSink for PixelSet {
    fn plot_pixel(&mut self, x: i32, y: i32, _color: Color) {
        self.0.insert((x, y));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Run batching covers exactly the per-bit blocks
    #[test]
    fn prop_batched_equals_per_bit(
        rows in proptest::collection::vec(any::<u16>(), 1..8),
        width in 1u32..=16,
        scale in 1u32..5,
        x in -20i32..20,
        y in -20i32..20,
    ) {
        let data: Vec<u8> = rows.iter().flat_map(|r| r.to_be_bytes()).collect();
        let height = rows.len() as u32;
        // Two bytes per row only when the width needs them
        let data: Vec<u8> = if width <= 8 {
            data.chunks(2).map(|pair| pair[0]).collect()
        } else {
            data
        };
        let glyph = Glyph::new(&data, width, height).unwrap();

        let mut batched = PixelSet::default();
        draw_glyph_scaled(&glyph, x, y, NonZeroU32::new(scale).unwrap(), Color::WHITE, &mut batched);

        let mut expected = HashSet::new();
        for r in 0..height {
            for c in 0..width {
                if glyph.is_set(c, r) {
                    for dy in 0..scale as i32 {
                        for dx in 0..scale as i32 {
                            expected.insert((x + c as i32 * scale as i32 + dx, y + r as i32 * scale as i32 + dy));
                        }
                    }
                }
            }
        }
        prop_assert_eq!(batched.0, expected);
    }
}
