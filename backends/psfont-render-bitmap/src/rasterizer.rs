//! Glyph bits to pixels, no smoothing
//!
//! A set bit is ink, a clear bit is left alone: the background is whatever
//! the sink already holds. Nothing here clips; the sink drops pixels that
//! fall outside it.

use std::num::NonZeroU32;

use psfont_core::{Color, Glyph, PixelSink};

/// Draw `glyph` one pixel per bit with its top-left corner at `(x, y)`
///
/// ```
/// use psfont_core::{Canvas, Color, Glyph};
/// use psfont_render_bitmap::draw_glyph;
///
/// let bits = [0b1000_0001, 0b0000_0000];
/// let glyph = Glyph::new(&bits, 8, 2).unwrap();
/// let mut canvas = Canvas::new(8, 2);
/// draw_glyph(&glyph, 0, 0, Color::WHITE, &mut canvas);
/// assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
/// assert_eq!(canvas.pixel(7, 0), Some(Color::WHITE));
/// assert_eq!(canvas.pixel(1, 0), Some(Color::BLACK));
/// ```
pub fn draw_glyph<S: PixelSink + ?Sized>(
    glyph: &Glyph<'_>,
    x: i32,
    y: i32,
    color: Color,
    sink: &mut S,
) {
    for row in 0..glyph.height() {
        let bits = glyph.row(row);
        let py = y.saturating_add(row as i32);
        for col in 0..glyph.width() {
            if bit_set(bits, col) {
                sink.plot_pixel(x.saturating_add(col as i32), py, color);
            }
        }
    }
}

/// Draw `glyph` with every bit blown up to a `scale x scale` block
///
/// Bit `(c, r)` covers the block at `(x + c * scale, y + r * scale)`.
/// Horizontal runs of ink are emitted as one rectangle each, which covers
/// exactly the pixels the per-bit blocks would.
pub fn draw_glyph_scaled<S: PixelSink + ?Sized>(
    glyph: &Glyph<'_>,
    x: i32,
    y: i32,
    scale: NonZeroU32,
    color: Color,
    sink: &mut S,
) {
    let scale = i32::try_from(scale.get()).unwrap_or(i32::MAX);
    for row in 0..glyph.height() {
        let py = y.saturating_add((row as i32).saturating_mul(scale));
        for (start, len) in ink_runs(glyph.row(row), glyph.width()) {
            sink.fill_rect(
                x.saturating_add((start as i32).saturating_mul(scale)),
                py,
                (len as i32).saturating_mul(scale),
                scale,
                color,
            );
        }
    }
}

#[inline]
fn bit_set(bits: &[u8], col: u32) -> bool {
    bits[(col / 8) as usize] & (0x80 >> (col % 8)) != 0
}

/// Maximal runs of set bits in one row, as `(first column, length)`
fn ink_runs(bits: &[u8], width: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
    let mut col = 0;
    std::iter::from_fn(move || {
        while col < width && !bit_set(bits, col) {
            col += 1;
        }
        if col >= width {
            return None;
        }
        let start = col;
        while col < width && bit_set(bits, col) {
            col += 1;
        }
        Some((start, col - start))
    })
}
