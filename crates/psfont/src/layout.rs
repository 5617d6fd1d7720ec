// this_file: crates/psfont/src/layout.rs

//! Fixed-pitch text layout
//!
//! Every codepoint takes one cell, `glyph_width * scale + spacing` wide.
//! A `\n` byte returns the cursor to the starting column and moves it down
//! `glyph_height * scale + spacing`. Nothing wraps, nothing is kerned.

use std::num::NonZeroU32;

use psfont_core::{
    color::inverted_background_for, error::LayoutError, Color, PixelSink, Rect, Result,
};
use psfont_fontdb::PsfFont;
use psfont_render_bitmap::{
    checked_scaled_size, draw_glyph, draw_glyph_scaled, draw_mask, FilterMode, GlyphMaskCache,
};
use psfont_unicode::{decode_with, utf8_length_with, GlyphIndexMap};

use crate::params::{LayoutParams, LineOverflow};

/// `dim * scale` in pixels, saturating at `i32::MAX`
fn scaled_extent(dim: u32, scale: u32) -> i32 {
    i32::try_from(dim as u64 * scale as u64).unwrap_or(i32::MAX)
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// The lines of a text block and the space they need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock<'t> {
    /// Non-empty lines, in order
    pub lines: Vec<&'t [u8]>,
    /// Codepoints in the longest line
    pub max_line_chars: usize,
    /// Whether lines past the line limit were dropped
    pub truncated: bool,
    /// Ink extent without padding
    pub content_width: i32,
    pub content_height: i32,
}

impl TextBlock<'_> {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Background box for text drawn at `(x, y)`
    pub fn bounds_at(&self, x: i32, y: i32, padding: i32) -> Rect {
        let pad = padding as i64;
        Rect::new(
            clamp_i32(x as i64 - pad),
            clamp_i32(y as i64 - pad),
            clamp_i32(self.content_width as i64 + 2 * pad),
            clamp_i32(self.content_height as i64 + 2 * pad),
        )
    }
}

/// Draws UTF-8 text in one font
///
/// Holds the font by reference together with the codepoint resolver and the
/// layout parameters, so repeated draws don't rebuild either.
///
/// ```
/// use psfont::prelude::*;
///
/// let font = PsfFontBuilder::new(8, 16).build()?;
/// let renderer = TextRenderer::new(&font);
/// let mut canvas = Canvas::new(64, 16);
/// renderer.draw_text("Hi", 0, 0, 1, Color::WHITE, &mut canvas);
/// assert_eq!(renderer.measure("Hi", 1, NonZeroU32::MIN)?.content_width, 17);
/// # Ok::<(), PsfError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TextRenderer<'f> {
    font: &'f PsfFont,
    map: GlyphIndexMap,
    params: LayoutParams,
}

impl<'f> TextRenderer<'f> {
    /// Resolve through the font's own Unicode table, or the built-in map
    pub fn new(font: &'f PsfFont) -> Self {
        Self {
            font,
            map: font.glyph_index_map(),
            params: LayoutParams::default(),
        }
    }

    pub fn with_map(mut self, map: GlyphIndexMap) -> Self {
        self.map = map;
        self
    }

    pub fn with_params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    pub fn font(&self) -> &'f PsfFont {
        self.font
    }

    pub fn map(&self) -> &GlyphIndexMap {
        &self.map
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Draw at scale 1, one pixel per glyph bit
    pub fn draw_text<T, S>(&self, text: &T, x: i32, y: i32, spacing: i32, color: Color, sink: &mut S)
    where
        T: AsRef<[u8]> + ?Sized,
        S: PixelSink + ?Sized,
    {
        let (advance, line_step) = self.steps(spacing, NonZeroU32::MIN);
        self.walk(text.as_ref(), x, y, advance, line_step, |index, px, py| {
            if let Some(glyph) = self.font.glyph(index) {
                draw_glyph(&glyph, px, py, color, &mut *sink);
            }
        });
    }

    /// Draw with every glyph bit blown up to a `scale x scale` block
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_scaled<T, S>(
        &self,
        text: &T,
        x: i32,
        y: i32,
        spacing: i32,
        scale: NonZeroU32,
        color: Color,
        sink: &mut S,
    ) where
        T: AsRef<[u8]> + ?Sized,
        S: PixelSink + ?Sized,
    {
        let (advance, line_step) = self.steps(spacing, scale);
        self.walk(text.as_ref(), x, y, advance, line_step, |index, px, py| {
            if let Some(glyph) = self.font.glyph(index) {
                draw_glyph_scaled(&glyph, px, py, scale, color, &mut *sink);
            }
        });
    }

    /// Draw text inside a filled, outlined box whose color contrasts `color`
    ///
    /// The box starts `padding` pixels up and left of `(x, y)`. Empty lines
    /// are dropped, and the configured line limit applies. Returns the box.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_with_inverted_background<T, S>(
        &self,
        text: &T,
        x: i32,
        y: i32,
        spacing: i32,
        scale: NonZeroU32,
        color: Color,
        padding: i32,
        sink: &mut S,
    ) -> Result<Rect>
    where
        T: AsRef<[u8]> + ?Sized,
        S: PixelSink + ?Sized,
    {
        let block = self.measure(text, spacing, scale)?;
        let bounds = block.bounds_at(x, y, padding);
        let background = inverted_background_for(color);

        sink.fill_rect(bounds.x, bounds.y, bounds.width, bounds.height, background);
        sink.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height, color);

        let (_, line_step) = self.steps(spacing, scale);
        let mut ypos = y;
        for line in &block.lines {
            log::trace!("Boxed line at y={ypos}: {} bytes", line.len());
            self.draw_text_scaled(*line, x, ypos, spacing, scale, color, sink);
            ypos = ypos.saturating_add(line_step);
        }
        Ok(bounds)
    }

    /// Split into lines and size them the way a background box would
    ///
    /// Fails only under [`LineOverflow::Error`] when the text has more lines
    /// than the limit.
    pub fn measure<'t, T>(&self, text: &'t T, spacing: i32, scale: NonZeroU32) -> Result<TextBlock<'t>>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let mut lines: Vec<&'t [u8]> = text
            .as_ref()
            .split(|&b| b == b'\n')
            .filter(|line| !line.is_empty())
            .collect();

        let mut truncated = false;
        if let Some(limit) = self.params.max_lines {
            if lines.len() > limit {
                match self.params.overflow {
                    LineOverflow::Error => {
                        return Err(LayoutError::TooManyLines {
                            limit,
                            found: lines.len(),
                        }
                        .into())
                    },
                    LineOverflow::Truncate => {
                        log::debug!("Dropping {} lines past the limit of {limit}", lines.len() - limit);
                        lines.truncate(limit);
                        truncated = true;
                    },
                }
            }
        }

        let max_line_chars = lines
            .iter()
            .map(|line| utf8_length_with(self.params.utf8_mode, *line))
            .max()
            .unwrap_or(0);

        let cell_w = scaled_extent(self.font.width(), scale.get()) as i64;
        let cell_h = scaled_extent(self.font.height(), scale.get()) as i64;
        let spacing = spacing as i64;
        let count = lines.len() as i64;

        // Gap terms only exist between cells and lines that exist
        let content_width = if max_line_chars > 0 {
            max_line_chars as i64 * (cell_w + spacing) - spacing
        } else {
            0
        };
        let content_height = if count > 0 {
            count * cell_h + (count - 1) * spacing
        } else {
            0
        };

        Ok(TextBlock {
            lines,
            max_line_chars,
            truncated,
            content_width: clamp_i32(content_width),
            content_height: clamp_i32(content_height),
        })
    }

    /// Draw with glyphs resampled as alpha masks, for fractional scales
    ///
    /// Cells are `round(width * scale) + spacing` wide and lines
    /// `round(height * scale) + spacing` apart. Whole-number scales come out
    /// identical to [`draw_text_scaled`](Self::draw_text_scaled). Masks are
    /// cached in `cache`, which should only ever see this font.
    ///
    /// Fails with [`LayoutError::ScaleTooLarge`] when one glyph mask would
    /// cover more than [`MAX_MASK_PIXELS`](psfont_render_bitmap::MAX_MASK_PIXELS).
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_filtered<T, S>(
        &self,
        text: &T,
        x: i32,
        y: i32,
        spacing: i32,
        scale: f32,
        color: Color,
        sink: &mut S,
        cache: &GlyphMaskCache,
    ) -> Result<()>
    where
        T: AsRef<[u8]> + ?Sized,
        S: PixelSink + ?Sized,
    {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LayoutError::InvalidScale(scale).into());
        }
        let filter = FilterMode::for_scale(scale);
        let (cell_w, cell_h) = checked_scaled_size(self.font.width(), self.font.height(), scale)
            .ok_or(LayoutError::ScaleTooLarge {
                scale,
                limit: psfont_render_bitmap::MAX_MASK_PIXELS,
            })?;
        let advance = clamp_i32(cell_w as i64 + spacing as i64);
        let line_step = clamp_i32(cell_h as i64 + spacing as i64);

        self.walk(text.as_ref(), x, y, advance, line_step, |index, px, py| {
            if let Some(glyph) = self.font.glyph(index) {
                let mask = cache.get_or_render(index, &glyph, scale, filter);
                draw_mask(&mask, px, py, color, &mut *sink);
            }
        });
        Ok(())
    }

    /// [`draw_text_scaled`](Self::draw_text_scaled) with the configured
    /// spacing and scale
    pub fn draw<T, S>(&self, text: &T, x: i32, y: i32, color: Color, sink: &mut S)
    where
        T: AsRef<[u8]> + ?Sized,
        S: PixelSink + ?Sized,
    {
        let LayoutParams { spacing, scale, .. } = self.params;
        self.draw_text_scaled(text, x, y, spacing, scale, color, sink);
    }

    /// [`draw_text_with_inverted_background`](Self::draw_text_with_inverted_background)
    /// with the configured spacing, scale and padding
    pub fn draw_boxed<T, S>(&self, text: &T, x: i32, y: i32, color: Color, sink: &mut S) -> Result<Rect>
    where
        T: AsRef<[u8]> + ?Sized,
        S: PixelSink + ?Sized,
    {
        let LayoutParams {
            spacing,
            scale,
            padding,
            ..
        } = self.params;
        self.draw_text_with_inverted_background(text, x, y, spacing, scale, color, padding, sink)
    }

    /// Cell advance and line step at `scale`
    fn steps(&self, spacing: i32, scale: NonZeroU32) -> (i32, i32) {
        (
            scaled_extent(self.font.width(), scale.get()).saturating_add(spacing),
            scaled_extent(self.font.height(), scale.get()).saturating_add(spacing),
        )
    }

    /// Move a cursor through `bytes`, calling `place` once per codepoint
    fn walk(
        &self,
        bytes: &[u8],
        x: i32,
        y: i32,
        advance: i32,
        line_step: i32,
        mut place: impl FnMut(u32, i32, i32),
    ) {
        let mut xpos = x;
        let mut ypos = y;
        let mut offset = 0;
        while offset < bytes.len() {
            if bytes[offset] == b'\n' {
                xpos = x;
                ypos = ypos.saturating_add(line_step);
                offset += 1;
                continue;
            }
            let (codepoint, consumed) = decode_with(self.params.utf8_mode, bytes, offset);
            offset += consumed;

            let index = self.map.resolve(codepoint);
            if index >= self.font.glyph_count() {
                log::debug!(
                    "U+{codepoint:04X} resolves to glyph {index}, past the {} glyphs in this font",
                    self.font.glyph_count()
                );
            }
            place(index, xpos, ypos);
            xpos = xpos.saturating_add(advance);
        }
    }
}
