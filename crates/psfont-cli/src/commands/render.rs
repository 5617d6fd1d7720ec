//! Render command implementation
//!
//! Text in, image out: load the font, size the canvas, lay the text out
//! with block or filtered scaling, export.

use std::fs;
use std::io::{self, Read, Write};
use std::num::NonZeroU32;

use anyhow::{bail, ensure, Context, Result};
use psfont::prelude::*;
use psfont::render::scaled_size;
use psfont::unicode::utf8_length_with;

use crate::cli::{OutputFormat, RenderArgs};

/// Largest canvas `render` will allocate (an 8192x8192 image)
const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// How glyphs get scaled
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scaling {
    Block(NonZeroU32),
    Filtered(f32),
}

impl Scaling {
    fn for_scale(scale: f32) -> Result<Self> {
        ensure!(
            scale.is_finite() && scale > 0.0,
            "Scale must be a positive number, got {scale}"
        );
        if scale.fract() == 0.0 && scale <= u32::MAX as f32 {
            if let Some(whole) = NonZeroU32::new(scale as u32) {
                return Ok(Self::Block(whole));
            }
        }
        Ok(Self::Filtered(scale))
    }

    /// Glyph cell size in pixels, before spacing
    fn cell(self, font: &PsfFont) -> (u32, u32) {
        match self {
            Self::Block(scale) => (
                font.width().saturating_mul(scale.get()),
                font.height().saturating_mul(scale.get()),
            ),
            Self::Filtered(scale) => scaled_size(font.width(), font.height(), scale),
        }
    }
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let text = input_text(args)?;
    let font = psfont::load_font(&args.font)
        .with_context(|| format!("Failed to load font {}", args.font.display()))?;

    let scaling = Scaling::for_scale(args.scale)?;
    if args.boxed && matches!(scaling, Scaling::Filtered(_)) {
        bail!("--boxed needs a whole-number --scale, got {}", args.scale);
    }

    let mut params = LayoutParams::default()
        .with_spacing(args.spacing)
        .with_padding(args.padding)
        .with_max_lines(args.max_lines, args.overflow.into())
        .with_utf8_mode(if args.validate_utf8 {
            Utf8Mode::Validating
        } else {
            Utf8Mode::Lenient
        });
    if let Scaling::Block(scale) = scaling {
        params = params.with_scale(scale);
    }
    let renderer = TextRenderer::new(&font).with_params(params);

    let (extent_w, extent_h) = text_extent(&renderer, &text, scaling, args)?;
    let inset = args.margin as i64 + if args.boxed { args.padding as i64 } else { 0 };
    let fit = |extent: i64, offset: i32| -> u32 {
        let size = 2 * args.margin as i64 + extent + offset.max(0) as i64;
        size.clamp(1, u32::MAX as i64) as u32
    };
    let (width, x) = match args.width {
        Some(width) => (width, args.x),
        None => (fit(extent_w, args.x), clamp_i32(inset + args.x as i64)),
    };
    let (height, y) = match args.height {
        Some(height) => (height, args.y),
        None => (fit(extent_h, args.y), clamp_i32(inset + args.y as i64)),
    };
    log::debug!("Canvas {width}x{height}, text at ({x}, {y}), {scaling:?}");
    ensure!(
        width as u64 * height as u64 <= MAX_CANVAS_PIXELS,
        "Canvas {width}x{height} is larger than {MAX_CANVAS_PIXELS} pixels"
    );

    let mut canvas = Canvas::try_filled(width, height, args.background)
        .with_context(|| format!("Failed to allocate a {width}x{height} canvas"))?;
    match scaling {
        Scaling::Block(_) if args.boxed => {
            let bounds = renderer.draw_boxed(&text, x, y, args.foreground, &mut canvas)?;
            log::info!(
                "Box at ({}, {}) size {}x{}",
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height
            );
        },
        Scaling::Block(_) => renderer.draw(&text, x, y, args.foreground, &mut canvas),
        Scaling::Filtered(scale) => {
            let cache = GlyphMaskCache::default();
            renderer.draw_text_filtered(
                &text,
                x,
                y,
                args.spacing,
                scale,
                args.foreground,
                &mut canvas,
                &cache,
            )?;
            let stats = cache.stats();
            log::debug!(
                "Mask cache: {} hits, {} misses ({:.0}% hit rate)",
                stats.hits,
                stats.misses,
                stats.hit_rate() * 100.0
            );
        },
    }

    let format = output_format(args);
    let exporter = psfont::export::exporter_for(format.as_str())?;
    let exported = exporter.export(&canvas)?;
    write_output(args, &exported)?;

    if let Some(ref path) = args.output_file {
        log::info!(
            "Rendered {}x{} {} ({} bytes) to {}",
            width,
            height,
            format.as_str(),
            exported.len(),
            path.display()
        );
    }
    psfont::unload_font(font);
    Ok(())
}

fn input_text(args: &RenderArgs) -> Result<Vec<u8>> {
    // Priority: positional text > --text-file > stdin
    if let Some(ref text) = args.text {
        return Ok(text.clone().into_bytes());
    }
    if let Some(ref path) = args.text_file {
        return fs::read(path)
            .with_context(|| format!("Failed to read text file {}", path.display()));
    }
    let mut text = Vec::new();
    io::stdin()
        .read_to_end(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}

/// Pixel extent of `text` as drawn from the origin, box included when boxed
fn text_extent(
    renderer: &TextRenderer<'_>,
    text: &[u8],
    scaling: Scaling,
    args: &RenderArgs,
) -> Result<(i64, i64)> {
    if let (Scaling::Block(scale), true) = (scaling, args.boxed) {
        let block = renderer.measure(text, args.spacing, scale)?;
        let bounds = block.bounds_at(0, 0, args.padding);
        return Ok((bounds.width as i64, bounds.height as i64));
    }

    // Unboxed text keeps empty lines; a trailing newline adds nothing
    let text = text.strip_suffix(b"\n").unwrap_or(text);
    let lines: Vec<&[u8]> = if text.is_empty() {
        Vec::new()
    } else {
        text.split(|&b| b == b'\n').collect()
    };
    let columns = lines
        .iter()
        .map(|line| utf8_length_with(renderer.params().utf8_mode, *line))
        .max()
        .unwrap_or(0) as i64;
    let rows = lines.len() as i64;

    let (cell_w, cell_h) = scaling.cell(renderer.font());
    let spacing = args.spacing as i64;
    let span = |count: i64, cell: u32| {
        if count == 0 {
            0
        } else {
            (count * (cell as i64 + spacing) - spacing).max(0)
        }
    };
    Ok((span(columns, cell_w), span(rows, cell_h)))
}

fn output_format(args: &RenderArgs) -> OutputFormat {
    if let Some(format) = args.format {
        return format;
    }
    let extension = args
        .output_file
        .as_ref()
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("ppm") | Some("pnm") => OutputFormat::Ppm,
        _ => OutputFormat::Png,
    }
}

fn write_output(args: &RenderArgs, data: &[u8]) -> Result<()> {
    if let Some(ref path) = args.output_file {
        fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        io::stdout()
            .write_all(data)
            .context("Failed to write image to stdout")?;
    }
    Ok(())
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_choice() {
        assert_eq!(
            Scaling::for_scale(3.0).unwrap(),
            Scaling::Block(NonZeroU32::new(3).unwrap())
        );
        assert_eq!(Scaling::for_scale(1.5).unwrap(), Scaling::Filtered(1.5));
        assert_eq!(Scaling::for_scale(0.5).unwrap(), Scaling::Filtered(0.5));
        assert!(Scaling::for_scale(0.0).is_err());
        assert!(Scaling::for_scale(f32::NAN).is_err());
    }

    #[test]
    fn test_filtered_cell_rounds() {
        let font = PsfFontBuilder::new(8, 16).build().unwrap();
        assert_eq!(Scaling::Filtered(1.5).cell(&font), (12, 24));
        assert_eq!(
            Scaling::Block(NonZeroU32::new(2).unwrap()).cell(&font),
            (16, 32)
        );
    }
}
