//! Psfont - console bitmap fonts on any pixel surface
//!
//! Psfont draws UTF-8 text with PSF1/PSF2 console fonts:
//! 1. Font decoding (`fontdb`)
//! 2. UTF-8 decoding and glyph resolution (`unicode`)
//! 3. Rasterization, block-scaled or filtered (`render`)
//! 4. Text layout with optional contrasting background boxes
//! 5. Image export (`export`)
//!
//! Output goes to a [`PixelSink`]: a framebuffer, a test recorder, or the
//! bundled [`Canvas`](psfont_core::Canvas).
//!
//! # Example
//!
//! ```
//! use psfont::prelude::*;
//!
//! let font = PsfFontBuilder::new(8, 16)
//!     .glyph(b'A' as u32, &[0x18; 16])
//!     .build()?;
//! let mut canvas = Canvas::new(100, 40);
//! let renderer = TextRenderer::new(&font);
//! let bounds = renderer.draw_text_with_inverted_background(
//!     "A\nAA", 10, 5, 1, NonZeroU32::MIN, Color::WHITE, 2, &mut canvas,
//! )?;
//! assert_eq!(bounds, Rect::new(8, 3, 21, 37));
//! # Ok::<(), PsfError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `export` (default): PNG and PPM encoders

mod layout;
mod params;

use std::path::Path;

pub use psfont_core::{error, traits, Color, Glyph, PixelSink, Rect};
pub use psfont_core::{color, surface};
pub use psfont_fontdb as fontdb;
pub use psfont_render_bitmap as render;
pub use psfont_unicode as unicode;

#[cfg(feature = "export")]
pub use psfont_export as export;

pub use layout::{TextBlock, TextRenderer};
pub use params::{LayoutParams, LineOverflow};

use psfont_core::Result;
use psfont_fontdb::PsfFont;

/// Load a PSF1 or PSF2 font file
pub fn load_font(path: impl AsRef<Path>) -> Result<PsfFont> {
    psfont_fontdb::load_font(path)
}

/// Release a font loaded with [`load_font`]
pub fn unload_font(font: PsfFont) {
    psfont_fontdb::unload_font(font)
}

/// Number of codepoints in `text`, read leniently
pub fn utf8_length<T: AsRef<[u8]> + ?Sized>(text: &T) -> usize {
    psfont_unicode::utf8_length(text)
}

/// Box color that keeps `text` readable
pub fn inverted_background_for(text: Color) -> Color {
    psfont_core::color::inverted_background_for(text)
}

/// Common imports for typical usage
pub mod prelude {
    pub use std::num::NonZeroU32;

    pub use psfont_core::{
        error::{PsfError, Result},
        traits::{Exporter, PixelSink},
        Canvas, Color, Rect,
    };
    pub use psfont_fontdb::{PsfFont, PsfFontBuilder, PsfVersion};
    pub use psfont_render_bitmap::{FilterMode, GlyphMaskCache};
    pub use psfont_unicode::{GlyphIndexMap, Utf8Mode};

    pub use crate::{LayoutParams, LineOverflow, TextBlock, TextRenderer};

    #[cfg(feature = "export")]
    pub use psfont_export::{PngExporter, PnmExporter};
}
