//! Psfont bitmap backend: where glyph bits become pixels
//!
//! Two ways to grow a glyph:
//!
//! - [`draw_glyph_scaled`] replicates every bit into an integer-sized
//!   block. Exact, and the default.
//! - [`texture`] turns the glyph into an alpha mask and resamples it, which
//!   handles fractional scales at the cost of soft edges.
//!
//! Both paint through [`psfont_core::PixelSink`], so the caller decides what
//! a pixel is.

pub mod rasterizer;
pub mod texture;

pub use rasterizer::{draw_glyph, draw_glyph_scaled};
pub use texture::{
    checked_scaled_size, draw_mask, scaled_size, AlphaMask, FilterMode, GlyphMaskCache, MaskKey,
    MAX_MASK_PIXELS,
};
