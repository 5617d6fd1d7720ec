// this_file: crates/psfont-fontdb/src/lib.rs

//! Where fonts come to life: PSF1/PSF2 decoding for Psfont
//!
//! Console fonts are a header followed by one dense block of 1-bit glyph
//! bitmaps, optionally trailed by a table saying which Unicode codepoints
//! each glyph depicts. This crate turns those bytes into a [`PsfFont`] and
//! back.
//!
//! Fonts are plain values: no registry, no process-wide handle. Load one,
//! pass it by reference to every draw call, drop it when done.
//!
//! ```
//! use psfont_fontdb::{PsfFont, PsfFontBuilder};
//!
//! let bytes = PsfFontBuilder::new(8, 16).build()?.to_psf2_bytes()?;
//! let font = PsfFont::from_bytes(&bytes)?;
//! assert!(font.is_version2());
//! assert_eq!((font.width(), font.height()), (8, 16));
//! # Ok::<(), psfont_core::PsfError>(())
//! ```

mod encode;
mod font;
mod header;
mod reader;
mod unicode_table;

use std::path::Path;

pub use encode::PsfFontBuilder;
pub use font::PsfFont;
pub use header::{
    Psf1Header, Psf2Header, PsfHeader, PsfVersion, PSF1_MAGIC, PSF1_MODE_512, PSF1_MODE_HAS_SEQ,
    PSF1_MODE_HAS_TAB, PSF1_WIDTH, PSF2_HAS_UNICODE_TABLE, PSF2_MAGIC,
};
pub use unicode_table::{
    UnicodeMapping, UnicodeTable, PSF1_SEPARATOR, PSF1_STARTSEQ, PSF2_SEPARATOR, PSF2_STARTSEQ,
};

use psfont_core::Result;

/// Read a PSF1 or PSF2 font from disk
///
/// Fails with `FileNotFound` when the file cannot be read, and with the
/// decoder's errors when its contents are not a usable font. Nothing is
/// returned on failure; there is no partial font.
pub fn load_font(path: impl AsRef<Path>) -> Result<PsfFont> {
    let path = path.as_ref();
    let font = PsfFont::from_file(path)?;
    log::info!(
        "Loaded {} font {} ({} glyphs, {}x{})",
        font.version(),
        path.display(),
        font.glyph_count(),
        font.width(),
        font.height()
    );
    Ok(font)
}

/// Release a font's glyph storage
///
/// Dropping the font does the same; this just makes the end of its life
/// explicit at the call site.
pub fn unload_font(font: PsfFont) {
    log::debug!(
        "Unloading {} font with {} glyphs",
        font.version(),
        font.glyph_count()
    );
    drop(font);
}
