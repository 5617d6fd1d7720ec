// this_file: crates/psfont/src/params.rs

//! Knobs for laying text out.

use std::num::NonZeroU32;

use psfont_unicode::Utf8Mode;

/// What a background box does with lines past [`LayoutParams::max_lines`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineOverflow {
    /// Keep the first `max_lines` lines, drop the rest
    #[default]
    Truncate,
    /// Refuse to draw; report `LayoutError::TooManyLines`
    Error,
}

/// How text should be laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutParams {
    /// Pixels between cells, and between lines
    pub spacing: i32,
    /// Block scale of every glyph
    pub scale: NonZeroU32,
    /// Pixels between text and the edge of a background box
    pub padding: i32,
    /// Line limit for background boxes; `None` is unbounded
    pub max_lines: Option<usize>,
    pub overflow: LineOverflow,
    pub utf8_mode: Utf8Mode,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            spacing: 0,
            scale: NonZeroU32::MIN,
            padding: 0,
            max_lines: None,
            overflow: LineOverflow::Truncate,
            utf8_mode: Utf8Mode::Lenient,
        }
    }
}

impl LayoutParams {
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_scale(mut self, scale: NonZeroU32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_max_lines(mut self, max_lines: Option<usize>, overflow: LineOverflow) -> Self {
        self.max_lines = max_lines;
        self.overflow = overflow;
        self
    }

    pub fn with_utf8_mode(mut self, utf8_mode: Utf8Mode) -> Self {
        self.utf8_mode = utf8_mode;
        self
    }
}
