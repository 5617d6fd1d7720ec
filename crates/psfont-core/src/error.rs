//! Error types for Psfont

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PsfError>;

/// Main error type for Psfont
#[derive(Debug, Error)]
pub enum PsfError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported font format (magic {magic:02X?})")]
    UnsupportedFormat { magic: Vec<u8> },

    #[error("Corrupt font file: {region} needs {needed} bytes, {available} available")]
    CorruptFile {
        region: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Invalid font header: {0}")]
    InvalidHeader(String),
}

/// Text layout errors
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Text has {found} lines, limit is {limit}")]
    TooManyLines { limit: usize, found: usize },

    #[error("Scale {0} is not a positive finite number")]
    InvalidScale(f32),

    #[error("Scale {scale} makes glyph masks larger than {limit} pixels")]
    ScaleTooLarge { scale: f32, limit: u64 },
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Format not supported: {0}")]
    FormatNotSupported(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color {0:?}: expected RRGGBB")]
pub struct ParseColorError(pub String);
