//! Psfont Core: the shared vocabulary of the bitmap text pipeline
//!
//! Console fonts are tiny: a header, then a dense block of 1-bit glyph
//! bitmaps. Everything downstream of the decoder speaks in the types held
//! here.
//!
//! ## The Pipeline
//!
//! 1. **Decoding** - PSF1/PSF2 bytes become a font descriptor (`psfont-fontdb`)
//! 2. **Resolution** - UTF-8 text becomes glyph indices (`psfont-unicode`)
//! 3. **Rasterization** - glyph bits become pixels on a [`PixelSink`]
//!    (`psfont-render-bitmap`)
//! 4. **Export** - a [`surface::Canvas`] becomes PNG or PPM (`psfont-export`)
//!
//! ## The Traits That Power Everything
//!
//! - [`PixelSink`] - anything that can receive plotted pixels and rectangles
//! - [`Exporter`] - anything that can encode a finished canvas

pub mod color;
pub mod error;
pub mod surface;
pub mod traits;

pub use color::inverted_background_for;
pub use error::{Result, PsfError};
pub use surface::Canvas;
pub use traits::{Exporter, PixelSink};
pub use types::{Color, Glyph, Rect};

/// The data structures shared by every stage
pub mod types {
    use std::fmt;
    use std::str::FromStr;

    use crate::error::ParseColorError;

    /// Opaque RGB color, the only color model the rasterizer knows
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Color {
        pub r: u8,
        pub g: u8,
        pub b: u8,
    }

    impl Color {
        pub const BLACK: Color = Color::rgb(0, 0, 0);
        pub const WHITE: Color = Color::rgb(255, 255, 255);
        pub const RED: Color = Color::rgb(255, 0, 0);
        pub const GREEN: Color = Color::rgb(0, 255, 0);
        pub const BLUE: Color = Color::rgb(0, 0, 255);
        pub const YELLOW: Color = Color::rgb(255, 255, 0);
        pub const CYAN: Color = Color::rgb(0, 255, 255);
        pub const MAGENTA: Color = Color::rgb(255, 0, 255);

        pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
            Self { r, g, b }
        }

        /// Unpack a `0xRRGGBB` value; bits above 24 are ignored
        pub const fn from_u32(packed: u32) -> Self {
            Self {
                r: ((packed >> 16) & 0xFF) as u8,
                g: ((packed >> 8) & 0xFF) as u8,
                b: (packed & 0xFF) as u8,
            }
        }

        /// Pack as `0xRRGGBB`
        pub const fn to_u32(self) -> u32 {
            ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
        }
    }

    impl fmt::Display for Color {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        }
    }

    /// Accepts `RRGGBB` with an optional leading `#`
    impl FromStr for Color {
        type Err = ParseColorError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let hex = s.strip_prefix('#').unwrap_or(s);
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ParseColorError(s.to_string()));
            }
            u32::from_str_radix(hex, 16)
                .map(Color::from_u32)
                .map_err(|_| ParseColorError(s.to_string()))
        }
    }

    /// Axis-aligned pixel rectangle; may extend past any surface
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Rect {
        pub x: i32,
        pub y: i32,
        pub width: i32,
        pub height: i32,
    }

    impl Rect {
        pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
            Self {
                x,
                y,
                width,
                height,
            }
        }

        pub const fn right(&self) -> i32 {
            self.x + self.width
        }

        pub const fn bottom(&self) -> i32 {
            self.y + self.height
        }

        pub const fn is_empty(&self) -> bool {
            self.width <= 0 || self.height <= 0
        }
    }

    /// Read-only view of one glyph bitmap
    ///
    /// Rows are `ceil(width / 8)` bytes, most significant bit first, 1 = ink.
    /// The view borrows the font's glyph buffer, so it cannot outlive it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Glyph<'a> {
        data: &'a [u8],
        width: u32,
        height: u32,
    }

    impl<'a> Glyph<'a> {
        /// Wrap a glyph bitmap; `None` if `data` is too short for the geometry
        pub fn new(data: &'a [u8], width: u32, height: u32) -> Option<Self> {
            let needed = (Self::row_bytes_for(width) as usize).checked_mul(height as usize)?;
            if data.len() < needed {
                return None;
            }
            Some(Self {
                data,
                width,
                height,
            })
        }

        /// Bytes per bitmap row for a glyph `width` pixels wide
        pub const fn row_bytes_for(width: u32) -> u32 {
            width.div_ceil(8)
        }

        pub fn width(&self) -> u32 {
            self.width
        }

        pub fn height(&self) -> u32 {
            self.height
        }

        pub fn row_bytes(&self) -> u32 {
            Self::row_bytes_for(self.width)
        }

        /// Raw bitmap bytes, including any stride padding past the last row
        pub fn data(&self) -> &'a [u8] {
            self.data
        }

        /// Packed bits of row `y`
        #[inline]
        pub fn row(&self, y: u32) -> &'a [u8] {
            let stride = self.row_bytes() as usize;
            let start = y as usize * stride;
            &self.data[start..start + stride]
        }

        /// Whether pixel `(x, y)` carries ink
        #[inline]
        pub fn is_set(&self, x: u32, y: u32) -> bool {
            if x >= self.width || y >= self.height {
                return false;
            }
            self.row(y)[(x / 8) as usize] & (0x80 >> (x % 8)) != 0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_packing() {
        let color = Color::from_u32(0x12_34_56);
        assert_eq!(color, Color::rgb(0x12, 0x34, 0x56));
        assert_eq!(color.to_u32(), 0x12_34_56);
        assert_eq!(Color::from_u32(0xFF_00_00_00), Color::BLACK);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("FFFF00".parse::<Color>(), Ok(Color::YELLOW));
        assert_eq!("#00ff00".parse::<Color>(), Ok(Color::GREEN));
        assert!("FFF".parse::<Color>().is_err());
        assert!("GGGGGG".parse::<Color>().is_err());
        assert!("+FFFFF".parse::<Color>().is_err());
        assert_eq!(Color::rgb(1, 2, 255).to_string(), "0102FF");
    }

    #[test]
    fn test_glyph_bits() {
        // 10 px wide: two bytes per row
        let data = [0b1000_0000, 0b0100_0000, 0b0000_0001, 0b0000_0000];
        let glyph = Glyph::new(&data, 10, 2).unwrap();
        assert_eq!(glyph.row_bytes(), 2);
        assert!(glyph.is_set(0, 0));
        assert!(glyph.is_set(9, 0));
        assert!(!glyph.is_set(8, 0));
        assert!(glyph.is_set(7, 1));
        assert!(!glyph.is_set(10, 0));
        assert!(!glyph.is_set(0, 2));
    }

    #[test]
    fn test_glyph_rejects_short_data() {
        assert!(Glyph::new(&[0u8; 15], 8, 16).is_none());
        assert!(Glyph::new(&[0u8; 16], 8, 16).is_some());
        // Stride padding past the last row is allowed
        assert!(Glyph::new(&[0u8; 32], 9, 16).is_some());
        assert!(Glyph::new(&[0u8; 31], 9, 16).is_none());
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(-6, 4, 106, 20);
        assert_eq!(rect.right(), 100);
        assert_eq!(rect.bottom(), 24);
        assert!(!rect.is_empty());
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }
}
