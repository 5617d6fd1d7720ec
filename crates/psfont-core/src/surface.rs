// this_file: crates/psfont-core/src/surface.rs

//! In-memory render surface.

use crate::{traits::PixelSink, types::Color};

/// Owned RGB8 framebuffer that clips everything drawn outside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a black canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    /// Create a canvas cleared to `color`
    ///
    /// Aborts like any other allocation when the buffer can't be had; use
    /// [`try_filled`](Self::try_filled) for sizes that come from outside.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels.saturating_mul(3));
        Self::paint(&mut data, pixels, color);
        Self {
            width,
            height,
            data,
        }
    }

    /// [`filled`](Self::filled), or `None` when the buffer size overflows
    /// `usize` or the allocation fails
    pub fn try_filled(width: u32, height: u32, color: Color) -> Option<Self> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        let mut data = Vec::new();
        data.try_reserve_exact(pixels.checked_mul(3)?).ok()?;
        Self::paint(&mut data, pixels, color);
        Some(Self {
            width,
            height,
            data,
        })
    }

    fn paint(data: &mut Vec<u8>, pixels: usize, color: Color) {
        for _ in 0..pixels {
            data.extend_from_slice(&[color.r, color.g, color.b]);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB bytes, three per pixel
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Color at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let idx = self.index(x, y)?;
        Some(Color::rgb(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
        ))
    }

    /// Paint every pixel with `color`
    pub fn clear(&mut self, color: Color) {
        for px in self.data.chunks_exact_mut(3) {
            px.copy_from_slice(&[color.r, color.g, color.b]);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 3)
    }
}

impl PixelSink for Canvas {
    #[inline]
    fn plot_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx..idx + 3].copy_from_slice(&[color.r, color.g, color.b]);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        // Clip once, then write whole row spans
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + width as i64).min(self.width as i64);
        let y1 = (y as i64 + height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let stride = self.width as usize * 3;
        for row in y0 as usize..y1 as usize {
            let start = row * stride + x0 as usize * 3;
            let end = row * stride + x1 as usize * 3;
            for px in self.data[start..end].chunks_exact_mut(3) {
                px.copy_from_slice(&[color.r, color.g, color.b]);
            }
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: u8) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let a = alpha as u32;
        let mix = |src: u8, dst: u8| ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8;
        self.data[idx] = mix(color.r, self.data[idx]);
        self.data[idx + 1] = mix(color.g, self.data[idx + 1]);
        self.data[idx + 2] = mix(color.b, self.data[idx + 2]);
    }
}
