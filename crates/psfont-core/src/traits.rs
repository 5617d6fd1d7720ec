//! The contracts that bind the pipeline together
//!
//! - [`PixelSink`] - where rasterized glyphs land
//! - [`Exporter`] - where finished canvases become files

use crate::{error::Result, surface::Canvas, types::Color};

/// Anything that can receive pixels
///
/// The rasterizer never checks bounds. Implementations clip silently:
/// coordinates outside the surface are dropped, never an error. Only
/// [`plot_pixel`](PixelSink::plot_pixel) is required; rectangles and alpha
/// blending fall back to it.
///
/// ```
/// use psfont_core::{Color, PixelSink};
///
/// struct Recorder(Vec<(i32, i32)>);
///
/// impl PixelSink for Recorder {
///     fn plot_pixel(&mut self, x: i32, y: i32, _color: Color) {
///         self.0.push((x, y));
///     }
/// }
///
/// let mut sink = Recorder(Vec::new());
/// sink.fill_rect(0, 0, 2, 2, Color::WHITE);
/// assert_eq!(sink.0.len(), 4);
/// ```
pub trait PixelSink {
    /// Set one pixel
    fn plot_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Fill a `width x height` rectangle with its top-left corner at `(x, y)`
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        for py in y..y.saturating_add(height) {
            for px in x..x.saturating_add(width) {
                self.plot_pixel(px, py, color);
            }
        }
    }

    /// Draw a one-pixel outline just inside the rectangle bounds
    fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }
        // Edges past i32::MAX pin to it; the sink clips whatever lands there
        let right = x.saturating_add(width - 1);
        let bottom = y.saturating_add(height - 1);
        self.fill_rect(x, y, width, 1, color);
        if bottom > y {
            self.fill_rect(x, bottom, width, 1, color);
        }
        if height > 2 {
            self.fill_rect(x, y.saturating_add(1), 1, height - 2, color);
            if right > x {
                self.fill_rect(right, y.saturating_add(1), 1, height - 2, color);
            }
        }
    }

    /// Composite `color` with coverage `alpha` (0 = none, 255 = opaque)
    ///
    /// Sinks without an alpha channel threshold at half coverage.
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: u8) {
        if alpha >= 128 {
            self.plot_pixel(x, y, color);
        }
    }
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn plot_pixel(&mut self, x: i32, y: i32, color: Color) {
        (**self).plot_pixel(x, y, color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        (**self).fill_rect(x, y, width, height, color);
    }

    fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        (**self).stroke_rect(x, y, width, height, color);
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: u8) {
        (**self).blend_pixel(x, y, color, alpha);
    }
}

/// The final step: pixels become files
pub trait Exporter {
    /// Who are you?
    fn name(&self) -> &'static str;

    /// Encode the canvas as bytes
    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>>;

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    /// What MIME type identifies your format?
    fn mime_type(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct Recorder {
        pixels: HashSet<(i32, i32)>,
        plots: usize,
    }

    impl PixelSink for Recorder {
        fn plot_pixel(&mut self, x: i32, y: i32, _color: Color) {
            self.pixels.insert((x, y));
            self.plots += 1;
        }
    }

    #[test]
    fn test_stroke_rect_outline_only() {
        let mut sink = Recorder::default();
        sink.stroke_rect(0, 0, 4, 3, Color::WHITE);
        // 4 + 4 on top/bottom, 1 + 1 on the sides
        assert_eq!(sink.pixels.len(), 10);
        assert_eq!(sink.plots, 10);
        assert!(!sink.pixels.contains(&(1, 1)));
        assert!(sink.pixels.contains(&(3, 1)));
    }

    #[test]
    fn test_stroke_rect_degenerate() {
        let mut sink = Recorder::default();
        sink.stroke_rect(0, 0, 0, 3, Color::WHITE);
        assert!(sink.pixels.is_empty());

        sink.stroke_rect(5, 5, 3, 1, Color::WHITE);
        assert_eq!(sink.plots, 3);
    }

    #[test]
    fn test_stroke_rect_at_coordinate_limit() {
        let mut sink = Recorder::default();
        let x = i32::MAX - 2;
        sink.stroke_rect(x, i32::MAX - 1, 10, 4, Color::WHITE);
        assert!(sink.pixels.contains(&(x, i32::MAX - 1)));
        assert!(sink.pixels.contains(&(x + 1, i32::MAX - 1)));
        assert!(sink
            .pixels
            .iter()
            .all(|&(px, py)| px >= x && py >= i32::MAX - 1));
    }

    #[test]
    fn test_blend_threshold() {
        let mut sink = Recorder::default();
        sink.blend_pixel(0, 0, Color::WHITE, 127);
        sink.blend_pixel(1, 0, Color::WHITE, 128);
        assert_eq!(sink.pixels.len(), 1);
        assert!(sink.pixels.contains(&(1, 0)));
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn paint<S: PixelSink>(mut sink: S) {
            sink.fill_rect(0, 0, 3, 3, Color::WHITE);
        }

        let mut sink = Recorder::default();
        paint(&mut sink);
        assert_eq!(sink.plots, 9);
    }
}
