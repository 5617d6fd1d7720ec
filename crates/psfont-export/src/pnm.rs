//! Binary PPM export
//!
//! `P6`, maxval 255: the canvas bytes go out as they are.

use std::io::Write;

use psfont_core::{error::Result, traits::Exporter, Canvas};

/// PPM (Portable Pixmap) exporter, binary flavor
#[derive(Debug, Clone, Copy, Default)]
pub struct PnmExporter;

impl PnmExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PnmExporter {
    fn name(&self) -> &'static str {
        "ppm"
    }

    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(canvas.data().len() + 16);
        writeln!(&mut output, "P6")?;
        writeln!(&mut output, "{} {}", canvas.width(), canvas.height())?;
        writeln!(&mut output, "255")?;
        output.extend_from_slice(canvas.data());
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "ppm"
    }

    fn mime_type(&self) -> &'static str {
        "image/x-portable-pixmap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psfont_core::{Color, PixelSink};

    #[test]
    fn test_ppm_layout() {
        let mut canvas = Canvas::new(2, 1);
        canvas.plot_pixel(1, 0, Color::rgb(1, 2, 3));
        let ppm = PnmExporter::new().export(&canvas).unwrap();
        assert_eq!(ppm, b"P6\n2 1\n255\n\0\0\0\x01\x02\x03");
    }

    #[test]
    fn test_ppm_empty_canvas() {
        let ppm = PnmExporter::new().export(&Canvas::new(0, 0)).unwrap();
        assert_eq!(ppm, b"P6\n0 0\n255\n");
    }
}
