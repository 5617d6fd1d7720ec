//! PNG export format
//!
//! Encodes a canvas with the `image` crate's PNG encoder.

use image::{ImageEncoder, RgbImage};
use psfont_core::{
    error::{ExportError, Result},
    traits::Exporter,
    Canvas,
};

/// Encode a canvas as an 8-bit RGB PNG
pub fn encode_canvas_to_png(canvas: &Canvas) -> Result<Vec<u8>> {
    if canvas.width() == 0 || canvas.height() == 0 {
        return Err(ExportError::EncodingFailed(format!(
            "cannot encode an empty {}x{} canvas",
            canvas.width(),
            canvas.height()
        ))
        .into());
    }

    let img = RgbImage::from_raw(canvas.width(), canvas.height(), canvas.data().to_vec())
        .ok_or_else(|| {
            ExportError::EncodingFailed("Failed to create image buffer from canvas data".into())
        })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(img.as_raw(), canvas.width(), canvas.height(), image::ExtendedColorType::Rgb8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    log::debug!(
        "Encoded {}x{} canvas as PNG ({} bytes)",
        canvas.width(),
        canvas.height(),
        png_data.len()
    );
    Ok(png_data)
}

/// PNG exporter for finished canvases
///
/// # Examples
///
/// ```
/// use psfont_core::{Canvas, Exporter};
/// use psfont_export::PngExporter;
///
/// let png = PngExporter::new().export(&Canvas::new(4, 4)).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>> {
        encode_canvas_to_png(canvas)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}
