//! Exported files decode back to the canvas they came from

use psfont_core::{Canvas, Color, Exporter, PixelSink};
use psfont_export::{exporter_for, PngExporter};

fn sample_canvas() -> Canvas {
    let mut canvas = Canvas::filled(5, 3, Color::BLUE);
    canvas.fill_rect(1, 1, 3, 1, Color::YELLOW);
    canvas.blend_pixel(0, 0, Color::WHITE, 128);
    canvas
}

#[test]
fn test_png_pixels_survive() {
    let canvas = sample_canvas();
    let png = PngExporter::new().export(&canvas).unwrap();

    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (5, 3));
    assert_eq!(decoded.as_raw(), canvas.data());
}

#[test]
fn test_ppm_payload_is_canvas() {
    let canvas = sample_canvas();
    let ppm = exporter_for("ppm").unwrap().export(&canvas).unwrap();
    let header = b"P6\n5 3\n255\n";
    assert_eq!(&ppm[..header.len()], header);
    assert_eq!(&ppm[header.len()..], canvas.data());
}
