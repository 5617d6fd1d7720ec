//! Export module for Psfont
//!
//! Turns a finished [`Canvas`](psfont_core::Canvas) into file bytes.

pub mod png;
pub mod pnm;

pub use png::PngExporter;
pub use pnm::PnmExporter;

use psfont_core::{error::ExportError, traits::Exporter, Result};

/// Exporter for a format name or file extension (`png`, `ppm`, `pnm`)
pub fn exporter_for(format: &str) -> Result<Box<dyn Exporter>> {
    match format.to_ascii_lowercase().as_str() {
        "png" => Ok(Box::new(PngExporter::new())),
        "ppm" | "pnm" => Ok(Box::new(PnmExporter::new())),
        other => Err(ExportError::FormatNotSupported(other.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exporter_for() {
        assert_eq!(exporter_for("PNG").unwrap().extension(), "png");
        assert_eq!(exporter_for("pnm").unwrap().name(), "ppm");
        assert!(exporter_for("svg").is_err());
    }
}
