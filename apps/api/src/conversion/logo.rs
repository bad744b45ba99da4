use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::ImageFormat;
use tracing::info;

use crate::conversion::models::ConversionError;

/// Company logo, decoded once and re-encoded as PNG for embedding.
#[derive(Debug, Clone)]
pub struct LogoImage {
    png: Vec<u8>,
    width_px: u32,
    height_px: u32,
}

impl LogoImage {
    /// Decodes any supported raster format (PNG, JPEG) into a PNG logo.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConversionError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| ConversionError::InvalidLogo(e.to_string()))?;

        let mut png = Vec::new();
        decoded
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| ConversionError::InvalidLogo(e.to_string()))?;

        Ok(Self {
            png,
            width_px: decoded.width(),
            height_px: decoded.height(),
        })
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }
}

/// Reads the logo asset at startup. A missing or unreadable file is a
/// configuration error and aborts the service.
pub fn load_logo(path: &Path) -> Result<LogoImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Logo file '{}' not found or unreadable", path.display()))?;
    let logo = LogoImage::from_bytes(&bytes)
        .with_context(|| format!("Logo file '{}' is not a valid image", path.display()))?;

    let (w, h) = logo.dimensions();
    info!("Loaded logo {} ({w}x{h}px)", path.display());
    Ok(logo)
}


#[cfg(test)]
mod tests {
    use super::fixtures::logo_bytes;
    use super::*;

    #[test]
    fn test_png_logo_decodes() {
        let logo = LogoImage::from_bytes(&logo_bytes(ImageFormat::Png)).unwrap();
        assert_eq!(logo.dimensions(), (40, 8));
        assert!(logo.png().starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_jpeg_logo_is_reencoded_as_png() {
        let logo = LogoImage::from_bytes(&logo_bytes(ImageFormat::Jpeg)).unwrap();
        assert_eq!(logo.dimensions(), (40, 8));
        assert!(logo.png().starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_invalid_logo_is_rejected() {
        let err = LogoImage::from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidLogo(_)));
    }

    #[test]
    fn test_load_logo_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &logo_bytes(ImageFormat::Png)).unwrap();
        let logo = load_logo(file.path()).unwrap();
        assert_eq!(logo.dimensions(), (40, 8));
    }

    #[test]
    fn test_load_logo_missing_file() {
        let err = load_logo(Path::new("/nonexistent/logo.png")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
