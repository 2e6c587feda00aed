//! Point sprite textures.
//!
//! A point material may use an alpha map: an image whose green channel
//! becomes each point's alpha, sampled across the point quad. When no map is
//! configured, or the file cannot be read, a 1x1 white texture is bound and
//! the shader draws a soft disc instead.
//!
//! # Supported Formats
//!
//! - PNG (recommended)
//! - JPEG

use crate::error::TextureError;
use std::path::Path;

/// RGBA8 pixels ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    /// Load an image file as RGBA8.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        let img = image::load_from_memory(&bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// A 1x1 texture of one color.
    pub fn solid(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            data: vec![r, g, b, a],
            width: 1,
            height: 1,
        }
    }
}

/// Load the alpha map at `path`, logging and returning `None` on failure.
pub fn load_alpha_map(path: Option<&Path>) -> Option<TextureData> {
    let path = path?;
    match TextureData::from_file(path) {
        Ok(tex) => {
            tracing::info!(path = %path.display(), width = tex.width, height = tex.height, "loaded alpha map");
            Some(tex)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "alpha map unavailable, using soft disc");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid() {
        let t = TextureData::solid(255, 255, 255, 255);
        assert_eq!((t.width, t.height), (1, 1));
        assert_eq!(t.data, vec![255; 4]);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let missing = Path::new("definitely/not/here.png");
        assert!(matches!(
            TextureData::from_file(missing),
            Err(TextureError::Io(_))
        ));
        assert!(load_alpha_map(Some(missing)).is_none());
        assert!(load_alpha_map(None).is_none());
    }
}
