//! Decoded base-image cache.
//!
//! The hosting application resolves and fetches the image bytes; this
//! module only decodes them once and hands the RGBA buffer to the backend.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use thiserror::Error;

/// Base image errors.
#[derive(Debug, Error)]
pub enum BaseImageError {
    #[error("Failed to decode image: {0}")]
    Decode(String),
}

/// A decoded RGBA8 base image.
#[derive(Debug, Clone)]
pub struct BaseImage {
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl BaseImage {
    /// Decode encoded image bytes (PNG, JPEG or WebP).
    pub fn decode(bytes: &[u8]) -> Result<Self, BaseImageError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| BaseImageError::Decode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            rgba_data: rgba.into_raw(),
            width,
            height,
        })
    }
}

/// Cache of decoded images keyed by an opaque source reference, so an image
/// is decoded once rather than every frame.
#[derive(Debug, Default)]
pub struct BaseImageCache {
    images: HashMap<String, BaseImage>,
}

impl BaseImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached image for `source`, decoding `bytes` on first
    /// sight of the key.
    pub fn get_or_decode(
        &mut self,
        source: &str,
        bytes: &[u8],
    ) -> Result<&BaseImage, BaseImageError> {
        match self.images.entry(source.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(BaseImage::decode(bytes)?)),
        }
    }

    pub fn get(&self, source: &str) -> Option<&BaseImage> {
        self.images.get(source)
    }

    pub fn remove(&mut self, source: &str) -> Option<BaseImage> {
        self.images.remove(source)
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 red pixel, PNG-encoded in memory.
    fn red_dot_png() -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        let pixel = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255]));
        image::DynamicImage::ImageRgba8(pixel)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let image = BaseImage::decode(&red_dot_png()).unwrap();
        assert_eq!(image.width, 1);
        assert_eq!(image.height, 1);
        assert_eq!(image.rgba_data, vec![255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(BaseImage::decode(&[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_cache_decodes_once() {
        let mut cache = BaseImageCache::new();
        assert!(cache.get("a").is_none());

        cache.get_or_decode("a", &red_dot_png()).unwrap();
        assert!(cache.get("a").is_some());

        // Stale bytes for a cached key are ignored.
        let image = cache.get_or_decode("a", &[]).unwrap();
        assert_eq!(image.width, 1);

        cache.remove("a");
        assert!(cache.get("a").is_none());
    }
}
