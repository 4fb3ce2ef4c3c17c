//! Sprite images stamped by particle rendering

use crate::error::Result;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// An opaque, square RGBA stamp image.
///
/// Built once at startup and only ever borrowed by renderers.
#[derive(Clone, Debug)]
pub struct Sprite {
    image: RgbaImage,
}

impl Sprite {
    /// Wrap an existing image
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// A fully transparent square sprite
    pub fn blank(size: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0])),
        }
    }

    /// Width in pixels; the base size particles scale from
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Write the sprite as a PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}
