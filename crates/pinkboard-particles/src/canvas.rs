//! Raster surface backed by an RGBA image

use image::{Rgba, RgbaImage};
use pinkboard_core::{Color, Result, Sprite, StampRect, Surface};
use std::path::Path;

/// An in-memory canvas that particles can be stamped onto.
///
/// Stamps are scaled with nearest-neighbour sampling and composited with
/// source-over blending, so overlapping faded sprites layer in draw order.
pub struct Canvas {
    image: RgbaImage,
    background: Color,
}

impl Canvas {
    /// A transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::TRANSPARENT)
    }

    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        let mut canvas = Self {
            image: RgbaImage::new(width, height),
            background,
        };
        canvas.clear();
        canvas
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Reallocate at a new size; like resizing a browser canvas, this also
    /// clears it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
        self.clear();
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self) {
        let fill = Rgba(self.background.to_rgba8());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    fn stamp(&mut self, sprite: &Sprite, rect: StampRect, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 || !(rect.size > 0.0) || sprite.width() == 0 || sprite.height() == 0 {
            return;
        }

        let (width, height) = self.image.dimensions();
        // Destination pixels whose centers fall inside the rect
        let first = |edge: f32| (edge - 0.5).ceil();
        let x0 = first(rect.x).max(0.0);
        let y0 = first(rect.y).max(0.0);
        let x1 = first(rect.x + rect.size).min(width as f32);
        let y1 = first(rect.y + rect.size).min(height as f32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let src = sprite.image();
        let sx_scale = src.width() as f32 / rect.size;
        let sy_scale = src.height() as f32 / rect.size;

        for y in y0 as u32..y1 as u32 {
            let sy = (((y as f32 + 0.5 - rect.y) * sy_scale) as u32).min(src.height() - 1);
            for x in x0 as u32..x1 as u32 {
                let sx = (((x as f32 + 0.5 - rect.x) * sx_scale) as u32).min(src.width() - 1);
                let source = src.get_pixel(sx, sy).0;
                if source[3] == 0 {
                    continue;
                }
                let dest = self.image.get_pixel_mut(x, y);
                dest.0 = blend_over(source, dest.0, alpha);
            }
        }
    }
}

/// Source-over composite of non-premultiplied RGBA8 pixels with an extra
/// global alpha applied to the source.
fn blend_over(src: [u8; 4], dst: [u8; 4], global_alpha: f32) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0 * global_alpha;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let channel = |s: u8, d: u8| {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_sprite(size: u32, rgba: [u8; 4]) -> Sprite {
        Sprite::from_image(RgbaImage::from_pixel(size, size, Rgba(rgba)))
    }

    #[test]
    fn clear_fills_background() {
        let mut canvas = Canvas::with_background(4, 3, Color::BLACK);
        assert_eq!(canvas.size(), (4, 3));
        assert_eq!(canvas.pixel(3, 2), [0, 0, 0, 255]);

        canvas.set_background(Color::WHITE);
        canvas.clear();
        assert_eq!(canvas.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn opaque_stamp_covers_rect_only() {
        let mut canvas = Canvas::with_background(10, 10, Color::BLACK);
        let sprite = solid_sprite(2, [200, 100, 50, 255]);
        canvas.stamp(&sprite, StampRect::centered(5.0, 5.0, 4.0), 1.0);

        assert_eq!(canvas.pixel(3, 3), [200, 100, 50, 255]);
        assert_eq!(canvas.pixel(6, 6), [200, 100, 50, 255]);
        assert_eq!(canvas.pixel(2, 2), [0, 0, 0, 255]);
        assert_eq!(canvas.pixel(7, 7), [0, 0, 0, 255]);
    }

    #[test]
    fn global_alpha_blends_over_background() {
        let mut canvas = Canvas::with_background(4, 4, Color::BLACK);
        let sprite = solid_sprite(4, [255, 255, 255, 255]);
        canvas.stamp(&sprite, StampRect::centered(2.0, 2.0, 4.0), 0.5);
        let [r, g, b, a] = canvas.pixel(1, 1);
        assert!((r as i32 - 128).abs() <= 1);
        assert_eq!((r, g, b), (r, r, r));
        assert_eq!(a, 255);
    }

    #[test]
    fn stamp_onto_transparent_keeps_source_colour() {
        let mut canvas = Canvas::new(4, 4);
        let sprite = solid_sprite(1, [234, 128, 176, 255]);
        canvas.stamp(&sprite, StampRect::centered(2.0, 2.0, 4.0), 0.25);
        let [r, g, b, a] = canvas.pixel(2, 2);
        assert_eq!((r, g, b), (234, 128, 176));
        assert!((a as i32 - 64).abs() <= 1);
    }

    #[test]
    fn offscreen_and_degenerate_stamps_are_ignored() {
        let mut canvas = Canvas::with_background(8, 8, Color::BLACK);
        let sprite = solid_sprite(2, [255, 0, 0, 255]);
        canvas.stamp(&sprite, StampRect::centered(-50.0, -50.0, 4.0), 1.0);
        canvas.stamp(&sprite, StampRect::centered(100.0, 4.0, 4.0), 1.0);
        canvas.stamp(&sprite, StampRect::centered(4.0, 4.0, 0.0), 1.0);
        canvas.stamp(&sprite, StampRect::centered(4.0, 4.0, 4.0), 0.0);
        canvas.stamp(&sprite, StampRect::centered(4.0, 4.0, 4.0), -3.0);
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn partially_offscreen_stamp_is_clipped() {
        let mut canvas = Canvas::with_background(4, 4, Color::BLACK);
        let sprite = solid_sprite(2, [0, 255, 0, 255]);
        canvas.stamp(&sprite, StampRect::centered(0.0, 0.0, 4.0), 1.0);
        assert_eq!(canvas.pixel(0, 0), [0, 255, 0, 255]);
        assert_eq!(canvas.pixel(1, 1), [0, 255, 0, 255]);
        assert_eq!(canvas.pixel(2, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut canvas = Canvas::with_background(2, 2, Color::BLACK);
        canvas.resize(5, 3);
        assert_eq!(canvas.size(), (5, 3));
        assert_eq!(canvas.pixel(4, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn save_png_round_trips_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        Canvas::new(7, 5).save_png(&path).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (7, 5));
    }
}
