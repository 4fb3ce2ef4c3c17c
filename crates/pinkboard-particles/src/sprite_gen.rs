//! Rasterizes a curve outline into the particle sprite

use crate::curve::{ParametricCurve, DEFAULT_OUTLINE_STEP};
use image::{Rgba, RgbaImage};
use pinkboard_core::{Color, PinkboardError, Result, Sprite, Vec2};

/// Curve units that map onto the full sprite edge
const CURVE_EXTENT: f32 = 350.0;

/// Samples per pixel along each axis
const SUPERSAMPLE: usize = 4;

/// Trace `curve` into a polygon and fill it into a `size`×`size` sprite.
///
/// The curve origin lands on the sprite center and curve y (up) is flipped
/// to image y (down). Edges are antialiased by supersampling.
pub fn render_sprite(curve: &impl ParametricCurve, size: u32, color: Color) -> Result<Sprite> {
    if size == 0 {
        return Err(PinkboardError::ConfigurationError(
            "sprite size must be at least 1 pixel".to_string(),
        ));
    }

    let half = size as f32 / 2.0;
    let scale = size as f32 / CURVE_EXTENT;
    let polygon: Vec<Vec2> = curve
        .outline(DEFAULT_OUTLINE_STEP)
        .into_iter()
        .map(|p| Vec2::new(half + p.x * scale, half - p.y * scale))
        .collect();

    let coverage = fill_coverage(&polygon, size as usize);
    let [r, g, b, a] = color.to_rgba8();
    let full = (SUPERSAMPLE * SUPERSAMPLE) as f32;

    let mut image = RgbaImage::new(size, size);
    for (i, hits) in coverage.into_iter().enumerate() {
        if hits == 0 {
            continue;
        }
        let alpha = (a as f32 * hits as f32 / full).round() as u8;
        let x = (i % size as usize) as u32;
        let y = (i / size as usize) as u32;
        image.put_pixel(x, y, Rgba([r, g, b, alpha]));
    }

    Ok(Sprite::from_image(image))
}

/// Even-odd scanline fill. Returns, per pixel, how many of its
/// `SUPERSAMPLE²` sample points fall inside the polygon.
fn fill_coverage(polygon: &[Vec2], size: usize) -> Vec<u32> {
    let mut coverage = vec![0u32; size * size];
    if polygon.len() < 3 {
        return coverage;
    }

    let ss = SUPERSAMPLE as f32;
    let columns = size * SUPERSAMPLE;
    let mut crossings: Vec<f32> = Vec::with_capacity(16);

    for sample_row in 0..size * SUPERSAMPLE {
        let y = (sample_row as f32 + 0.5) / ss;
        crossings.clear();

        for (i, a) in polygon.iter().enumerate() {
            let b = polygon[(i + 1) % polygon.len()];
            if (a.y <= y) != (b.y <= y) {
                crossings.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        crossings.sort_by(f32::total_cmp);

        let row = (sample_row / SUPERSAMPLE) * size;
        for span in crossings.chunks_exact(2) {
            // Sample column sx is inside when its center (sx + 0.5) / ss is in [x0, x1)
            let start = (span[0] * ss - 0.5).ceil().max(0.0) as usize;
            let end = ((span[1] * ss - 0.5).ceil().max(0.0) as usize).min(columns);
            for sx in start..end {
                coverage[row + sx / SUPERSAMPLE] += 1;
            }
        }
    }

    coverage
}
