//! The drawable-surface contract consumed by particle rendering

use crate::sprite::Sprite;

/// Axis-aligned destination rectangle for a sprite stamp, in surface pixels.
/// `x`/`y` is the top-left corner; stamps are always square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StampRect {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl StampRect {
    /// A square of `size` centered on (`cx`, `cy`)
    pub fn centered(cx: f32, cy: f32, size: f32) -> Self {
        Self {
            x: cx - size / 2.0,
            y: cy - size / 2.0,
            size,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }
}

/// Something particles can be drawn onto.
///
/// The surface size is owned by whoever created the surface (a window, a
/// resize handler, a CLI flag); renderers only read it.
pub trait Surface {
    /// Current size in pixels as (width, height)
    fn size(&self) -> (u32, u32);

    /// Clear the full frame area
    fn clear(&mut self);

    /// Draw `sprite` scaled into `rect` with the given global alpha
    fn stamp(&mut self, sprite: &Sprite, rect: StampRect, alpha: f32);
}
