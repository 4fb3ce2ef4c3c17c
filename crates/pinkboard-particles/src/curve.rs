//! Parametric curves used for spawn positions and sprite outlines

use pinkboard_core::Vec2;
use std::f32::consts::PI;

/// Parameter step used when tracing a curve into a polygon
pub const DEFAULT_OUTLINE_STEP: f32 = 0.01;

/// A closed curve traced by a single parameter.
///
/// The same curve value feeds both the spawn sampler and the sprite builder,
/// which keeps the particle cloud and the particle stamp the same shape.
pub trait ParametricCurve {
    /// Point on the curve at parameter `t`
    fn point_at(&self, t: f32) -> Vec2;

    /// Parameter range traced by the curve
    fn domain(&self) -> (f32, f32) {
        (-PI, PI)
    }

    /// Walk the domain in steps of `step`, returning the polygon outline.
    ///
    /// Starts exactly at the low end and keeps stepping while `t` is below the
    /// high end, so the last vertex lands on or just past it.
    fn outline(&self, step: f32) -> Vec<Vec2> {
        let step = if step > 0.0 && step.is_finite() {
            step
        } else {
            DEFAULT_OUTLINE_STEP
        };
        let (lo, hi) = self.domain();
        let mut points = Vec::with_capacity(((hi - lo) / step).ceil() as usize + 2);
        let mut t = lo;
        points.push(self.point_at(t));
        while t < hi {
            t += step;
            points.push(self.point_at(t));
        }
        points
    }
}

/// The heart outline, roughly 320 wide and 230 tall, centered near the origin
/// with y pointing up.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeartCurve;

impl ParametricCurve for HeartCurve {
    fn point_at(&self, t: f32) -> Vec2 {
        point_on_heart(t)
    }
}

/// Point on the heart for `-π <= t <= π`
pub fn point_on_heart(t: f32) -> Vec2 {
    Vec2::new(
        160.0 * t.sin().powi(3),
        130.0 * t.cos() - 50.0 * (2.0 * t).cos() - 20.0 * (3.0 * t).cos() - 10.0 * (4.0 * t).cos()
            + 25.0,
    )
}
