//! Particle state, integration and the age-based draw rule

use pinkboard_core::{Sprite, StampRect, Surface, Vec2};

/// Default acceleration effect: decelerate against the spawn velocity
pub const DEFAULT_EFFECT: f32 = -0.75;

/// One particle slot.
///
/// Slots are allocated once by the pool and re-initialized in place; `age`
/// only grows between initializations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub age: f32,
}

impl Particle {
    /// Reset every field for a fresh particle.
    ///
    /// Acceleration is the spawn velocity scaled by `effect`; a negative
    /// effect slows the particle and curls it back as it ages.
    pub fn initialize(&mut self, position: Vec2, velocity: Vec2, effect: f32) {
        self.position = position;
        self.velocity = velocity;
        self.acceleration = velocity * effect;
        self.age = 0.0;
    }

    /// Advance by `dt` seconds: position from the current velocity, then
    /// velocity from acceleration. No clamping.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.velocity += self.acceleration * dt;
        self.age += dt;
    }

    /// Normalized age; 1.0 at `duration`
    pub fn age_ratio(&self, duration: f32) -> f32 {
        self.age / duration
    }

    pub fn is_expired(&self, duration: f32) -> bool {
        self.age >= duration
    }

    /// Stamp `sprite` centered on the particle: it grows with an ease-out
    /// curve and fades out linearly over `duration`.
    pub fn render(&self, surface: &mut dyn Surface, sprite: &Sprite, duration: f32) {
        let ratio = self.age_ratio(duration);
        let size = sprite.width() as f32 * ease_out_cubic(ratio);
        let alpha = 1.0 - ratio;
        surface.stamp(
            sprite,
            StampRect::centered(self.position.x, self.position.y, size),
            alpha,
        );
    }
}

/// Cubic ease-out: `(u - 1)^3 + 1`. Fast initial growth, settling at 1.
pub fn ease_out_cubic(u: f32) -> f32 {
    let u = u - 1.0;
    u * u * u + 1.0
}
