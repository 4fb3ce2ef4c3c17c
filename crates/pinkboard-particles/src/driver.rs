//! Per-frame animation driver: spawns along the curve, then updates and
//! draws the pool

use crate::curve::{HeartCurve, ParametricCurve};
use crate::pool::{ParticlePool, PoolStats};
use crate::rand::ParticleRng;
use crate::settings::ParticleSettings;
use crate::sprite_gen::render_sprite;
use pinkboard_core::{Result, Sprite, Surface, Vec2};
use pinkboard_runtime::AnimationSystem;

/// What a single frame did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: usize,
    pub evicted: usize,
    pub expired: usize,
    pub active: usize,
}

/// Owns one pool, its sprite, and the curve both are derived from.
///
/// The curve value is used both for spawn positions and to build the sprite,
/// so the particle cloud and the stamp always share one shape.
pub struct AnimationDriver<C: ParametricCurve = HeartCurve> {
    settings: ParticleSettings,
    curve: C,
    sprite: Sprite,
    pool: ParticlePool,
    rng: ParticleRng,
    last_frame: FrameReport,
}

impl AnimationDriver<HeartCurve> {
    /// A heart animation
    pub fn new(settings: ParticleSettings) -> Result<Self> {
        Self::with_curve(settings, HeartCurve)
    }
}

impl<C: ParametricCurve> AnimationDriver<C> {
    pub fn with_curve(settings: ParticleSettings, curve: C) -> Result<Self> {
        settings.validate()?;
        let pool = ParticlePool::from_settings(&settings)?;
        let sprite = render_sprite(&curve, settings.size, settings.color)?;
        let rng = ParticleRng::new(settings.seed);
        Ok(Self {
            settings,
            curve,
            sprite,
            pool,
            rng,
            last_frame: FrameReport::default(),
        })
    }

    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub fn last_frame(&self) -> FrameReport {
        self.last_frame
    }

    /// Whole particles due for a frame of `dt` seconds. The fractional
    /// remainder is dropped rather than carried into the next frame.
    pub fn spawn_count(&self, dt: f32) -> usize {
        let amount = self.settings.spawn_rate() * dt;
        if amount.is_finite() && amount > 0.0 {
            amount.floor() as usize
        } else {
            0
        }
    }

    /// Spawn one particle on the curve, moving radially outward.
    ///
    /// Curve space has y up and its origin at the surface center; surface
    /// space has y down.
    pub fn spawn_on_curve(&mut self, width: u32, height: u32) -> Result<bool> {
        let (lo, hi) = self.curve.domain();
        let t = self.rng.range(lo, hi);
        let pos = self.curve.point_at(t);
        let mut dir = pos;
        dir.scale_to_length(self.settings.velocity)?;

        let position = Vec2::new(width as f32 / 2.0 + pos.x, height as f32 / 2.0 - pos.y);
        let velocity = Vec2::new(dir.x, -dir.y);
        Ok(self.pool.spawn(position, velocity))
    }

    /// Run one frame: clear, spawn, update, draw
    pub fn step(&mut self, surface: &mut dyn Surface, dt: f32) -> Result<FrameReport> {
        surface.clear();
        let (width, height) = surface.size();

        let count = self.spawn_count(dt);
        // Only the last `capacity` spawns of a frame can survive it
        let overwritten = count.saturating_sub(self.pool.capacity());
        self.pool.record_overwritten(overwritten as u64);
        let mut evicted = overwritten;
        for _ in overwritten..count {
            if self.spawn_on_curve(width, height)? {
                evicted += 1;
            }
        }
        if evicted > 0 {
            log::debug!("[particles] pool saturated, evicted {evicted} oldest particle(s)");
        }

        let expired = self.pool.update(dt);
        self.pool.render(surface, &self.sprite);

        self.last_frame = FrameReport {
            spawned: count,
            evicted,
            expired,
            active: self.pool.active_count(),
        };
        log::trace!("[particles] {:?}", self.last_frame);
        Ok(self.last_frame)
    }

    /// Drop all live particles; the sprite and settings are kept
    pub fn reset(&mut self) {
        self.pool.clear();
        self.last_frame = FrameReport::default();
    }
}

impl<C: ParametricCurve> AnimationSystem for AnimationDriver<C> {
    fn initialize(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let (width, height) = surface.size();
        log::info!(
            "[particles] pool of {} particle(s), {:.1}/s over {:.2}s, {}px sprite on {}x{} surface",
            self.pool.capacity(),
            self.settings.spawn_rate(),
            self.settings.duration,
            self.sprite.width(),
            width,
            height
        );
        Ok(())
    }

    fn frame(&mut self, surface: &mut dyn Surface, dt: f32) -> Result<()> {
        self.step(surface, dt).map(|_| ())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.reset();
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
