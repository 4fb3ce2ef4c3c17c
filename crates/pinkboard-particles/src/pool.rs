//! Circular-buffer particle pool

use crate::particle::Particle;
use crate::ring::{self, RingBuffer};
use crate::settings::ParticleSettings;
use pinkboard_core::{PinkboardError, Result, Sprite, Surface, Vec2};
use serde::Serialize;

/// Lifetime counters for one pool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Particles written into a slot
    pub spawned: u64,
    /// Live particles overwritten because the pool was full
    pub evicted: u64,
    /// Particles retired after reaching the configured duration
    pub expired: u64,
}

/// Fixed-capacity pool of particles stored in ring order.
///
/// Particles are spawned at the back and expire from the front. Because every
/// particle ages by the same `dt` and newer ones are always younger, the
/// oldest particle is always the front one, so expiry only ever has to look
/// at the front.
pub struct ParticlePool {
    ring: RingBuffer<Particle>,
    duration: f32,
    effect: f32,
    stats: PoolStats,
}

impl ParticlePool {
    /// Allocate `capacity` particle slots.
    ///
    /// Fails with `ConfigurationError` for a zero capacity or a non-positive
    /// (or non-finite) duration.
    pub fn new(capacity: usize, duration: f32, effect: f32) -> Result<Self> {
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(PinkboardError::ConfigurationError(format!(
                "particle duration must be a positive number of seconds, got {duration}"
            )));
        }
        if !effect.is_finite() {
            return Err(PinkboardError::ConfigurationError(format!(
                "acceleration effect must be finite, got {effect}"
            )));
        }
        let ring = RingBuffer::new(capacity, Particle::default).map_err(|_| {
            PinkboardError::ConfigurationError("particle count must be at least 1".to_string())
        })?;
        Ok(Self {
            ring,
            duration,
            effect,
            stats: PoolStats::default(),
        })
    }

    pub fn from_settings(settings: &ParticleSettings) -> Result<Self> {
        Self::new(settings.length, settings.duration, settings.effect)
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn active_count(&self) -> usize {
        self.ring.len()
    }

    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn effect(&self) -> f32 {
        self.effect
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Slot index of the oldest active particle
    pub fn first_active(&self) -> usize {
        self.ring.first_active()
    }

    /// Slot index the next spawn will write into
    pub fn first_free(&self) -> usize {
        self.ring.first_free()
    }

    /// Active particles, oldest first
    pub fn iter(&self) -> ring::Iter<'_, Particle> {
        self.ring.iter()
    }

    /// Start a particle in the next free slot.
    ///
    /// A saturated pool overwrites its oldest particle instead of growing or
    /// refusing, so under sustained over-spawn it keeps the newest
    /// `capacity` particles. Returns `true` when a live particle was evicted.
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2) -> bool {
        let effect = self.effect;
        let evicted = self
            .ring
            .push_with(|p| p.initialize(position, velocity, effect));
        self.stats.spawned = self.stats.spawned.saturating_add(1);
        if evicted {
            self.stats.evicted = self.stats.evicted.saturating_add(1);
        }
        evicted
    }

    /// Count `count` spawns that would be overwritten by later spawns in the
    /// same frame, without writing them into a slot.
    pub fn record_overwritten(&mut self, count: u64) {
        self.stats.spawned = self.stats.spawned.saturating_add(count);
        self.stats.evicted = self.stats.evicted.saturating_add(count);
    }

    /// Integrate every active particle by `dt`, then retire particles from
    /// the front whose age reached the duration. Returns how many expired.
    pub fn update(&mut self, dt: f32) -> usize {
        for particle in self.ring.iter_mut() {
            particle.integrate(dt);
        }

        let duration = self.duration;
        let expired = self.ring.pop_front_while(|p| p.is_expired(duration));
        self.stats.expired = self.stats.expired.saturating_add(expired as u64);
        expired
    }

    /// Draw every active particle in ring order, oldest (most faded) first
    pub fn render(&self, surface: &mut dyn Surface, sprite: &Sprite) {
        for particle in self.ring.iter() {
            particle.render(surface, sprite, self.duration);
        }
    }

    /// Drop every active particle; slots stay allocated
    pub fn clear(&mut self) {
        self.ring.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::DEFAULT_EFFECT;
    use pinkboard_core::DrawRecorder;

    fn pool(capacity: usize, duration: f32) -> ParticlePool {
        ParticlePool::new(capacity, duration, DEFAULT_EFFECT).unwrap()
    }

    /// Spawn a particle whose x coordinate tags it for later identification
    fn spawn_tagged(pool: &mut ParticlePool, tag: f32) -> bool {
        pool.spawn(Vec2::new(tag, 0.0), Vec2::ZERO)
    }

    fn tags(pool: &ParticlePool) -> Vec<f32> {
        pool.iter().map(|p| p.position.x).collect()
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        assert!(matches!(
            ParticlePool::new(0, 2.0, DEFAULT_EFFECT),
            Err(PinkboardError::ConfigurationError(_))
        ));
        assert!(matches!(
            ParticlePool::new(10, 0.0, DEFAULT_EFFECT),
            Err(PinkboardError::ConfigurationError(_))
        ));
        assert!(ParticlePool::new(10, -1.0, DEFAULT_EFFECT).is_err());
        assert!(ParticlePool::new(10, f32::NAN, DEFAULT_EFFECT).is_err());
        assert!(ParticlePool::new(10, 2.0, f32::INFINITY).is_err());
    }

    #[test]
    fn overspawn_keeps_newest_capacity_particles() {
        let capacity = 5;
        for k in 1..=7usize {
            let mut p = pool(capacity, 10.0);
            for i in 0..capacity + k {
                spawn_tagged(&mut p, i as f32);
            }
            assert_eq!(p.active_count(), capacity);
            assert!(p.is_full());
            // The (k+1)-th spawn (index k) is the oldest survivor
            assert_eq!(p.first_active(), k % capacity);
            assert_eq!(tags(&p)[0], k as f32);
            assert_eq!(p.stats().evicted, k as u64);
        }
    }

    #[test]
    fn expiry_frees_slot_for_clean_reuse() {
        let mut p = pool(2, 1.0);
        p.spawn(Vec2::new(1.0, 1.0), Vec2::new(50.0, 0.0));
        p.update(0.5);
        p.spawn(Vec2::new(2.0, 2.0), Vec2::new(0.0, 80.0));
        assert_eq!(p.active_count(), 2);

        let expired = p.update(0.6);
        assert_eq!(expired, 1);
        assert_eq!(p.active_count(), 1);

        // The recycled slot must not inherit anything from the expired one
        p.spawn(Vec2::new(3.0, 3.0), Vec2::new(-10.0, 0.0));
        let newest = p.iter().last().unwrap();
        assert_eq!(newest.position, Vec2::new(3.0, 3.0));
        assert_eq!(newest.velocity, Vec2::new(-10.0, 0.0));
        assert_eq!(newest.acceleration, Vec2::new(7.5, 0.0));
        assert_eq!(newest.age, 0.0);
    }

    #[test]
    fn update_zero_is_idempotent() {
        let mut p = pool(4, 2.0);
        p.spawn(Vec2::new(1.0, 2.0), Vec2::new(30.0, 40.0));
        p.update(0.3);
        p.spawn(Vec2::new(5.0, 6.0), Vec2::new(-30.0, 10.0));
        let before: Vec<Particle> = p.iter().cloned().collect();

        for _ in 0..10 {
            assert_eq!(p.update(0.0), 0);
        }
        let after: Vec<Particle> = p.iter().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(p.stats().expired, 0);
    }

    #[test]
    fn end_to_end_capacity_three() {
        let mut p = pool(3, 10.0);
        spawn_tagged(&mut p, 1.0); // A
        spawn_tagged(&mut p, 2.0); // B
        spawn_tagged(&mut p, 3.0); // C
        assert!(p.is_full());
        assert_eq!((p.first_active(), p.first_free()), (0, 0));

        assert!(spawn_tagged(&mut p, 4.0)); // D evicts A
        assert_eq!(tags(&p), vec![2.0, 3.0, 4.0]);
        assert_eq!((p.first_active(), p.first_free()), (1, 1));

        assert_eq!(p.update(5.0), 0);
        assert!(p.iter().all(|q| (q.age - 5.0).abs() < 1e-6));
        assert_eq!(p.active_count(), 3);

        assert_eq!(p.update(6.0), 3);
        assert!(p.is_empty());
        assert_eq!(p.first_active(), p.first_free());
    }

    #[test]
    fn render_across_wrap_boundary_is_oldest_first() {
        let mut p = pool(5, 1.0);
        for i in 0..4 {
            spawn_tagged(&mut p, i as f32);
        }
        p.update(1.0);
        assert!(p.is_empty());

        spawn_tagged(&mut p, 40.0); // slot 4
        spawn_tagged(&mut p, 50.0); // slot 0
        assert_eq!((p.first_active(), p.first_free()), (4, 1));

        let sprite = Sprite::blank(10);
        let mut surface = DrawRecorder::new(100, 100);
        p.render(&mut surface, &sprite);

        let centers: Vec<f32> = surface
            .stamps_since_clear()
            .iter()
            .map(|(rect, _)| rect.center().0)
            .collect();
        assert_eq!(centers, vec![40.0, 50.0]);
    }

    #[test]
    fn expiry_stops_at_first_live_particle() {
        let mut p = pool(4, 1.0);
        spawn_tagged(&mut p, 1.0);
        p.update(0.6);
        spawn_tagged(&mut p, 2.0);
        p.update(0.6);
        // First particle is at 1.2, second at 0.6
        assert_eq!(tags(&p), vec![2.0]);
        assert_eq!(p.stats().expired, 1);
    }

    #[test]
    fn clear_empties_pool() {
        let mut p = pool(3, 1.0);
        spawn_tagged(&mut p, 1.0);
        spawn_tagged(&mut p, 2.0);
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.iter().count(), 0);
    }
}
