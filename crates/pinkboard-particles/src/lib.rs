//! Pinkboard Particles - Ring-buffer particle engine
//!
//! Provides the heart animation's simulation core:
//! - `HeartCurve` - the parametric outline used for spawning and for the sprite
//! - `Particle` - explicit Euler integration with an ease-out/fade draw rule
//! - `RingBuffer` / `ParticlePool` - fixed-capacity circular pool that never
//!   allocates after construction and evicts its oldest particle when full
//! - `AnimationDriver` - per-frame spawn/update/render glue for the frame loop
//! - `Canvas` - RGBA raster surface for headless output

pub mod canvas;
pub mod curve;
pub mod driver;
pub mod particle;
pub mod pool;
pub mod rand;
pub mod ring;
pub mod settings;
pub mod sprite_gen;

pub use canvas::Canvas;
pub use curve::{point_on_heart, HeartCurve, ParametricCurve};
pub use driver::{AnimationDriver, FrameReport};
pub use particle::{ease_out_cubic, Particle};
pub use pool::{ParticlePool, PoolStats};
pub use ring::RingBuffer;
pub use settings::{CanvasSettings, ParticleSettings, Settings};
pub use sprite_gen::render_sprite;
