//! Pinkboard Core - Foundational types for the Pinkboard animation
//!
//! This crate provides the types that all other Pinkboard crates depend on:
//! - `Vec2` - 2D points and vectors
//! - `Color` - RGBA colours with hex parsing
//! - `Surface`, `StampRect` - the drawable-surface contract
//! - `Sprite` - an opaque rasterized stamp image
//! - `DrawRecorder` - a surface that records draw calls
//! - Error types and Result alias

mod error;
mod recorder;
mod sprite;
mod surface;
mod types;

pub use error::{PinkboardError, Result};
pub use recorder::{DrawCall, DrawRecorder};
pub use sprite::Sprite;
pub use surface::{StampRect, Surface};
pub use types::{Color, Vec2};
