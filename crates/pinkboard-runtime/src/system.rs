//! Animation system trait

use pinkboard_core::{Result, Surface};

/// A system that can be ticked by the frame loop
///
/// Each `frame` call runs to completion before the next one starts.
pub trait AnimationSystem {
    /// Called once before the first frame
    fn initialize(&mut self, surface: &mut dyn Surface) -> Result<()>;

    /// Advance by `dt` seconds and draw onto `surface`
    fn frame(&mut self, surface: &mut dyn Surface, dt: f32) -> Result<()>;

    /// Called when the loop is shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
