//! Pinkboard Runtime - Frame loop infrastructure
//!
//! Provides the building blocks that drive an animation once per frame:
//! - `FrameClock` - wall-clock delta tracking with first-frame and spike clamping
//! - `AnimationSystem` - trait for systems ticked by the frame loop
//! - `FrameLoop` - cooperative, single-threaded frame scheduler with stop support

mod clock;
mod frame_loop;
mod system;

pub use clock::FrameClock;
pub use frame_loop::FrameLoop;
pub use system::AnimationSystem;
