//! Cooperative frame scheduler

use crate::clock::FrameClock;
use crate::system::AnimationSystem;
use pinkboard_core::{Result, Surface};

/// Drives one animation system frame by frame.
///
/// Single-threaded: every frame runs to completion before the next one is
/// scheduled. Stopping only prevents future frames; there is never an
/// in-flight frame to abort.
pub struct FrameLoop<A: AnimationSystem> {
    system: A,
    clock: FrameClock,
    initialized: bool,
    running: bool,
    frame_count: u64,
}

impl<A: AnimationSystem> FrameLoop<A> {
    pub fn new(system: A) -> Self {
        Self::with_clock(system, FrameClock::new())
    }

    pub fn with_clock(system: A, clock: FrameClock) -> Self {
        Self {
            system,
            clock,
            initialized: false,
            running: true,
            frame_count: 0,
        }
    }

    pub fn system(&self) -> &A {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut A {
        &mut self.system
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop scheduling further frames
    pub fn stop(&mut self) {
        if self.running {
            log::debug!(
                "[{}] stopping after {} frame(s)",
                self.system.name(),
                self.frame_count
            );
        }
        self.running = false;
    }

    /// Run one frame timed from the wall clock.
    /// Returns `false` without doing anything once the loop is stopped.
    pub fn step(&mut self, surface: &mut dyn Surface) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }
        let dt = self.clock.tick();
        self.run_frame(surface, dt)?;
        Ok(true)
    }

    /// Run one frame with a caller-supplied elapsed time (headless playback)
    pub fn step_with(&mut self, surface: &mut dyn Surface, elapsed: f64) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }
        let dt = self.clock.advance(elapsed);
        self.run_frame(surface, dt)?;
        Ok(true)
    }

    /// Run up to `frames` frames of `dt` seconds each, calling `on_frame`
    /// after every frame with the frame index and the drawn surface.
    ///
    /// Returns the number of frames actually run, which is smaller than
    /// `frames` if the loop is stopped first.
    pub fn run_fixed<S, F>(
        &mut self,
        surface: &mut S,
        frames: u64,
        dt: f64,
        mut on_frame: F,
    ) -> Result<u64>
    where
        S: Surface,
        F: FnMut(u64, &S) -> Result<()>,
    {
        let mut ran = 0;
        for _ in 0..frames {
            if !self.step_with(surface, dt)? {
                break;
            }
            on_frame(self.frame_count - 1, surface)?;
            ran += 1;
        }
        Ok(ran)
    }

    /// Stop the loop and let the system release its resources
    pub fn shutdown(&mut self) -> Result<()> {
        self.stop();
        if self.initialized {
            self.initialized = false;
            self.system.shutdown()?;
        }
        Ok(())
    }

    /// Consume the loop, handing back the system
    pub fn into_inner(self) -> A {
        self.system
    }

    fn run_frame(&mut self, surface: &mut dyn Surface, dt: f64) -> Result<()> {
        if !self.initialized {
            self.system.initialize(surface)?;
            self.initialized = true;
        }
        self.system.frame(surface, dt as f32)?;
        self.frame_count += 1;
        Ok(())
    }
}
