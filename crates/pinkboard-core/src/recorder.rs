//! A surface that records draw calls instead of rasterizing them

use crate::sprite::Sprite;
use crate::surface::{StampRect, Surface};

/// One recorded surface operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Stamp { rect: StampRect, alpha: f32 },
}

/// Records every `clear`/`stamp` in call order.
///
/// Used for headless statistics and for asserting draw order in tests.
#[derive(Debug, Default)]
pub struct DrawRecorder {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
}

impl DrawRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Stamps recorded since the most recent clear
    pub fn stamps_since_clear(&self) -> Vec<(StampRect, f32)> {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        self.calls[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCall::Stamp { rect, alpha } => Some((*rect, *alpha)),
                DrawCall::Clear => None,
            })
            .collect()
    }

    /// Total stamps recorded
    pub fn stamp_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Stamp { .. }))
            .count()
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for DrawRecorder {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn stamp(&mut self, _sprite: &Sprite, rect: StampRect, alpha: f32) {
        self.calls.push(DrawCall::Stamp { rect, alpha });
    }
}
