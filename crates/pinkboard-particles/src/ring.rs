//! Fixed-capacity circular arena with two modular cursors
//!
//! All wraparound arithmetic for the particle pool lives here. Slots are
//! allocated once up front and recycled in place; nothing is allocated or
//! freed after construction.

use pinkboard_core::{PinkboardError, Result};
use std::iter::Chain;
use std::slice;

/// Ring-order iterator over the active range (oldest first)
pub type Iter<'a, T> = Chain<slice::Iter<'a, T>, slice::Iter<'a, T>>;

/// Mutable ring-order iterator over the active range (oldest first)
pub type IterMut<'a, T> = Chain<slice::IterMut<'a, T>, slice::IterMut<'a, T>>;

/// A circular buffer whose active range is `[first_active, first_free)`,
/// wrapping at `capacity`.
///
/// `first_active == first_free` is ambiguous on its own (empty or full), so
/// the occupancy count is tracked alongside the cursors.
pub struct RingBuffer<T> {
    slots: Vec<T>,
    first_active: usize,
    first_free: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Allocate `capacity` slots up front, each produced by `fill`.
    pub fn new(capacity: usize, mut fill: impl FnMut() -> T) -> Result<Self> {
        if capacity == 0 {
            return Err(PinkboardError::ConfigurationError(
                "ring buffer capacity must be at least 1".to_string(),
            ));
        }
        let mut slots = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            slots.push(fill());
        }
        Ok(Self {
            slots,
            first_active: 0,
            first_free: 0,
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots in the active range
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Slot index of the oldest active element
    pub fn first_active(&self) -> usize {
        self.first_active
    }

    /// Slot index the next push will write into
    pub fn first_free(&self) -> usize {
        self.first_free
    }

    /// Re-initialize the slot at `first_free` in place and make it the newest
    /// active element.
    ///
    /// When the buffer is already full the oldest element is overwritten and
    /// `first_active` moves forward with `first_free`. Returns `true` when
    /// that eviction happened.
    pub fn push_with(&mut self, init: impl FnOnce(&mut T)) -> bool {
        let evicted = self.is_full();
        init(&mut self.slots[self.first_free]);
        self.first_free = self.next_index(self.first_free);
        if evicted {
            self.first_active = self.first_free;
        } else {
            self.len += 1;
        }
        evicted
    }

    /// Oldest active element
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(&self.slots[self.first_active])
        }
    }

    /// Newest active element
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            let last = (self.first_free + self.slots.len() - 1) % self.slots.len();
            Some(&self.slots[last])
        }
    }

    /// Retire leading elements while `pred` holds, stopping once the active
    /// range is empty. Returns how many were retired.
    pub fn pop_front_while(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut popped = 0;
        while self.len > 0 && pred(&self.slots[self.first_active]) {
            self.first_active = self.next_index(self.first_active);
            self.len -= 1;
            popped += 1;
        }
        popped
    }

    /// The active range as (older, newer) contiguous slices.
    /// The second slice is empty unless the range wraps.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        if self.len == 0 {
            (&[], &[])
        } else if self.first_active < self.first_free {
            (&self.slots[self.first_active..self.first_free], &[])
        } else {
            (
                &self.slots[self.first_active..],
                &self.slots[..self.first_free],
            )
        }
    }

    /// Mutable version of [`RingBuffer::as_slices`]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        if self.len == 0 {
            (&mut [], &mut [])
        } else if self.first_active < self.first_free {
            (&mut self.slots[self.first_active..self.first_free], &mut [])
        } else {
            let (head, tail) = self.slots.split_at_mut(self.first_active);
            (tail, &mut head[..self.first_free])
        }
    }

    /// Active elements in ring order, oldest to newest
    pub fn iter(&self) -> Iter<'_, T> {
        let (older, newer) = self.as_slices();
        older.iter().chain(newer.iter())
    }

    /// Active elements in ring order, oldest to newest
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (older, newer) = self.as_mut_slices();
        older.iter_mut().chain(newer.iter_mut())
    }

    /// Empty the active range. Slot contents are left for reuse.
    pub fn clear(&mut self) {
        self.first_active = 0;
        self.first_free = 0;
        self.len = 0;
    }

    fn next_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() { 0 } else { next }
    }
}
