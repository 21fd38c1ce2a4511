//! Shared integer counter
//!
//! Lives and remaining bricks are counters written by several parties (the
//! frame tick, brick hits, heart catches) and read by the life displays.
//! They are plain fields of `GameState`; writers borrow the state mutably.

use serde::{Deserialize, Serialize};

/// Integer cell with no internal clamping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter(i32);

impl Counter {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.0
    }

    #[inline]
    pub fn increment(&mut self) {
        self.0 += 1;
    }

    #[inline]
    pub fn decrement(&mut self) {
        self.0 -= 1;
    }

    /// Back to zero
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}
