//! Axis-aligned rectangles
//!
//! Every entity occupies a rectangle in window coordinates: origin at the
//! top-left corner of the window, x to the right, y downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle defined by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size / 2.0;
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Overlap extent on each axis (non-positive components mean no overlap)
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        self.max().min(other.max()) - self.min().max(other.min())
    }

    /// True if the interiors intersect (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        let o = self.overlap(other);
        o.x > 0.0 && o.y > 0.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }
}
