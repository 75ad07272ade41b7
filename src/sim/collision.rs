//! Axis-aligned bounding box collision
//!
//! Every collision in the game (player vs obstacle, player vs pickup) is a
//! plain box overlap. Touching edges do not count.

use glam::Vec2;

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Returns true if `target` overlaps any of `boxes`
pub fn overlaps_any<I>(target: &Aabb, boxes: I) -> bool
where
    I: IntoIterator<Item = Aabb>,
{
    boxes.into_iter().any(|b| target.overlaps(&b))
}
