//! Axis-Aligned Rectangle
//!
//! The occupied space of every entity. Position is the top-left corner,
//! size never changes after construction.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::fixed::{Fixed, to_float};
use super::vec2::FixedVec2;

/// Axis-aligned box in world units (Q16.16).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: Fixed,
    /// Top edge
    pub y: Fixed,
    /// Width
    pub w: Fixed,
    /// Height
    pub h: Fixed,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed, w: Fixed, h: Fixed) -> Self {
        Self { x, y, w, h }
    }

    /// Left edge.
    #[inline]
    pub const fn left(&self) -> Fixed {
        self.x
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> Fixed {
        self.x.wrapping_add(self.w)
    }

    /// Top edge.
    #[inline]
    pub const fn top(&self) -> Fixed {
        self.y
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> Fixed {
        self.y.wrapping_add(self.h)
    }

    /// Horizontal center.
    #[inline]
    pub const fn center_x(&self) -> Fixed {
        self.x.wrapping_add(self.w >> 1)
    }

    /// Top-left corner as a vector.
    #[inline]
    pub const fn position(&self) -> FixedVec2 {
        FixedVec2::new(self.x, self.y)
    }

    /// Move so the left edge sits at `left`.
    #[inline]
    pub fn set_left(&mut self, left: Fixed) {
        self.x = left;
    }

    /// Move so the right edge sits at `right`.
    #[inline]
    pub fn set_right(&mut self, right: Fixed) {
        self.x = right.wrapping_sub(self.w);
    }

    /// Move so the top edge sits at `top`.
    #[inline]
    pub fn set_top(&mut self, top: Fixed) {
        self.y = top;
    }

    /// Move so the bottom edge sits at `bottom`.
    #[inline]
    pub fn set_bottom(&mut self, bottom: Fixed) {
        self.y = bottom.wrapping_sub(self.h);
    }

    /// Translate horizontally.
    #[inline]
    pub fn shift_x(&mut self, dx: Fixed) {
        self.x = self.x.wrapping_add(dx);
    }

    /// Translate vertically.
    #[inline]
    pub fn shift_y(&mut self, dy: Fixed) {
        self.y = self.y.wrapping_add(dy);
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap,
    /// so a body resting on a tile is not "inside" it.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({:.3}, {:.3}, {:.3}x{:.3})",
            to_float(self.x),
            to_float(self.y),
            to_float(self.w),
            to_float(self.h)
        )
    }
}
