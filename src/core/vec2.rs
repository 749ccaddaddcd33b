//! Fixed-Point 2D Vector
//!
//! Deterministic 2D vector used for velocities.
//! Screen convention: +X is right, +Y is down.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::fixed::{Fixed, to_float};

/// 2D vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec2 {
    /// X component (Q16.16 fixed-point)
    pub x: Fixed,
    /// Y component (Q16.16 fixed-point), positive is down
    pub y: Fixed,
}

impl FixedVec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Convert to float tuple for rendering.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (to_float(self.x), to_float(self.y))
    }
}

impl fmt::Debug for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "Vec2({:.3}, {:.3})", fx, fy)
    }
}

impl fmt::Display for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "({:.3}, {:.3})", fx, fy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{to_fixed, FIXED_ONE};

    #[test]
    fn test_vec2_to_floats() {
        let v = FixedVec2::new(to_fixed(-1.5), to_fixed(0.8));
        let (x, y) = v.to_floats();
        assert_eq!(x, -1.5);
        assert!((y - 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_vec2_display() {
        let v = FixedVec2::new(FIXED_ONE, 2 * FIXED_ONE);
        assert_eq!(format!("{}", v), "(1.000, 2.000)");
        assert_eq!(format!("{:?}", v), "Vec2(1.000, 2.000)");
    }
}
