//! Q16.16 Fixed-Point Arithmetic
//!
//! Deterministic fixed-point math for the platformer simulation.
//! All world-space quantities (positions, sizes, velocities, gravity,
//! camera offset) are stored as `Fixed`. Floats only appear when a value
//! is converted for display.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 units                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! With 32-unit tiles the range covers levels up to 1023 cells on a side,
//! which the level parser enforces.

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE; // 65536

/// Largest integer that can be represented as a whole `Fixed` value.
pub const FIXED_MAX_INT: i32 = i32::MAX >> FIXED_SCALE; // 32767

// =============================================================================
// CONVERSIONS
// =============================================================================

/// Convert a float to fixed-point (truncating toward zero).
///
/// # Warning
/// Only use at compile-time or initialization. NEVER in the tick loop.
///
/// # Example
/// ```
/// use scroll_runner::core::fixed::{to_fixed, FIXED_ONE};
/// const MY_VALUE: i32 = to_fixed(2.5);
/// assert_eq!(MY_VALUE, FIXED_ONE * 2 + FIXED_ONE / 2);
/// ```
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert an integer to fixed-point.
#[inline]
pub const fn from_int(i: i32) -> Fixed {
    i << FIXED_SCALE
}

/// Checked integer conversion. Returns `None` if `i` is outside the
/// representable whole-number range.
#[inline]
pub fn checked_from_int(i: i64) -> Option<Fixed> {
    if i.unsigned_abs() > FIXED_MAX_INT as u64 {
        return None;
    }
    Some((i as i32) << FIXED_SCALE)
}

/// Convert fixed-point to float for display/rendering.
///
/// # Warning
/// Only use for visual output. NEVER use result in game logic.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Maximum of two fixed-point numbers.
#[inline]
pub fn fixed_max(a: Fixed, b: Fixed) -> Fixed {
    if a > b { a } else { b }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_constants() {
        assert_eq!(FIXED_ONE, 65536);
        assert_eq!(FIXED_SCALE, 16);
        assert_eq!(FIXED_MAX_INT, 32767);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.0), FIXED_ONE);
        assert_eq!(to_fixed(0.5), FIXED_ONE / 2);
        assert_eq!(to_fixed(2.0), FIXED_ONE * 2);
        assert_eq!(to_fixed(-1.0), -FIXED_ONE);
        // 0.8 truncates to 52428
        assert_eq!(to_fixed(0.8), 52428);
    }

    #[test]
    fn test_int_conversions() {
        assert_eq!(from_int(32), 32 * FIXED_ONE);
        assert_eq!(from_int(-3), -3 * FIXED_ONE);
    }

    #[test]
    fn test_checked_from_int() {
        assert_eq!(checked_from_int(100), Some(from_int(100)));
        assert_eq!(checked_from_int(FIXED_MAX_INT as i64), Some(from_int(FIXED_MAX_INT)));
        assert_eq!(checked_from_int(FIXED_MAX_INT as i64 + 1), None);
        assert_eq!(checked_from_int(-40_000), None);
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(FIXED_ONE / 2), 0.5);
        assert_eq!(to_float(from_int(-7)), -7.0);
    }

    #[test]
    fn test_fixed_max() {
        assert_eq!(fixed_max(0, -5), 0);
        assert_eq!(fixed_max(FIXED_ONE, FIXED_ONE / 2), FIXED_ONE);
    }
}
