//! Core deterministic primitives.
//!
//! Fixed-point scalars, vectors, rectangles and state hashing.
//! Everything the simulation computes with lives here.

pub mod fixed;
pub mod vec2;
pub mod rect;
pub mod hash;

// Re-export core types
pub use fixed::{Fixed, FIXED_ONE, FIXED_SCALE};
pub use vec2::FixedVec2;
pub use rect::Rect;
pub use hash::{StateHash, StateHasher, compute_state_hash};
