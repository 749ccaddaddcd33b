//! State Hashing for Verification
//!
//! Deterministic hashing of simulation state for:
//! - Replay validation (same inputs must give the same hash)
//! - Input recording fingerprints

use sha2::{Sha256, Digest};
use super::fixed::Fixed;
use super::rect::Rect;
use super::vec2::FixedVec2;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for simulation state.
///
/// Wraps SHA-256 with helpers for fixed-point types.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for session state.
    pub fn for_session_state() -> Self {
        Self::new(b"SCROLL_RUNNER_STATE_V1")
    }

    /// Create hasher for an input recording.
    pub fn for_input_recording() -> Self {
        Self::new(b"SCROLL_RUNNER_INPUTS_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a Fixed value.
    #[inline]
    pub fn update_fixed(&mut self, value: Fixed) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a FixedVec2.
    #[inline]
    pub fn update_vec2(&mut self, value: FixedVec2) {
        self.update_fixed(value.x);
        self.update_fixed(value.y);
    }

    /// Update with a Rect (position then size).
    #[inline]
    pub fn update_rect(&mut self, value: &Rect) {
        self.update_fixed(value.x);
        self.update_fixed(value.y);
        self.update_fixed(value.w);
        self.update_fixed(value.h);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for session verification.
///
/// Called by `Session::compute_hash()`. The closure adds
/// state-specific data after the tick counter and score.
pub fn compute_state_hash<F>(tick: u32, score: u32, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_session_state();

    hasher.update_u32(tick);
    hasher.update_u32(score);

    add_state(&mut hasher);

    hasher.finalize()
}
