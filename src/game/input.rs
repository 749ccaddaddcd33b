//! Input State and Recording
//!
//! The core consumes a plain snapshot of three flags per tick. Input
//! recordings store only the ticks where the snapshot changed, which is
//! enough to replay a session exactly.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// INPUT STATE
// =============================================================================

/// Input snapshot for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputState {
    /// Move left held
    pub move_left: bool,
    /// Move right held
    pub move_right: bool,
    /// Jump held
    pub jump: bool,
}

impl InputState {
    /// No buttons held.
    pub const IDLE: Self = Self { move_left: false, move_right: false, jump: false };

    /// Right held.
    pub const fn right() -> Self {
        Self { move_left: false, move_right: true, jump: false }
    }

    /// Left held.
    pub const fn left() -> Self {
        Self { move_left: true, move_right: false, jump: false }
    }

    /// Same input with jump held.
    pub const fn with_jump(self) -> Self {
        Self { jump: true, ..self }
    }

    /// -1, 0 or 1. Left takes priority when both directions are held.
    #[inline]
    pub fn horizontal_direction(&self) -> i8 {
        if self.move_left {
            -1
        } else if self.move_right {
            1
        } else {
            0
        }
    }

    /// Pack into a byte: bit 0 left, bit 1 right, bit 2 jump.
    #[inline]
    pub fn to_bits(self) -> u8 {
        (self.move_left as u8) | (self.move_right as u8) << 1 | (self.jump as u8) << 2
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// Recording (de)serialization errors.
#[derive(Debug, Error)]
pub enum RecordingError {
    /// JSON encode/decode failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encode/decode failed.
    #[error("binary error: {0}")]
    Binary(#[from] bincode::Error),
}

/// Input change at a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick when this input state began
    pub tick: u32,
    /// The new input state
    pub input: InputState,
}

/// Delta-compressed input log for one session.
///
/// Used for replay and determinism checks.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputRecording {
    /// Last tick covered by the recording
    end_tick: u32,

    /// Only ticks where input CHANGED
    deltas: Vec<InputDelta>,

    /// Last recorded input (for delta comparison)
    #[serde(skip)]
    last_input: InputState,
}

impl InputRecording {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record input for a tick. Stored only if it differs from the previous one.
    ///
    /// Ticks must be recorded in increasing order.
    pub fn record(&mut self, tick: u32, input: InputState) {
        self.end_tick = tick;

        if input != self.last_input {
            self.deltas.push(InputDelta { tick, input });
            self.last_input = input;
        }
    }

    /// Input in effect at `tick`.
    pub fn input_at(&self, tick: u32) -> InputState {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            InputState::IDLE
        } else {
            self.deltas[idx - 1].input
        }
    }

    /// Last tick covered.
    pub fn end_tick(&self) -> u32 {
        self.end_tick
    }

    /// Number of delta entries.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Iterate `(tick, input)` for every tick from 0 to `end_tick`.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            current_tick: 0,
            delta_idx: 0,
            current: InputState::IDLE,
            done: false,
        }
    }

    /// Fingerprint of the recorded inputs.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_recording();
        hasher.update_u32(self.end_tick);
        for delta in &self.deltas {
            hasher.update_u32(delta.tick);
            hasher.update_u8(delta.input.to_bits());
        }
        hasher.finalize()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, RecordingError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(s: &str) -> Result<Self, RecordingError> {
        let mut recording: Self = serde_json::from_str(s)?;
        recording.restore_last_input();
        Ok(recording)
    }

    /// Serialize to compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordingError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from compact binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self, RecordingError> {
        let mut recording: Self = bincode::deserialize(data)?;
        recording.restore_last_input();
        Ok(recording)
    }

    fn restore_last_input(&mut self) {
        self.last_input = self.deltas.last().map(|d| d.input).unwrap_or_default();
    }
}

/// Iterator for replaying inputs tick-by-tick.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    current_tick: u32,
    delta_idx: usize,
    current: InputState,
    done: bool,
}

impl Iterator for ReplayIterator<'_> {
    type Item = (u32, InputState);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.current_tick > self.recording.end_tick {
            return None;
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.tick > self.current_tick {
                break;
            }
            self.current = delta.input;
            self.delta_idx += 1;
        }

        let item = (self.current_tick, self.current);
        match self.current_tick.checked_add(1) {
            Some(next) => self.current_tick = next,
            None => self.done = true,
        }
        Some(item)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_direction() {
        assert_eq!(InputState::IDLE.horizontal_direction(), 0);
        assert_eq!(InputState::left().horizontal_direction(), -1);
        assert_eq!(InputState::right().horizontal_direction(), 1);
        let both = InputState { move_left: true, move_right: true, jump: false };
        assert_eq!(both.horizontal_direction(), -1);
    }

    #[test]
    fn test_to_bits() {
        assert_eq!(InputState::IDLE.to_bits(), 0);
        assert_eq!(InputState::left().to_bits(), 0b001);
        assert_eq!(InputState::right().with_jump().to_bits(), 0b110);
    }

    #[test]
    fn test_delta_compression() {
        let mut recording = InputRecording::new();

        for t in 0..4 {
            recording.record(t, InputState::right());
        }
        assert_eq!(recording.delta_count(), 1);

        recording.record(4, InputState::right().with_jump());
        recording.record(5, InputState::right());
        assert_eq!(recording.delta_count(), 3);
    }

    #[test]
    fn test_idle_prefix_not_stored() {
        let mut recording = InputRecording::new();
        recording.record(0, InputState::IDLE);
        recording.record(1, InputState::IDLE);
        assert_eq!(recording.delta_count(), 0);
        assert_eq!(recording.end_tick(), 1);
    }

    #[test]
    fn test_input_at() {
        let mut recording = InputRecording::new();
        recording.record(10, InputState::right());
        recording.record(20, InputState::left());
        recording.record(30, InputState::IDLE);

        assert_eq!(recording.input_at(5), InputState::IDLE);
        assert_eq!(recording.input_at(10), InputState::right());
        assert_eq!(recording.input_at(15), InputState::right());
        assert_eq!(recording.input_at(25), InputState::left());
        assert_eq!(recording.input_at(100), InputState::IDLE);
    }

    #[test]
    fn test_replay_iterator() {
        let mut recording = InputRecording::new();
        recording.record(0, InputState::left());
        recording.record(3, InputState::right());
        recording.record(5, InputState::right());

        let frames: Vec<_> = recording.replay_iter().collect();

        assert_eq!(frames.len(), 6);
        assert_eq!(frames[0], (0, InputState::left()));
        assert_eq!(frames[2], (2, InputState::left()));
        assert_eq!(frames[3], (3, InputState::right()));
        assert_eq!(frames[5], (5, InputState::right()));
    }

    #[test]
    fn test_json_and_binary_roundtrip_keep_delta_state() {
        let mut recording = InputRecording::new();
        recording.record(0, InputState::right());
        recording.record(8, InputState::right().with_jump());
        recording.record(9, InputState::right());

        let mut from_json = InputRecording::from_json(&recording.to_json().unwrap()).unwrap();
        let mut from_bytes = InputRecording::from_bytes(&recording.to_bytes().unwrap()).unwrap();
        assert_eq!(from_json.compute_hash(), recording.compute_hash());
        assert_eq!(from_bytes.compute_hash(), recording.compute_hash());

        // Continuing a restored recording must not re-store an unchanged input
        from_json.record(10, InputState::right());
        from_bytes.record(10, InputState::right());
        assert_eq!(from_json.delta_count(), 3);
        assert_eq!(from_bytes.delta_count(), 3);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(InputRecording::from_json("[1, 2"), Err(RecordingError::Json(_))));
        assert!(matches!(InputRecording::from_bytes(&[0xff]), Err(RecordingError::Binary(_))));
    }

    #[test]
    fn test_hash_changes_with_inputs() {
        let mut a = InputRecording::new();
        a.record(0, InputState::right());
        let mut b = InputRecording::new();
        b.record(0, InputState::left());
        assert_ne!(a.compute_hash(), b.compute_hash());
    }
}
