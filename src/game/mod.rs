//! Game Logic Module
//!
//! All game simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `config`: Session tuning and its fixed-point form
//! - `input`: Input snapshots and delta-compressed recordings
//! - `state`: Entities, level, session
//! - `level`: Character-grid level parser
//! - `collision`: Axis-separated tile collision and overlap queries
//! - `player`: Player controller
//! - `enemy`: Enemy patrol controller
//! - `tick`: Per-tick game loop and replay
//! - `events`: Game events for logging and replay checks

pub mod config;
pub mod input;
pub mod state;
pub mod level;
pub mod collision;
pub mod player;
pub mod enemy;
pub mod tick;
pub mod events;

// Re-export key types
pub use config::{ConfigError, GameConfig, Tuning};
pub use input::{InputState, InputDelta, InputRecording, RecordingError};
pub use state::{Session, SessionPhase, Level, EndReason, Entity, EntityKind, EntityId};
pub use level::{load_level, LevelError, DEFAULT_LEVEL};
pub use tick::{tick, replay_session, TickResult};
pub use events::{GameEvent, GameEventData};
