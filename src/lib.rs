//! # Scroll Runner
//!
//! Deterministic simulation core for a tile-based side-scrolling platformer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SCROLL RUNNER                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Q16.16 fixed-point arithmetic             │
//! │  ├── vec2.rs     - 2D vector with fixed-point                │
//! │  ├── rect.rs     - Axis-aligned rectangles                   │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── config.rs   - Session tuning                            │
//! │  ├── input.rs    - Input snapshots and recordings            │
//! │  ├── state.rs    - Entities, level, session                  │
//! │  ├── level.rs    - Character-grid level parser               │
//! │  ├── collision.rs- Tile collision resolution                 │
//! │  ├── player.rs   - Player controller                         │
//! │  ├── enemy.rs    - Enemy patrol controller                   │
//! │  ├── tick.rs     - Per-tick game loop                        │
//! │  └── events.rs   - Game events                               │
//! │                                                              │
//! │  render/         - Presentation hand-off (read-only)         │
//! │  ├── frame.rs    - Draw list snapshot                        │
//! │  └── ascii.rs    - Headless text renderer                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No floating-point arithmetic inside the tick (config floats are
//!   converted to fixed-point once, at session start)
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time dependencies
//!
//! Given an identical level, config and input sequence, the simulation
//! produces **identical results** on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod render;

// Re-export commonly used types
pub use core::fixed::{Fixed, FIXED_ONE, FIXED_SCALE};
pub use core::vec2::FixedVec2;
pub use core::rect::Rect;
pub use game::config::GameConfig;
pub use game::input::{InputState, InputRecording};
pub use game::level::{load_level, LevelError, DEFAULT_LEVEL};
pub use game::state::{Session, Level, EndReason};
pub use game::tick::{tick, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target simulation tick rate (Hz) for drivers
pub const TICK_RATE: u32 = 60;
