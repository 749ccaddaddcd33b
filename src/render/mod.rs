//! Rendering Hand-off
//!
//! The simulation never draws. After a tick the driver captures a `Frame`
//! and passes it to whatever `Renderer` it owns.

pub mod frame;
pub mod ascii;

pub use frame::{Color, Frame, Sprite};
pub use ascii::AsciiRenderer;

/// Consumer of captured frames.
pub trait Renderer {
    /// Draw one frame.
    fn present(&mut self, frame: &Frame);
}
