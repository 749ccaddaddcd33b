//! Draw List
//!
//! A read-only snapshot of what a renderer needs after a tick. Positions
//! are already shifted into screen space by the camera offset.

use serde::{Serialize, Deserialize};

use crate::core::fixed::Fixed;
use crate::core::rect::Rect;
use crate::game::state::{Entity, EntityKind, Session};

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Sky background
    pub const SKY: Self = Self::rgb(135, 206, 235);
    /// Tiles
    pub const TILE: Self = Self::rgb(139, 69, 19);
    /// Coins
    pub const COIN: Self = Self::rgb(255, 215, 0);
    /// Enemies
    pub const ENEMY: Self = Self::rgb(255, 0, 0);
    /// Player
    pub const PLAYER: Self = Self::rgb(0, 0, 255);

    /// Create a color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fill color for an entity kind.
    pub const fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Tile => Self::TILE,
            EntityKind::Coin => Self::COIN,
            EntityKind::Enemy => Self::ENEMY,
            EntityKind::Player => Self::PLAYER,
        }
    }
}

/// One filled rectangle to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    /// What this is
    pub kind: EntityKind,
    /// Screen-space rectangle
    pub rect: Rect,
    /// Fill color
    pub color: Color,
}

/// Everything to draw for one tick, in draw order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Tick this frame was captured on
    pub tick: u32,
    /// Clear color
    pub background: Color,
    /// Tiles, coins, enemies, then the player
    pub sprites: Vec<Sprite>,
    /// Score at capture time
    pub score: u32,
    /// Camera offset the sprites were shifted by
    pub camera_offset: Fixed,
    /// Viewport width
    pub viewport_width: Fixed,
    /// Viewport height
    pub viewport_height: Fixed,
}

impl Frame {
    /// Snapshot the session for drawing.
    pub fn capture(session: &Session, camera_offset: Fixed) -> Self {
        let sprites = session
            .level
            .entities()
            .map(|entity| sprite_for(entity, camera_offset))
            .collect();

        Self {
            tick: session.tick,
            background: Color::SKY,
            sprites,
            score: session.score,
            camera_offset,
            viewport_width: session.tuning.viewport_width,
            viewport_height: session.tuning.viewport_height,
        }
    }

    /// Sprites of one kind.
    pub fn sprites_of(&self, kind: EntityKind) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(move |s| s.kind == kind)
    }
}

fn sprite_for(entity: Entity<'_>, camera_offset: Fixed) -> Sprite {
    let mut rect = entity.rect();
    rect.shift_x(camera_offset.wrapping_neg());
    Sprite {
        kind: entity.kind(),
        rect,
        color: Color::for_kind(entity.kind()),
    }
}
