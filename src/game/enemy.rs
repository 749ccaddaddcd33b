//! Enemy Controller
//!
//! Horizontal patrol on a fixed track. Enemies ignore gravity and never
//! fall; they turn around when they walk into a tile.

use crate::core::fixed::Fixed;
use crate::core::rect::Rect;
use crate::game::collision::move_horizontal_first_hit;
use crate::game::state::{Enemy, Tile};

/// Horizontal band an enemy may move in.
///
/// Spans one viewport past each end of the world. No tile lies beyond the
/// world, so an enemy that walks out of the band can never be turned back;
/// it stops there and stays off screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatrolBounds {
    /// Left limit
    pub left: Fixed,
    /// Right limit
    pub right: Fixed,
}

impl PatrolBounds {
    /// Band for a world of `world_width` seen through `viewport_width`.
    ///
    /// Kept two tiles inside the Fixed range so the last step out of the
    /// band cannot overflow.
    pub fn new(world_width: Fixed, viewport_width: Fixed, tile_size: Fixed) -> Self {
        let reserve = 2 * i64::from(tile_size);
        let left = (-i64::from(viewport_width)).max(i64::from(Fixed::MIN) + reserve);
        let right = (i64::from(world_width) + i64::from(viewport_width)).min(i64::from(Fixed::MAX) - reserve);
        Self {
            left: left as Fixed,
            right: right as Fixed,
        }
    }

    /// Does `rect` reach into the band?
    #[inline]
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.right() > self.left && rect.left() < self.right
    }
}

/// Advance an enemy by one tick. Returns true if it turned around.
///
/// Only the first overlapping tile is considered. The speed magnitude is
/// preserved; only its sign flips. An enemy outside `bounds` stays put.
pub fn update_enemy(enemy: &mut Enemy, tiles: &[Tile], bounds: &PatrolBounds) -> bool {
    if !bounds.contains(&enemy.rect) {
        return false;
    }
    if move_horizontal_first_hit(&mut enemy.rect, enemy.velocity_x, tiles).is_none() {
        return false;
    }
    enemy.velocity_x = enemy.velocity_x.wrapping_neg();
    true
}
