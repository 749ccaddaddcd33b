//! Collision Detection and Resolution
//!
//! Axis-separated rectangle-vs-tile resolution shared by the player and
//! enemy controllers, plus the overlap queries the tick loop uses for
//! player-vs-enemy and player-vs-coin interactions.
//!
//! A mover is displaced and corrected one axis at a time. The horizontal
//! pass must finish, including its position correction, before the
//! vertical pass starts.

use std::collections::BTreeMap;

use crate::core::fixed::Fixed;
use crate::core::rect::Rect;
use crate::game::state::{Coin, Enemy, EntityId, Tile};

/// What a vertical pass ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalContact {
    /// Moving down, stopped on top of a tile
    Landed,
    /// Moving up, stopped under a tile
    HitCeiling,
}

/// Apply a horizontal displacement and push the mover out of every tile it
/// now overlaps.
///
/// Each overlapping tile is handled in tile-set order against the
/// already-corrected position, so when several overlap the last one applied
/// decides the final position. Returns the number of corrections made.
pub fn move_horizontal(rect: &mut Rect, velocity_x: Fixed, tiles: &[Tile]) -> u32 {
    rect.shift_x(velocity_x);

    let mut corrections = 0;
    for tile in tiles {
        if !rect.overlaps(&tile.rect) {
            continue;
        }
        if velocity_x > 0 {
            rect.set_right(tile.rect.left());
            corrections += 1;
        } else if velocity_x < 0 {
            rect.set_left(tile.rect.right());
            corrections += 1;
        }
    }
    corrections
}

/// Apply a vertical displacement and push the mover out of every tile it
/// now overlaps.
///
/// On contact the vertical velocity is zeroed, so later overlapping tiles in
/// the same pass leave the position alone. Returns the contact, if any.
pub fn move_vertical(rect: &mut Rect, velocity_y: &mut Fixed, tiles: &[Tile]) -> Option<VerticalContact> {
    rect.shift_y(*velocity_y);

    let mut contact = None;
    for tile in tiles {
        if !rect.overlaps(&tile.rect) {
            continue;
        }
        if *velocity_y > 0 {
            rect.set_bottom(tile.rect.top());
            *velocity_y = 0;
            contact = Some(VerticalContact::Landed);
        } else if *velocity_y < 0 {
            rect.set_top(tile.rect.bottom());
            *velocity_y = 0;
            contact = Some(VerticalContact::HitCeiling);
        }
    }
    contact
}

/// Apply a horizontal displacement and snap to the edge of the first
/// overlapping tile only. Returns that tile's rectangle.
///
/// A mover with zero velocity is snapped to the tile's right edge.
pub fn move_horizontal_first_hit(rect: &mut Rect, velocity_x: Fixed, tiles: &[Tile]) -> Option<Rect> {
    rect.shift_x(velocity_x);

    let hit = tiles.iter().find(|tile| rect.overlaps(&tile.rect))?.rect;
    if velocity_x > 0 {
        rect.set_right(hit.left());
    } else {
        rect.set_left(hit.right());
    }
    Some(hit)
}

/// First enemy (by id) overlapping the player.
pub fn find_enemy_contact(player: &Rect, enemies: &BTreeMap<EntityId, Enemy>) -> Option<EntityId> {
    enemies
        .values()
        .find(|enemy| player.overlaps(&enemy.rect))
        .map(|enemy| enemy.id)
}

/// Every coin overlapping the player, in id order.
pub fn find_coin_contacts(player: &Rect, coins: &BTreeMap<EntityId, Coin>) -> Vec<EntityId> {
    coins
        .values()
        .filter(|coin| player.overlaps(&coin.rect))
        .map(|coin| coin.id)
        .collect()
}
