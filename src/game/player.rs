//! Player Controller
//!
//! Input-driven horizontal movement, gravity-integrated vertical movement
//! and jump gating. The player is either grounded or airborne; only a
//! grounded player can start a jump.

use crate::game::collision::{move_horizontal, move_vertical, VerticalContact};
use crate::game::config::Tuning;
use crate::game::input::InputState;
use crate::game::state::{Player, Tile};

/// What happened to the player during one update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerStep {
    /// A jump started this tick
    pub jumped: bool,
    /// The player came to rest after being airborne
    pub landed: bool,
    /// The player's head hit a tile
    pub bumped_head: bool,
}

/// Advance the player by one tick.
///
/// 1. Horizontal velocity is set straight from input (no ramp).
/// 2. A grounded player with jump held gets the jump impulse.
/// 3. Gravity is added unconditionally; the vertical pass re-grounds a
///    resting player every tick so it never sinks. Fall speed is capped at
///    one tile per tick.
/// 4. Horizontal pass, then vertical pass, against `tiles`.
pub fn update_player(player: &mut Player, input: &InputState, tiles: &[Tile], tuning: &Tuning) -> PlayerStep {
    let mut step = PlayerStep::default();
    let was_grounded = player.on_ground;

    player.velocity.x = match input.horizontal_direction() {
        d if d < 0 => -tuning.player_speed,
        d if d > 0 => tuning.player_speed,
        _ => 0,
    };

    if input.jump && player.on_ground {
        player.velocity.y = tuning.jump_velocity;
        player.on_ground = false;
        step.jumped = true;
    }

    player.velocity.y = (player.velocity.y + tuning.gravity).min(tuning.tile_size);

    move_horizontal(&mut player.rect, player.velocity.x, tiles);

    // Grounded only holds until the next vertical displacement.
    player.on_ground = false;
    match move_vertical(&mut player.rect, &mut player.velocity.y, tiles) {
        Some(VerticalContact::Landed) => {
            player.on_ground = true;
            step.landed = !was_grounded;
        }
        Some(VerticalContact::HitCeiling) => step.bumped_head = true,
        None => {}
    }

    step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{from_int, Fixed};
    use crate::core::rect::Rect;

    const TILE: Fixed = 32 << 16;

    fn floor(columns: i32, row: i32) -> Vec<Tile> {
        (0..columns).map(|c| Tile::at_cell(c, row, TILE)).collect()
    }

    fn standing_player() -> Player {
        Player {
            rect: Rect::new(from_int(64), 0, TILE, TILE),
            velocity: Default::default(),
            on_ground: true,
        }
    }

    fn input(move_left: bool, move_right: bool, jump: bool) -> InputState {
        InputState { move_left, move_right, jump }
    }

    #[test]
    fn test_standing_still_is_stable() {
        let tiles = floor(8, 1);
        let tuning = Tuning::default();
        let mut player = standing_player();

        for _ in 0..10 {
            let step = update_player(&mut player, &InputState::default(), &tiles, &tuning);
            assert_eq!(player.rect.y, 0);
            assert!(player.on_ground);
            assert_eq!(player.velocity.y, 0);
            assert!(!step.landed);
        }
    }

    #[test]
    fn test_horizontal_velocity_from_input() {
        let tiles = floor(8, 1);
        let tuning = Tuning::default();
        let mut player = standing_player();

        update_player(&mut player, &input(false, true, false), &tiles, &tuning);
        assert_eq!(player.velocity.x, tuning.player_speed);
        assert_eq!(player.rect.x, from_int(69));

        update_player(&mut player, &input(true, false, false), &tiles, &tuning);
        assert_eq!(player.velocity.x, -tuning.player_speed);
        assert_eq!(player.rect.x, from_int(64));

        update_player(&mut player, &input(false, false, false), &tiles, &tuning);
        assert_eq!(player.velocity.x, 0);
        assert_eq!(player.rect.x, from_int(64));
    }

    #[test]
    fn test_left_wins_when_both_held() {
        let tiles = floor(8, 1);
        let tuning = Tuning::default();
        let mut player = standing_player();
        update_player(&mut player, &input(true, true, false), &tiles, &tuning);
        assert_eq!(player.velocity.x, -tuning.player_speed);
    }

    #[test]
    fn test_jump_from_ground() {
        let tiles = floor(8, 1);
        let tuning = Tuning::default();
        let mut player = standing_player();

        let step = update_player(&mut player, &input(false, false, true), &tiles, &tuning);

        assert!(step.jumped);
        assert!(!player.on_ground);
        assert_eq!(player.velocity.y, tuning.jump_velocity + tuning.gravity);
        assert_eq!(player.rect.y, tuning.jump_velocity + tuning.gravity);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let tiles = floor(8, 10);
        let tuning = Tuning::default();
        let mut player = standing_player();
        player.on_ground = false;
        player.velocity.y = -from_int(3);

        let step = update_player(&mut player, &input(false, false, true), &tiles, &tuning);

        assert!(!step.jumped);
        assert_eq!(player.velocity.y, -from_int(3) + tuning.gravity);
    }

    #[test]
    fn test_no_double_jump() {
        let tiles = floor(8, 5);
        let tuning = Tuning::default();
        let mut player = standing_player();
        player.rect.y = from_int(128);

        assert!(update_player(&mut player, &input(false, false, true), &tiles, &tuning).jumped);
        for _ in 0..5 {
            let step = update_player(&mut player, &input(false, false, true), &tiles, &tuning);
            assert!(!step.jumped);
        }
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let tiles = floor(8, 5);
        let tuning = Tuning::default();
        let mut player = standing_player();
        player.rect.y = from_int(128);

        update_player(&mut player, &input(false, false, true), &tiles, &tuning);
        let mut landed_at = None;
        for t in 0..100 {
            let step = update_player(&mut player, &InputState::default(), &tiles, &tuning);
            if step.landed {
                landed_at = Some(t);
                break;
            }
        }

        assert!(landed_at.is_some());
        assert!(player.on_ground);
        assert_eq!(player.rect.y, from_int(128));
    }

    #[test]
    fn test_walking_off_ledge_clears_ground() {
        let tiles = floor(3, 1);
        let tuning = Tuning::default();
        let mut player = standing_player();

        // Walk right until no tile is under the player
        for _ in 0..20 {
            update_player(&mut player, &input(false, true, false), &tiles, &tuning);
        }

        assert!(!player.on_ground);
        assert!(player.rect.y > 0);
        let vy = player.velocity.y;
        update_player(&mut player, &input(false, false, true), &tiles, &tuning);
        assert_eq!(player.velocity.y, vy + tuning.gravity);
    }

    #[test]
    fn test_long_fall_capped_and_lands() {
        // Floor far below: without a cap the fall speed would exceed a tile
        let tiles = floor(3, 60);
        let tuning = Tuning::default();
        let mut player = standing_player();
        player.on_ground = false;

        let mut landed = false;
        for _ in 0..200 {
            let step = update_player(&mut player, &InputState::default(), &tiles, &tuning);
            assert!(player.velocity.y <= tuning.tile_size);
            if step.landed {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert!(player.on_ground);
        assert_eq!(player.rect.bottom(), from_int(60 * 32));
    }

    #[test]
    fn test_head_bump() {
        let mut tiles = floor(8, 5);
        tiles.push(Tile::at_cell(2, 2, TILE));
        let tuning = Tuning::default();
        let mut player = standing_player();
        player.rect.y = from_int(128);

        update_player(&mut player, &input(false, false, true), &tiles, &tuning);
        let mut bumped = false;
        for _ in 0..10 {
            if update_player(&mut player, &InputState::default(), &tiles, &tuning).bumped_head {
                bumped = true;
                break;
            }
        }

        assert!(bumped);
        assert_eq!(player.rect.top(), from_int(96));
        assert_eq!(player.velocity.y, 0);
    }
}
