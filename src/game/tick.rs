//! Simulation Tick
//!
//! The per-tick game loop. Advances the session by exactly one step:
//! controllers first, then interactions, then the camera. Fully
//! deterministic for a given session and input sequence.

use tracing::{debug, info};

use crate::core::fixed::{fixed_max, Fixed};
use crate::core::rect::Rect;
use crate::game::collision::{find_coin_contacts, find_enemy_contact};
use crate::game::config::GameConfig;
use crate::game::enemy::{update_enemy, PatrolBounds};
use crate::game::events::GameEvent;
use crate::game::input::{InputRecording, InputState};
use crate::game::level::LevelError;
use crate::game::player::update_player;
use crate::game::state::{EndReason, Session, SessionPhase};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Session is over (this tick or earlier)
    pub session_ended: bool,
    /// Why the session ended. Set only on the tick the session ends.
    pub end_reason: Option<EndReason>,
    /// Coins collected this tick
    pub score_delta: u32,
    /// Horizontal scroll of the viewport, never negative
    pub camera_offset: Fixed,
    /// Events generated this tick
    pub events: Vec<GameEvent>,
}

/// Horizontal camera offset keeping `player` centered once it passes half
/// the viewport.
pub fn camera_offset(player: &Rect, viewport_width: Fixed) -> Fixed {
    fixed_max(0, player.center_x().wrapping_sub(viewport_width >> 1))
}

/// Run one simulation tick.
///
/// Order within a tick:
/// 1. Player controller
/// 2. Enemy controllers (id order)
/// 3. Player vs enemies: any overlap ends the session
/// 4. Player vs coins: overlapping coins are removed and scored
/// 5. Fall-off check against the viewport height
/// 6. Camera offset
///
/// Once the session has ended, ticks are no-ops.
pub fn tick(session: &mut Session, input: &InputState) -> TickResult {
    let mut result = TickResult::default();

    if session.is_ended() {
        result.session_ended = true;
        result.camera_offset = camera_offset(&session.level.player.rect, session.tuning.viewport_width);
        return result;
    }

    // 0. Advance tick counter
    session.tick += 1;
    let now = session.tick;

    // 1. Player
    let (player, tiles) = session.level.player_and_tiles_mut();
    let step = update_player(player, input, tiles, &session.tuning);
    if step.jumped {
        session.push_event(GameEvent::player_jumped(now));
    }
    if step.landed {
        session.push_event(GameEvent::player_landed(now));
    }

    // 2. Enemies
    update_enemies(session);

    // 3-5. Interactions
    let player_rect = session.level.player.rect;
    if let Some(enemy_id) = find_enemy_contact(&player_rect, &session.level.enemies) {
        debug!("player caught by enemy {} at tick {}", enemy_id, now);
        end_session(session, EndReason::CaughtByEnemy, &mut result);
    } else {
        result.score_delta = collect_coins(session, &player_rect);

        if player_rect.y > session.tuning.viewport_height {
            end_session(session, EndReason::FellOffWorld, &mut result);
        }
    }

    // 6. Camera
    result.camera_offset = camera_offset(&player_rect, session.tuning.viewport_width);

    #[cfg(feature = "debug-tracing")]
    tracing::trace!(
        "tick {}: player {:?} vel {:?} grounded={} camera={}",
        now,
        player_rect,
        session.level.player.velocity,
        session.level.player.on_ground,
        result.camera_offset
    );

    result.events = session.take_events();
    result
}

fn update_enemies(session: &mut Session) {
    let now = session.tick;
    let mut reversed = Vec::new();
    let bounds = PatrolBounds::new(
        session.level.world_width(),
        session.tuning.viewport_width,
        session.level.tile_size(),
    );

    let (enemies, tiles) = session.level.enemies_and_tiles_mut();
    for enemy in enemies.values_mut() {
        if update_enemy(enemy, tiles, &bounds) {
            reversed.push(enemy.id);
        }
    }

    for enemy_id in reversed {
        debug!("enemy {} reversed at tick {}", enemy_id, now);
        session.push_event(GameEvent::enemy_reversed(now, enemy_id));
    }
}

/// Remove every coin under the player. Returns how many were taken.
fn collect_coins(session: &mut Session, player: &Rect) -> u32 {
    let hits = find_coin_contacts(player, &session.level.coins);
    let mut collected = 0;

    for coin_id in hits {
        if session.level.coins.remove(&coin_id).is_none() {
            continue;
        }
        collected += 1;
        session.score += 1;
        debug!("coin {} collected, score {}", coin_id, session.score);
        session.push_event(GameEvent::coin_collected(session.tick, coin_id, session.score));
    }

    collected
}

fn end_session(session: &mut Session, reason: EndReason, result: &mut TickResult) {
    session.phase = SessionPhase::Ended(reason);
    result.session_ended = true;
    result.end_reason = Some(reason);

    info!(
        "session ended at tick {}: {:?}, score {}",
        session.tick, reason, session.score
    );
    session.push_event(GameEvent::session_ended(session.tick, reason, session.score));
}

/// Replay a session from recorded inputs.
///
/// Input for simulated tick `t` (0-based) is `recording.input_at(t)`.
/// Stops early if the session ends. Returns the final session and every
/// event produced.
pub fn replay_session<S: AsRef<str>>(
    rows: &[S],
    config: GameConfig,
    recording: &InputRecording,
    tick_count: u32,
) -> Result<(Session, Vec<GameEvent>), LevelError> {
    let mut session = Session::new(rows, config)?;
    let mut all_events = Vec::new();

    for t in 0..tick_count {
        let result = tick(&mut session, &recording.input_at(t));
        all_events.extend(result.events);

        if result.session_ended {
            break;
        }
    }

    Ok((session, all_events))
}
