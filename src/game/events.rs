//! Game Events
//!
//! Events generated during a tick. They describe what happened for the
//! driver (logging, sound, UI) and never feed back into the simulation.

use serde::{Serialize, Deserialize};
use crate::game::state::{EndReason, EntityId};

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Player left the ground with a jump impulse
    PlayerJumped,

    /// Player came to rest on top of a tile after being airborne
    PlayerLanded,

    /// Enemy hit a tile and turned around
    EnemyReversed {
        enemy_id: EntityId,
    },

    /// Player picked up a coin
    CoinCollected {
        coin_id: EntityId,
        new_score: u32,
    },

    /// Session reached a terminal state
    SessionEnded {
        reason: EndReason,
        score: u32,
    },
}

/// A game event with the tick it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create player jumped event.
    pub fn player_jumped(tick: u32) -> Self {
        Self::new(tick, GameEventData::PlayerJumped)
    }

    /// Create player landed event.
    pub fn player_landed(tick: u32) -> Self {
        Self::new(tick, GameEventData::PlayerLanded)
    }

    /// Create enemy reversed event.
    pub fn enemy_reversed(tick: u32, enemy_id: EntityId) -> Self {
        Self::new(tick, GameEventData::EnemyReversed { enemy_id })
    }

    /// Create coin collected event.
    pub fn coin_collected(tick: u32, coin_id: EntityId, new_score: u32) -> Self {
        Self::new(tick, GameEventData::CoinCollected { coin_id, new_score })
    }

    /// Create session ended event.
    pub fn session_ended(tick: u32, reason: EndReason, score: u32) -> Self {
        Self::new(tick, GameEventData::SessionEnded { reason, score })
    }

    /// Is this a terminal event?
    pub fn is_terminal(&self) -> bool {
        matches!(self.data, GameEventData::SessionEnded { .. })
    }
}
