//! Game State Definitions
//!
//! Entity records, the level that owns them, and the session wrapping a
//! level with score and phase. Uses BTreeMap for deterministic iteration
//! order of the mutable entity sets.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::core::fixed::{to_float, Fixed};
use crate::core::rect::Rect;
use crate::core::vec2::FixedVec2;
use crate::core::hash::{StateHash, compute_state_hash};
use crate::game::config::{GameConfig, Tuning};
use crate::game::events::GameEvent;
use crate::game::level::{load_level, LevelError};

/// Stable identifier for coins and enemies, assigned in row-major order.
pub type EntityId = u32;

// =============================================================================
// ENTITIES
// =============================================================================

/// Static, grid-aligned block. Never moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Occupied space
    pub rect: Rect,
}

impl Tile {
    /// Create a tile covering grid cell `(column, row)`.
    pub fn at_cell(column: i32, row: i32, tile_size: Fixed) -> Self {
        Self {
            rect: Rect::new(column * tile_size, row * tile_size, tile_size, tile_size),
        }
    }
}

/// Collectible, half a tile in size and centered in its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Coin id
    pub id: EntityId,
    /// Occupied space
    pub rect: Rect,
}

impl Coin {
    /// Create a coin centered in grid cell `(column, row)`.
    pub fn at_cell(id: EntityId, column: i32, row: i32, tile_size: Fixed) -> Self {
        let size = tile_size >> 1;
        let inset = (tile_size - size) >> 1;
        Self {
            id,
            rect: Rect::new(column * tile_size + inset, row * tile_size + inset, size, size),
        }
    }
}

/// Patrolling enemy. Speed magnitude is fixed; only the sign flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Enemy id
    pub id: EntityId,
    /// Occupied space
    pub rect: Rect,
    /// Horizontal velocity (units per tick)
    pub velocity_x: Fixed,
}

impl Enemy {
    /// Create an enemy in grid cell `(column, row)`, initially walking left.
    pub fn at_cell(id: EntityId, column: i32, row: i32, tile_size: Fixed, speed: Fixed) -> Self {
        Self {
            id,
            rect: Rect::new(column * tile_size, row * tile_size, tile_size, tile_size),
            velocity_x: -speed,
        }
    }
}

/// The player-controlled character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Occupied space
    pub rect: Rect,
    /// Velocity (units per tick, +Y down)
    pub velocity: FixedVec2,
    /// Resting on a tile as of the last vertical resolution
    pub on_ground: bool,
}

impl Player {
    /// Create a player in grid cell `(column, row)`, airborne and at rest.
    pub fn at_cell(column: i32, row: i32, tile_size: Fixed) -> Self {
        Self {
            rect: Rect::new(column * tile_size, row * tile_size, tile_size, tile_size),
            velocity: FixedVec2::ZERO,
            on_ground: false,
        }
    }
}

/// Entity type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EntityKind {
    /// Static block
    Tile = 0,
    /// Collectible
    Coin = 1,
    /// Patrolling enemy
    Enemy = 2,
    /// The player
    Player = 3,
}

/// Borrowed view over any entity in a level.
#[derive(Clone, Copy, Debug)]
pub enum Entity<'a> {
    /// A tile
    Tile(&'a Tile),
    /// A coin
    Coin(&'a Coin),
    /// An enemy
    Enemy(&'a Enemy),
    /// The player
    Player(&'a Player),
}

impl Entity<'_> {
    /// Type tag.
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Tile(_) => EntityKind::Tile,
            Entity::Coin(_) => EntityKind::Coin,
            Entity::Enemy(_) => EntityKind::Enemy,
            Entity::Player(_) => EntityKind::Player,
        }
    }

    /// Occupied space.
    pub fn rect(&self) -> Rect {
        match self {
            Entity::Tile(t) => t.rect,
            Entity::Coin(c) => c.rect,
            Entity::Enemy(e) => e.rect,
            Entity::Player(p) => p.rect,
        }
    }
}

// =============================================================================
// LEVEL
// =============================================================================

/// All entities of a loaded level.
///
/// Tiles are immutable after construction and kept in row-major order;
/// that order is the iteration order collision resolution relies on.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Level {
    /// Static blocks (row-major)
    tiles: Vec<Tile>,

    /// Remaining coins (BTreeMap for deterministic iteration)
    pub coins: BTreeMap<EntityId, Coin>,

    /// Enemies (BTreeMap for deterministic iteration)
    pub enemies: BTreeMap<EntityId, Enemy>,

    /// The player
    pub player: Player,

    /// Widest row, in cells
    columns: u32,

    /// Number of rows
    rows: u32,

    /// Grid cell edge length
    tile_size: Fixed,
}

impl Level {
    pub(crate) fn new(
        tiles: Vec<Tile>,
        coins: BTreeMap<EntityId, Coin>,
        enemies: BTreeMap<EntityId, Enemy>,
        player: Player,
        (columns, rows): (u32, u32),
        tile_size: Fixed,
    ) -> Self {
        Self { tiles, coins, enemies, player, columns, rows, tile_size }
    }

    /// Static blocks in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Grid width in cells (longest row).
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Grid height in cells.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Grid cell edge length.
    pub fn tile_size(&self) -> Fixed {
        self.tile_size
    }

    /// World width in units.
    pub fn world_width(&self) -> Fixed {
        self.columns as Fixed * self.tile_size
    }

    /// Player and the tile set, borrowed together for a controller update.
    pub(crate) fn player_and_tiles_mut(&mut self) -> (&mut Player, &[Tile]) {
        (&mut self.player, &self.tiles)
    }

    /// Enemies and the tile set, borrowed together for controller updates.
    pub(crate) fn enemies_and_tiles_mut(&mut self) -> (&mut BTreeMap<EntityId, Enemy>, &[Tile]) {
        (&mut self.enemies, &self.tiles)
    }

    /// Every entity, in draw order: tiles, coins, enemies, player.
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.tiles
            .iter()
            .map(Entity::Tile)
            .chain(self.coins.values().map(Entity::Coin))
            .chain(self.enemies.values().map(Entity::Enemy))
            .chain(std::iter::once(Entity::Player(&self.player)))
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EndReason {
    /// Player overlapped an enemy
    CaughtByEnemy = 1,
    /// Player dropped below the viewport
    FellOffWorld = 2,
}

/// Current phase of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Ticks advance the simulation
    #[default]
    Running,
    /// Terminal; ticks are no-ops
    Ended(EndReason),
}

/// One playthrough from level load to a terminal state.
///
/// Sessions are built from rows with [`Session::new`], which validates the
/// config and loads the level with the same tile size. A level loaded
/// separately cannot be paired with another config:
///
/// ```compile_fail
/// use scroll_runner::{load_level, GameConfig, Session};
///
/// let level = load_level(&["P"], &GameConfig::default()).unwrap();
/// let config = GameConfig { tile_size: 64, ..GameConfig::default() };
/// let _ = Session::from_level(level, config);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    /// Configuration the session was built with
    pub config: GameConfig,

    /// Fixed-point form of `config`
    pub tuning: Tuning,

    /// Entities
    pub level: Level,

    /// Ticks simulated so far
    pub tick: u32,

    /// Coins collected so far
    pub score: u32,

    /// Running or ended
    pub phase: SessionPhase,

    /// Events generated this tick (drained into the tick result)
    pending_events: Vec<GameEvent>,
}

impl Session {
    /// Build a session from level rows.
    ///
    /// Fails if the level has no player start, is too large for the world
    /// range, or the config is invalid. A session is never created in a
    /// state the tick loop cannot run.
    pub fn new<S: AsRef<str>>(rows: &[S], config: GameConfig) -> Result<Self, LevelError> {
        let level = load_level(rows, &config)?;
        info!(
            "session started: {} coins, {} enemies, world width {:.0}",
            level.coins.len(),
            level.enemies.len(),
            to_float(level.world_width())
        );
        Ok(Self::from_level(level, config))
    }

    /// Build a session from newline-separated level text.
    pub fn from_text(text: &str, config: GameConfig) -> Result<Self, LevelError> {
        let rows: Vec<&str> = text.lines().collect();
        Self::new(&rows, config)
    }

    /// Wrap an already loaded level.
    pub(crate) fn from_level(level: Level, config: GameConfig) -> Self {
        let tuning = config.tuning();
        Self {
            config,
            tuning,
            level,
            tick: 0,
            score: 0,
            phase: SessionPhase::Running,
            pending_events: Vec::new(),
        }
    }

    /// Has the session reached a terminal state?
    pub fn is_ended(&self) -> bool {
        matches!(self.phase, SessionPhase::Ended(_))
    }

    /// Terminal reason, if ended.
    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            SessionPhase::Ended(reason) => Some(reason),
            SessionPhase::Running => None,
        }
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.score, |hasher| {
            match self.phase {
                SessionPhase::Running => hasher.update_u8(0),
                SessionPhase::Ended(reason) => hasher.update_u8(reason as u8),
            }

            let player = &self.level.player;
            hasher.update_rect(&player.rect);
            hasher.update_vec2(player.velocity);
            hasher.update_bool(player.on_ground);

            for (id, enemy) in &self.level.enemies {
                hasher.update_u32(*id);
                hasher.update_rect(&enemy.rect);
                hasher.update_fixed(enemy.velocity_x);
            }

            // Tiles never change; remaining coins do
            hasher.update_u32(self.level.coins.len() as u32);
            for id in self.level.coins.keys() {
                hasher.update_u32(*id);
            }
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::from_int;

    const TILE: Fixed = 32 << 16;

    #[test]
    fn test_tile_is_grid_aligned() {
        let tile = Tile::at_cell(3, 2, TILE);
        assert_eq!(tile.rect.x % TILE, 0);
        assert_eq!(tile.rect.y % TILE, 0);
        assert_eq!(tile.rect, Rect::new(from_int(96), from_int(64), TILE, TILE));
    }

    #[test]
    fn test_coin_centered_in_cell() {
        let coin = Coin::at_cell(0, 1, 1, TILE);
        assert_eq!(coin.rect, Rect::new(from_int(40), from_int(40), from_int(16), from_int(16)));
        assert_eq!(coin.rect.center_x(), Tile::at_cell(1, 1, TILE).rect.center_x());
    }

    #[test]
    fn test_enemy_starts_walking_left() {
        let enemy = Enemy::at_cell(0, 0, 0, TILE, from_int(2));
        assert_eq!(enemy.velocity_x, -from_int(2));
    }

    #[test]
    fn test_entities_in_draw_order() {
        let session = Session::from_text("#C\nGP", GameConfig::default()).unwrap();
        let kinds: Vec<_> = session.level.entities().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![EntityKind::Tile, EntityKind::Coin, EntityKind::Enemy, EntityKind::Player]
        );
    }

    #[test]
    fn test_session_hash_determinism() {
        let a = Session::from_text("#C\nGP", GameConfig::default()).unwrap();
        let b = Session::from_text("#C\nGP", GameConfig::default()).unwrap();
        assert_eq!(a.compute_hash(), b.compute_hash());

        let mut c = b.clone();
        c.level.coins.clear();
        assert_ne!(a.compute_hash(), c.compute_hash());
    }

    #[test]
    fn test_end_reason_accessor() {
        let mut session = Session::from_text("P", GameConfig::default()).unwrap();
        assert!(!session.is_ended());
        assert_eq!(session.end_reason(), None);

        session.phase = SessionPhase::Ended(EndReason::FellOffWorld);
        assert!(session.is_ended());
        assert_eq!(session.end_reason(), Some(EndReason::FellOffWorld));
    }
}
