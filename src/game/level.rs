//! Level Parsing
//!
//! Turns a character grid into entity placements. The grid is discarded
//! once the level is built.
//!
//! | symbol | entity              |
//! |--------|---------------------|
//! | `#`    | tile                |
//! | `P`    | player start        |
//! | `G`    | enemy               |
//! | `C`    | coin                |
//! | other  | empty               |

use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::fixed::checked_from_int;
use crate::game::config::{ConfigError, GameConfig};
use crate::game::state::{Coin, Enemy, EntityId, Level, Player, Tile};

/// Built-in level: a raised ledge, a walled enemy pit and an open gap in
/// the floor. Dropping through the gap ends the session.
pub const DEFAULT_LEVEL: [&str; 11] = [
    "........................................",
    "........................................",
    "........................................",
    "..............C...C...C.................",
    "........................................",
    "............##########..................",
    "......................................C.",
    "#####.............................######",
    "...........C............................",
    "P.......#.....G.....#..........C........",
    "##########################.....#########",
];

/// Level construction errors.
#[derive(Debug, Error)]
pub enum LevelError {
    /// No `P` symbol anywhere in the grid.
    #[error("level has no player start")]
    MissingPlayer,

    /// Grid extent does not fit the fixed-point world range.
    #[error("level of {columns}x{rows} cells exceeds the world range")]
    TooLarge {
        /// Longest row length
        columns: usize,
        /// Row count
        rows: usize,
    },

    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Parse level rows into a populated `Level`.
///
/// Rows may differ in length. If several `P` symbols appear, the last one in
/// row-major order is the player start.
pub fn load_level<S: AsRef<str>>(rows: &[S], config: &GameConfig) -> Result<Level, LevelError> {
    config.validate()?;
    let tile_size = config.tuning().tile_size;
    let enemy_speed = config.tuning().enemy_speed;

    let columns = rows
        .iter()
        .map(|row| row.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    // Both the far edge of the grid and one cell past it must fit.
    let max_extent = (columns.max(rows.len()) as i64 + 1) * i64::from(config.tile_size);
    if checked_from_int(max_extent).is_none() {
        return Err(LevelError::TooLarge { columns, rows: rows.len() });
    }

    let mut tiles = Vec::new();
    let mut coins = BTreeMap::new();
    let mut enemies = BTreeMap::new();
    let mut player: Option<Player> = None;
    let mut next_id: EntityId = 0;

    for (row_idx, row) in rows.iter().enumerate() {
        let y = row_idx as i32;
        for (col_idx, symbol) in row.as_ref().chars().enumerate() {
            let x = col_idx as i32;
            match symbol {
                '#' => tiles.push(Tile::at_cell(x, y, tile_size)),
                'C' => {
                    coins.insert(next_id, Coin::at_cell(next_id, x, y, tile_size));
                    next_id += 1;
                }
                'G' => {
                    enemies.insert(next_id, Enemy::at_cell(next_id, x, y, tile_size, enemy_speed));
                    next_id += 1;
                }
                'P' => {
                    if player.is_some() {
                        warn!("duplicate player start at ({}, {}), using the later one", x, y);
                    }
                    player = Some(Player::at_cell(x, y, tile_size));
                }
                _ => {}
            }
        }
    }

    let player = player.ok_or(LevelError::MissingPlayer)?;

    debug!(
        "loaded {}x{} level: {} tiles, {} coins, {} enemies",
        columns,
        rows.len(),
        tiles.len(),
        coins.len(),
        enemies.len()
    );

    Ok(Level::new(
        tiles,
        coins,
        enemies,
        player,
        (columns as u32, rows.len() as u32),
        tile_size,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::from_int;
    use crate::core::rect::Rect;

    #[test]
    fn test_symbols_map_to_entities() {
        let rows = ["#.C", "G.P", "x#?"];
        let level = load_level(&rows, &GameConfig::default()).unwrap();

        assert_eq!(level.tiles().len(), 2);
        assert_eq!(level.coins.len(), 1);
        assert_eq!(level.enemies.len(), 1);
        assert_eq!(level.player.rect, Rect::new(from_int(64), from_int(32), from_int(32), from_int(32)));
        assert!(!level.player.on_ground);
        assert_eq!(level.columns(), 3);
        assert_eq!(level.rows(), 3);
    }

    #[test]
    fn test_tiles_row_major_order() {
        let rows = [".#", "#P"];
        let level = load_level(&rows, &GameConfig::default()).unwrap();
        let positions: Vec<_> = level.tiles().iter().map(|t| (t.rect.x, t.rect.y)).collect();
        assert_eq!(positions, vec![(from_int(32), 0), (0, from_int(32))]);
    }

    #[test]
    fn test_ragged_rows() {
        let rows = ["#", "###P", ""];
        let level = load_level(&rows, &GameConfig::default()).unwrap();
        assert_eq!(level.tiles().len(), 4);
        assert_eq!(level.columns(), 4);
        assert_eq!(level.rows(), 3);
        assert_eq!(level.world_width(), from_int(128));
    }

    #[test]
    fn test_ids_assigned_row_major() {
        let rows = ["CG", "GC", "P"];
        let level = load_level(&rows, &GameConfig::default()).unwrap();
        assert_eq!(level.coins.keys().copied().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(level.enemies.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_missing_player() {
        let rows = ["####", "G..C"];
        assert!(matches!(
            load_level(&rows, &GameConfig::default()),
            Err(LevelError::MissingPlayer)
        ));
        let empty: [&str; 0] = [];
        assert!(matches!(
            load_level(&empty, &GameConfig::default()),
            Err(LevelError::MissingPlayer)
        ));
    }

    #[test]
    fn test_last_player_start_wins() {
        let rows = ["P..", "..P"];
        let level = load_level(&rows, &GameConfig::default()).unwrap();
        assert_eq!(level.player.rect.x, from_int(64));
        assert_eq!(level.player.rect.y, from_int(32));
    }

    #[test]
    fn test_too_large() {
        let wide = format!("P{}", ".".repeat(1100));
        let rows = [wide.as_str()];
        assert!(matches!(
            load_level(&rows, &GameConfig::default()),
            Err(LevelError::TooLarge { columns: 1101, rows: 1 })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let config = GameConfig { tile_size: 0, ..GameConfig::default() };
        assert!(matches!(
            load_level(&["P"], &config),
            Err(LevelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_default_level_loads() {
        let level = load_level(&DEFAULT_LEVEL, &GameConfig::default()).unwrap();
        assert_eq!(level.columns(), 40);
        assert_eq!(level.rows(), 11);
        assert_eq!(level.enemies.len(), 1);
        assert_eq!(level.coins.len(), 6);
        assert_eq!(level.player.rect.y, from_int(9 * 32));
    }
}
