//! Headless character renderer.
//!
//! Rasterizes the viewport into a grid of characters, one per cell.
//! Later sprites overwrite earlier ones, so draw order is preserved.

use crate::core::fixed::{Fixed, FIXED_ONE};
use crate::game::state::EntityKind;
use crate::render::frame::{Frame, Sprite};
use crate::render::Renderer;

const EMPTY: char = '.';

fn glyph(kind: EntityKind) -> char {
    match kind {
        EntityKind::Tile => '#',
        EntityKind::Coin => 'o',
        EntityKind::Enemy => 'G',
        EntityKind::Player => 'P',
    }
}

/// Renders frames to text.
#[derive(Clone, Debug)]
pub struct AsciiRenderer {
    cell_size: Fixed,
    output: String,
    frames_presented: u64,
}

impl AsciiRenderer {
    /// Create a renderer with one character per `cell_size` square.
    ///
    /// A non-positive cell size is treated as one world unit.
    pub fn new(cell_size: Fixed) -> Self {
        Self {
            cell_size: cell_size.max(FIXED_ONE),
            output: String::new(),
            frames_presented: 0,
        }
    }

    /// Text of the most recent frame.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Rasterize a frame without storing it.
    pub fn render(&self, frame: &Frame) -> String {
        let columns = cells(frame.viewport_width, self.cell_size);
        let rows = cells(frame.viewport_height, self.cell_size);
        let mut grid = vec![vec![EMPTY; columns]; rows];

        for sprite in &frame.sprites {
            self.stamp(&mut grid, sprite);
        }

        let mut text = String::with_capacity((columns + 1) * rows + 16);
        for row in &grid {
            text.extend(row.iter());
            text.push('\n');
        }
        text.push_str(&format!("score: {}", frame.score));
        text
    }

    fn stamp(&self, grid: &mut [Vec<char>], sprite: &Sprite) {
        let rows = grid.len() as i64;
        let columns = grid.first().map_or(0, |row| row.len()) as i64;
        let rect = &sprite.rect;

        // Cell range covered by [left, right) x [top, bottom)
        let col_start = cell_index(rect.left(), self.cell_size).max(0);
        let col_end = cell_index(rect.right() - 1, self.cell_size).min(columns - 1);
        let row_start = cell_index(rect.top(), self.cell_size).max(0);
        let row_end = cell_index(rect.bottom() - 1, self.cell_size).min(rows - 1);

        let ch = glyph(sprite.kind);
        for row in row_start..=row_end {
            for col in col_start..=col_end {
                grid[row as usize][col as usize] = ch;
            }
        }
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(32 << 16)
    }
}

impl Renderer for AsciiRenderer {
    fn present(&mut self, frame: &Frame) {
        self.output = self.render(frame);
        self.frames_presented += 1;
    }
}

fn cells(extent: Fixed, cell_size: Fixed) -> usize {
    (extent.max(0) / cell_size) as usize
}

fn cell_index(coord: Fixed, cell_size: Fixed) -> i64 {
    i64::from(coord).div_euclid(i64::from(cell_size))
}
