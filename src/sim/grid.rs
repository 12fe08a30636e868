//! Staggered block grid
//!
//! Rows are stored top to bottom. Every row owns `columns` slots, but the
//! layout depends on the row's current index:
//! - even rows use slots `0..columns`, flush with the left wall
//! - odd rows are shifted right by half a block and use slots `1..columns`
//!
//! Slot 0 of an odd row is inactive: it is not laid out, collided with or
//! counted when checking whether the row is cleared. Because rows shift
//! when one is regenerated, a row's parity (and so its active slots) can
//! change over its lifetime.

use std::ops::Range;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Display colour of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Teal,
    Carrot,
}

impl BlockColor {
    pub const PALETTE: [BlockColor; 8] = [
        BlockColor::Red,
        BlockColor::Orange,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::Blue,
        BlockColor::Purple,
        BlockColor::Teal,
        BlockColor::Carrot,
    ];

    /// 0xRRGGBB value for renderers
    pub fn rgb(self) -> u32 {
        match self {
            BlockColor::Red => 0xe74c3c,
            BlockColor::Orange => 0xf39c12,
            BlockColor::Yellow => 0xf1c40f,
            BlockColor::Green => 0x2ecc71,
            BlockColor::Blue => 0x3498db,
            BlockColor::Purple => 0x9b59b6,
            BlockColor::Teal => 0x1abc9c,
            BlockColor::Carrot => 0xe67e22,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::PALETTE[rng.random_range(0..Self::PALETTE.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStatus {
    Alive,
    Destroyed,
}

/// A single destructible rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub status: BlockStatus,
    pub color: BlockColor,
}

impl Block {
    pub fn is_alive(&self) -> bool {
        self.status == BlockStatus::Alive
    }

    /// Strict point-in-rectangle test (points on an edge are outside)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.pos.x
            && p.x < self.pos.x + self.size.x
            && p.y > self.pos.y
            && p.y < self.pos.y + self.size.y
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn overlaps(&self, other: &Block) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.pos.x < b_max.x && other.pos.x < a_max.x && self.pos.y < b_max.y && other.pos.y < a_max.y
    }
}

/// One horizontal row of slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Stable identity, survives index shifts
    pub id: u32,
    pub slots: Vec<Block>,
}

/// Owned 2-D block container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockGrid {
    columns: usize,
    block_size: Vec2,
    rows: Vec<Row>,
    next_row_id: u32,
}

impl BlockGrid {
    /// Build a full grid of alive blocks
    pub fn new(settings: &Settings, rng: &mut impl Rng) -> Self {
        let mut grid = Self {
            columns: settings.block_columns,
            block_size: Vec2::new(settings.block_width, settings.block_height),
            rows: Vec::with_capacity(settings.block_rows),
            next_row_id: 1,
        };
        for _ in 0..settings.block_rows {
            let row = grid.fresh_row(rng);
            grid.rows.push(row);
        }
        grid.layout_rows();
        grid
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Slots that are laid out for a row at `index`
    pub fn active_columns(&self, index: usize) -> Range<usize> {
        if index.is_multiple_of(2) {
            0..self.columns
        } else {
            1..self.columns
        }
    }

    /// Active block at (row, column), if that slot is laid out
    pub fn get(&self, row: usize, column: usize) -> Option<&Block> {
        if !self.active_columns(row).contains(&column) {
            return None;
        }
        self.rows.get(row)?.slots.get(column)
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut Block> {
        if !self.active_columns(row).contains(&column) {
            return None;
        }
        self.rows.get_mut(row)?.slots.get_mut(column)
    }

    /// All active blocks with their (row, column), top to bottom
    pub fn active_blocks(&self) -> impl Iterator<Item = (usize, usize, &Block)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(r, row)| {
            self.active_columns(r)
                .filter_map(move |c| row.slots.get(c).map(|b| (r, c, b)))
        })
    }

    pub fn alive_blocks(&self) -> impl Iterator<Item = (usize, usize, &Block)> + '_ {
        self.active_blocks().filter(|(_, _, b)| b.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive_blocks().count()
    }

    /// Current index of the row with this id
    pub fn row_index(&self, id: u32) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    /// True if every active slot in the row is destroyed
    pub fn row_cleared(&self, index: usize) -> bool {
        let Some(row) = self.rows.get(index) else {
            return false;
        };
        self.active_columns(index)
            .all(|c| row.slots.get(c).is_none_or(|b| !b.is_alive()))
    }

    /// Topmost row whose active slots are all destroyed
    pub fn first_cleared_row(&self) -> Option<usize> {
        (0..self.rows.len()).find(|&r| self.row_cleared(r))
    }

    /// Drop the row at `index`, push a fresh row on top and re-lay out
    /// every row by its new index. Returns the new row's id.
    pub fn regenerate_row(&mut self, index: usize, rng: &mut impl Rng) -> u32 {
        self.rows.remove(index);
        let row = self.fresh_row(rng);
        let id = row.id;
        self.rows.insert(0, row);
        self.layout_rows();
        log::debug!("Row {} cleared, regenerated as row id {}", index, id);
        id
    }

    fn fresh_row(&mut self, rng: &mut impl Rng) -> Row {
        let id = self.next_row_id;
        self.next_row_id += 1;
        let slots = (0..self.columns)
            .map(|_| Block {
                pos: Vec2::ZERO,
                size: self.block_size,
                status: BlockStatus::Alive,
                color: BlockColor::random(rng),
            })
            .collect();
        Row { id, slots }
    }

    /// Recompute every block position from its row index and slot
    fn layout_rows(&mut self) {
        let size = self.block_size;
        for (r, row) in self.rows.iter_mut().enumerate() {
            let y = r as f32 * size.y;
            let odd = r % 2 != 0;
            for (c, block) in row.slots.iter_mut().enumerate() {
                let x = if odd {
                    // Slot 0 is inactive on odd rows; park it under slot 1
                    c.saturating_sub(1) as f32 * size.x + size.x / 2.0
                } else {
                    c as f32 * size.x
                };
                block.pos = Vec2::new(x, y);
            }
        }
    }
}
