//! The block wall
//!
//! Blocks live in a flat arena in row-major order. A destroyed block keeps
//! its slot with `live == false`, so indices stay stable while the ball's
//! collision pass walks the wall and damages blocks.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Durability for a block in the given row
///
/// Top two rows take three hits, the next two take two, the rest one.
pub fn durability_for_row(row: u32) -> u8 {
    match row {
        0 | 1 => 3,
        2 | 3 => 2,
        _ => 1,
    }
}

/// A destructible block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub row: u32,
    pub col: u32,
    pub bounds: Rect,
    /// Remaining hits before destruction
    pub durability: u8,
    pub live: bool,
}

/// Result of damaging one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHit {
    pub index: usize,
    /// Durability left after the hit
    pub durability: u8,
    pub destroyed: bool,
}

/// Grid of blocks for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub cols: u32,
    pub rows: u32,
    blocks: Vec<Block>,
}

impl Wall {
    /// Tile the play area top-down, left-right
    pub fn new(cols: u32, rows: u32, cell_width: f32, cell_height: f32) -> Self {
        let mut blocks = Vec::with_capacity(cols as usize * rows as usize);
        for row in 0..rows {
            for col in 0..cols {
                blocks.push(Block {
                    row,
                    col,
                    bounds: Rect::new(
                        col as f32 * cell_width,
                        row as f32 * cell_height,
                        cell_width,
                        cell_height,
                    ),
                    durability: durability_for_row(row),
                    live: true,
                });
            }
        }
        Self { cols, rows, blocks }
    }

    /// Total slots, live or not
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Indices of live blocks in row-major order
    pub fn live_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.live)
            .map(|(i, _)| i)
    }

    /// Live blocks in row-major order
    pub fn live_blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter().filter(|b| b.live)
    }

    pub fn live_count(&self) -> usize {
        self.live_blocks().count()
    }

    /// All blocks destroyed (an empty grid counts as cleared)
    pub fn is_cleared(&self) -> bool {
        self.live_count() == 0
    }

    /// Take one point of durability from a live block
    ///
    /// Returns `None` for a dead or out-of-range index.
    pub fn hit(&mut self, index: usize) -> Option<BlockHit> {
        let block = self.blocks.get_mut(index).filter(|b| b.live)?;
        block.durability = block.durability.saturating_sub(1);
        if block.durability == 0 {
            block.live = false;
        }
        Some(BlockHit {
            index,
            durability: block.durability,
            destroyed: !block.live,
        })
    }
}
