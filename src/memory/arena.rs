/*!
 * Memory Arena
 * Ordered block list with placement lookups, splitting, and coalescing
 */

use super::types::{ArenaStats, Block, BlockView, PlacementStrategy};
use crate::core::types::{Pid, Size};
use log::info;

/// Ordered collection of contiguous blocks covering `[0, total_size)`.
///
/// Blocks are indexed by position; the dense ids visible through
/// [`MemoryArena::layout`] are derived from position and recomputed after
/// every structural change. The Next-Fit cursor is owned by the arena, so
/// independent simulation runs do not interfere.
#[derive(Debug, Clone)]
pub struct MemoryArena {
    blocks: Vec<Block>,
    total_size: Size,
    // Next-Fit scan start, as a position into `blocks`
    cursor: usize,
}

impl MemoryArena {
    /// Create an arena that starts as a single free block
    pub fn new(total_size: Size) -> Self {
        debug_assert!(total_size > 0);
        info!("Memory arena initialized with {} bytes", total_size);
        Self {
            blocks: vec![Block::free(0, total_size)],
            total_size,
            cursor: 0,
        }
    }

    pub fn total_size(&self) -> Size {
        self.total_size
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Snapshot of the layout with dense ids in offset order
    pub fn layout(&self) -> Vec<BlockView> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(id, b)| BlockView {
                id,
                offset: b.offset,
                size: b.size,
                free: b.is_free(),
                owner: b.owner,
            })
            .collect()
    }

    /// Arena occupancy statistics
    pub fn stats(&self) -> ArenaStats {
        let used: Size = self
            .blocks
            .iter()
            .filter(|b| !b.is_free())
            .map(|b| b.size)
            .sum();
        ArenaStats {
            total: self.total_size,
            used,
            free: self.total_size - used,
            allocated_blocks: self.blocks.iter().filter(|b| !b.is_free()).count(),
            free_blocks: self.blocks.iter().filter(|b| b.is_free()).count(),
            largest_free: self
                .blocks
                .iter()
                .filter(|b| b.is_free())
                .map(|b| b.size)
                .max()
                .unwrap_or(0),
        }
    }

    /// Find a block position for `size` under `strategy`.
    ///
    /// Returns `None` when no free block can hold the request; none of the
    /// strategies ever allocates in that case.
    pub fn find(&mut self, strategy: PlacementStrategy, size: Size) -> Option<usize> {
        match strategy {
            PlacementStrategy::FirstFit => self.find_first_fit(size),
            PlacementStrategy::BestFit => self.find_best_fit(size),
            PlacementStrategy::WorstFit => self.find_worst_fit(size),
            PlacementStrategy::NextFit => self.find_next_fit(size),
        }
    }

    /// First free block with room for `size`, in offset order
    pub fn find_first_fit(&self, size: Size) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.is_free() && b.size >= size)
    }

    /// Smallest adequate free block; ties go to the lowest offset
    pub fn find_best_fit(&self, size: Size) -> Option<usize> {
        let mut best: Option<(usize, Size)> = None;
        for (idx, block) in self.blocks.iter().enumerate() {
            if !block.is_free() || block.size < size {
                continue;
            }
            if best.map_or(true, |(_, best_size)| block.size < best_size) {
                best = Some((idx, block.size));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Largest adequate free block; ties go to the first encountered
    pub fn find_worst_fit(&self, size: Size) -> Option<usize> {
        let mut worst: Option<(usize, Size)> = None;
        for (idx, block) in self.blocks.iter().enumerate() {
            if !block.is_free() || block.size < size {
                continue;
            }
            if worst.map_or(true, |(_, worst_size)| block.size > worst_size) {
                worst = Some((idx, block.size));
            }
        }
        worst.map(|(idx, _)| idx)
    }

    /// Circular scan of all blocks exactly once, starting at the persisted
    /// cursor. On success the cursor moves to the winning block's position
    /// so the next search resumes there.
    pub fn find_next_fit(&mut self, size: Size) -> Option<usize> {
        let len = self.blocks.len();
        let start = if self.cursor < len { self.cursor } else { 0 };
        for step in 0..len {
            let idx = (start + step) % len;
            let block = &self.blocks[idx];
            if block.is_free() && block.size >= size {
                self.cursor = idx;
                return Some(idx);
            }
        }
        None
    }

    /// Allocate `size` bytes out of the free block at `index`.
    ///
    /// An exact fit flips the block to allocated in place; a larger block is
    /// shrunk to `size` and the remainder inserted immediately after it as a
    /// new free block. Returns the allocated block's dense id, valid only
    /// until the next structural change.
    pub fn split_and_allocate(&mut self, index: usize, pid: Pid, size: Size) -> usize {
        let block = &mut self.blocks[index];
        debug_assert!(block.is_free());
        debug_assert!(block.size >= size);

        if block.size > size {
            let remainder = Block::free(block.offset + size, block.size - size);
            block.size = size;
            block.owner = Some(pid);
            self.blocks.insert(index + 1, remainder);
        } else {
            block.owner = Some(pid);
        }
        index
    }

    /// Release every block owned by `pid`, then merge adjacent free runs.
    ///
    /// Freeing a pid that owns nothing is a no-op.
    pub fn free(&mut self, pid: Pid) {
        let mut released = 0;
        for block in &mut self.blocks {
            if block.owner == Some(pid) {
                block.owner = None;
                released += 1;
            }
        }
        if released > 0 {
            self.coalesce();
            info!("Freed {} block(s) owned by pid {}", released, pid);
        }
    }

    /// Merge every run of consecutive free blocks into a single block whose
    /// size is the sum of the run. Ids are derived from position, so the
    /// recompute is implicit.
    fn coalesce(&mut self) {
        let mut merged: Vec<Block> = Vec::with_capacity(self.blocks.len());
        for block in self.blocks.drain(..) {
            match merged.last_mut() {
                Some(last) if last.is_free() && block.is_free() => last.size += block.size,
                _ => merged.push(block),
            }
        }
        self.blocks = merged;
        // Positions shifted; an out-of-range cursor restarts the scan.
        if self.cursor >= self.blocks.len() {
            self.cursor = 0;
        }
    }
}
