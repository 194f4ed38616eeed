/*!
 * Block Ledger
 * Ordered partition of the managed range into power-of-two blocks
 */

use super::super::types::{BlockStatus, BlockView, MemoryError, MemoryResult};
use crate::core::types::{Address, Label, Size};
use log::debug;

/// One contiguous address range inside the managed space
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Block {
    pub start: Address,
    pub size: Size,
    pub status: BlockStatus,
    pub label: Option<Label>,
}

impl Block {
    fn free(start: Address, size: Size) -> Self {
        Self {
            start,
            size,
            status: BlockStatus::Free,
            label: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.status.is_free()
    }

    pub fn end(&self) -> Address {
        self.start + self.size
    }

    pub fn view(&self) -> BlockView {
        BlockView {
            start: self.start,
            size: self.size,
            status: self.status,
            label: self.label.clone(),
        }
    }

    /// True when `self` is the lower half and `next` the upper half of the
    /// same parent block
    fn is_lower_buddy_of(&self, next: &Block) -> bool {
        self.size == next.size
            && self.end() == next.start
            && self.start % (self.size * 2) == 0
    }
}

/// Ordered block list
///
/// Postconditions of every mutating method:
/// - blocks are sorted by `start` and tile `[0, total_size)` exactly
/// - every block size is a power of two
/// - no two free buddies sit next to each other
#[derive(Debug, Clone)]
pub(super) struct Ledger {
    blocks: Vec<Block>,
    total_size: Size,
}

impl Ledger {
    /// Caller guarantees `total_size` is a non-zero power of two
    pub fn new(total_size: Size) -> Self {
        Self {
            blocks: vec![Block::free(0, total_size)],
            total_size,
        }
    }

    pub fn total_size(&self) -> Size {
        self.total_size
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Index of the smallest free block holding `required`, lowest start on ties
    pub fn best_fit(&self, required: Size) -> Option<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.is_free() && block.size >= required)
            .min_by_key(|(_, block)| (block.size, block.start))
            .map(|(index, _)| index)
    }

    pub fn largest_free(&self) -> Size {
        self.blocks
            .iter()
            .filter(|block| block.is_free())
            .map(|block| block.size)
            .max()
            .unwrap_or(0)
    }

    /// Index of the allocated block starting exactly at `address`
    pub fn find_allocated(&self, address: Address) -> Option<usize> {
        self.blocks
            .binary_search_by_key(&address, |block| block.start)
            .ok()
            .filter(|&index| !self.blocks[index].is_free())
    }

    /// Halve the free block at `index` until it is `required` wide
    ///
    /// Each split keeps the lower half at `index` and inserts the upper half
    /// right after it, so ordering holds without re-sorting. Returns the
    /// number of splits performed.
    pub fn split_down(&mut self, index: usize, required: Size) -> usize {
        let mut splits = 0;
        while self.blocks[index].size > required {
            let block = &mut self.blocks[index];
            let half = block.size / 2;
            block.size = half;
            let buddy = Block::free(block.start + half, half);
            debug!(
                "Split block at {} into two {}-blocks (buddy at {})",
                block.start, half, buddy.start
            );
            self.blocks.insert(index + 1, buddy);
            splits += 1;
        }
        splits
    }

    pub fn mark_allocated(&mut self, index: usize, label: Label) {
        let block = &mut self.blocks[index];
        block.status = BlockStatus::Allocated;
        block.label = Some(label);
    }

    pub fn mark_free(&mut self, index: usize) {
        let block = &mut self.blocks[index];
        block.status = BlockStatus::Free;
        block.label = None;
    }

    /// Merge free buddy pairs until none remain
    ///
    /// After a merge the cursor steps back one slot: the enlarged block may
    /// now be the upper buddy of its left neighbour or the lower buddy of its
    /// right one. Every merge removes a block, so the loop terminates.
    /// Returns the number of merges performed.
    pub fn coalesce(&mut self) -> usize {
        let mut merges = 0;
        let mut i = 0;
        while i + 1 < self.blocks.len() {
            let (current, next) = (&self.blocks[i], &self.blocks[i + 1]);
            if current.is_free() && next.is_free() && current.is_lower_buddy_of(next) {
                let merged_size = current.size * 2;
                debug!(
                    "Merged buddies at {} and {} into {}-block",
                    current.start, next.start, merged_size
                );
                self.blocks.remove(i + 1);
                self.blocks[i].size = merged_size;
                merges += 1;
                i = i.saturating_sub(1);
            } else {
                i += 1;
            }
        }
        merges
    }

    /// Check partition, power-of-two and buddy invariants
    pub fn verify(&self) -> MemoryResult<()> {
        let mut expected_start = 0;
        for (index, block) in self.blocks.iter().enumerate() {
            if block.start != expected_start {
                return Err(corruption(
                    block.start,
                    format!("expected block to start at {}", expected_start),
                ));
            }
            if block.size == 0 || !block.size.is_power_of_two() {
                return Err(corruption(
                    block.start,
                    format!("size {} is not a power of two", block.size),
                ));
            }
            if block.start % block.size != 0 {
                return Err(corruption(
                    block.start,
                    format!("start is not aligned to size {}", block.size),
                ));
            }
            if let Some(next) = self.blocks.get(index + 1) {
                if block.is_free() && next.is_free() && block.is_lower_buddy_of(next) {
                    return Err(corruption(
                        block.start,
                        format!("free buddy at {} left uncoalesced", next.start),
                    ));
                }
            }
            expected_start = block.end();
        }
        if expected_start != self.total_size {
            return Err(corruption(
                expected_start,
                format!("blocks end before total size {}", self.total_size),
            ));
        }
        Ok(())
    }
}

fn corruption(address: Address, reason: String) -> MemoryError {
    MemoryError::CorruptionDetected { address, reason }
}
