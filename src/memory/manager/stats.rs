/*!
 * Ledger Queries
 * Statistics and per-address lookups
 */

use super::super::types::MemoryStats;
use super::BuddyAllocator;
use crate::core::types::{Address, Size};

impl BuddyAllocator {
    /// Check if an allocated block starts at `address`
    pub fn is_valid(&self, address: Address) -> bool {
        self.ledger.find_allocated(address).is_some()
    }

    /// Size of the allocated block starting at `address`
    pub fn block_size(&self, address: Address) -> Option<Size> {
        self.ledger
            .find_allocated(address)
            .map(|index| self.ledger.blocks()[index].size)
    }

    /// Get memory info as (total, used, available)
    pub fn info(&self) -> (Size, Size, Size) {
        let total = self.total_size();
        (total, self.used_memory, total - self.used_memory)
    }

    pub fn stats(&self) -> MemoryStats {
        let total = self.total_size();
        let blocks = self.ledger.blocks();
        let free_blocks = blocks.iter().filter(|b| b.is_free()).count();

        MemoryStats {
            total_memory: total,
            used_memory: self.used_memory,
            available_memory: total - self.used_memory,
            peak_memory: self.peak_memory,
            usage_percentage: (self.used_memory as f64 / total as f64) * 100.0,
            allocated_blocks: blocks.len() - free_blocks,
            free_blocks,
            largest_free_block: self.ledger.largest_free(),
        }
    }
}
