/*!
 * Buddy Allocator
 *
 * Simulated buddy-system allocator over a fixed power-of-two range.
 *
 * ## Allocation
 *
 * - Requests are rounded up to the next power of two
 * - **Best fit**: the smallest free block that holds the rounded size wins,
 *   lowest start breaks ties
 * - The chosen block is halved until it matches, leaving one free buddy per
 *   split in the ledger
 *
 * ## Deallocation
 *
 * - The block is marked free and a full coalescing pass merges free buddy
 *   pairs, cascading up through as many size classes as possible
 *
 * No real memory backs the range; only offsets and free/used status are
 * tracked.
 */

mod allocator;
mod ledger;
mod shared;
mod stats;

pub use shared::SharedAllocator;

use super::traits::{Allocator, MemoryInfo};
use super::types::{LedgerSnapshot, MemoryResult, MemoryStats};
use crate::core::config::AllocatorConfig;
use crate::core::types::{Address, Size};
use ledger::Ledger;
use log::info;

/// Buddy allocator
///
/// Owns the block ledger exclusively. Not synchronized; wrap it in a
/// [`SharedAllocator`] when several threads need access.
#[derive(Debug, Clone)]
pub struct BuddyAllocator {
    ledger: Ledger,
    used_memory: Size,
    peak_memory: Size,
}

impl BuddyAllocator {
    /// Create an allocator from a validated configuration
    pub fn new(config: AllocatorConfig) -> MemoryResult<Self> {
        config.validate()?;
        info!(
            "Buddy allocator initialized with {} units in a single free block",
            config.total_size
        );
        Ok(Self::from_ledger(Ledger::new(config.total_size)))
    }

    /// Create an allocator managing `total` units
    pub fn with_capacity(total: Size) -> MemoryResult<Self> {
        Self::new(AllocatorConfig::new(total))
    }

    fn from_ledger(ledger: Ledger) -> Self {
        Self {
            ledger,
            used_memory: 0,
            peak_memory: 0,
        }
    }

    pub fn total_size(&self) -> Size {
        self.ledger.total_size()
    }

    /// Number of blocks currently in the ledger
    pub fn block_count(&self) -> usize {
        self.ledger.len()
    }

    /// Read-only copy of the ledger, ordered by start
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            total_size: self.ledger.total_size(),
            blocks: self.ledger.blocks().iter().map(|b| b.view()).collect(),
        }
    }

    /// Check the partition, power-of-two and buddy invariants
    pub fn verify(&self) -> MemoryResult<()> {
        self.ledger.verify()
    }
}

impl Default for BuddyAllocator {
    fn default() -> Self {
        Self::from_ledger(Ledger::new(AllocatorConfig::default().total_size))
    }
}

// Implement trait interfaces
impl Allocator for BuddyAllocator {
    fn allocate(&mut self, label: &str, size: Size) -> MemoryResult<Address> {
        BuddyAllocator::allocate(self, label, size)
    }

    fn deallocate(&mut self, address: Address) -> MemoryResult<()> {
        BuddyAllocator::deallocate(self, address)
    }

    fn is_valid(&self, address: Address) -> bool {
        BuddyAllocator::is_valid(self, address)
    }

    fn block_size(&self, address: Address) -> Option<Size> {
        BuddyAllocator::block_size(self, address)
    }
}

impl MemoryInfo for BuddyAllocator {
    fn stats(&self) -> MemoryStats {
        BuddyAllocator::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        BuddyAllocator::info(self)
    }

    fn snapshot(&self) -> LedgerSnapshot {
        BuddyAllocator::snapshot(self)
    }
}
