/*!
 * Memory Traits
 * Allocator abstractions
 */

use super::types::*;
use crate::core::types::{Address, Size};

/// Allocator interface
pub trait Allocator {
    /// Allocate a block of at least `size` on behalf of `label`
    fn allocate(&mut self, label: &str, size: Size) -> MemoryResult<Address>;

    /// Release the allocated block starting at `address`
    fn deallocate(&mut self, address: Address) -> MemoryResult<()>;

    /// Check if an allocated block starts at `address`
    fn is_valid(&self, address: Address) -> bool;

    /// Get the size of the allocated block starting at `address`
    fn block_size(&self, address: Address) -> Option<Size>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Read-only copy of the ledger
    fn snapshot(&self) -> LedgerSnapshot;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
