/*!
 * Allocation and Deallocation
 */

use super::super::rounding::next_power_of_two;
use super::super::types::{MemoryError, MemoryPressure, MemoryResult};
use super::BuddyAllocator;
use crate::core::types::{Address, Size};
use log::{info, warn};

impl BuddyAllocator {
    /// Allocate a block of at least `size` units for `label`
    ///
    /// Returns the start of the allocated block. On failure the ledger is
    /// untouched.
    pub fn allocate(&mut self, label: &str, size: Size) -> MemoryResult<Address> {
        if size == 0 {
            warn!("Rejected zero-sized allocation for {}", label);
            return Err(MemoryError::InvalidSize(size));
        }

        // Overflowing requests can never fit, report them as exhaustion
        let rounded = next_power_of_two(size);
        let found = rounded.and_then(|required| {
            self.ledger
                .best_fit(required)
                .map(|index| (index, required))
        });

        let Some((index, required)) = found else {
            let required = rounded.unwrap_or(Size::MAX);
            let largest_free = self.ledger.largest_free();
            warn!(
                "Allocation failed for {}: requested {} (rounded to {}), largest free block is {}",
                label, size, required, largest_free
            );
            return Err(MemoryError::InsufficientMemory {
                requested: size,
                required,
                largest_free,
            });
        };

        let splits = self.ledger.split_down(index, required);
        self.ledger.mark_allocated(index, label.into());

        self.used_memory += required;
        self.peak_memory = self.peak_memory.max(self.used_memory);

        let address = self.ledger.blocks()[index].start;
        let ratio = self.used_memory as f64 / self.total_size() as f64;
        match MemoryPressure::from_ratio(ratio) {
            MemoryPressure::Low => info!(
                "Allocated {} (block {}) to {} at {} after {} splits",
                size, required, label, address, splits
            ),
            level => warn!(
                "Memory pressure {}: allocated {} (block {}) to {} at {} ({:.1}% used)",
                level,
                size,
                required,
                label,
                address,
                ratio * 100.0
            ),
        }

        Ok(address)
    }

    /// Free the allocated block starting at `address` and coalesce buddies
    pub fn deallocate(&mut self, address: Address) -> MemoryResult<()> {
        let Some(index) = self.ledger.find_allocated(address) else {
            warn!("No allocated block found at {}", address);
            return Err(MemoryError::AddressNotFound(address));
        };

        let size = self.ledger.blocks()[index].size;
        self.ledger.mark_free(index);
        self.used_memory -= size;

        let before = self.ledger.len();
        let merges = self.ledger.coalesce();
        info!(
            "Deallocated {} units at {}; coalesced {} buddy pairs ({} -> {} blocks)",
            size,
            address,
            merges,
            before,
            self.ledger.len()
        );

        Ok(())
    }
}
