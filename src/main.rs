/*!
 * Buddy Ledger - Demonstration Driver
 *
 * Runs the reference allocation sequence against a fresh ledger and prints
 * the block layout before and after freeing two blocks.
 */

use buddy_ledger::{init_tracing, AllocatorConfig, BuddyAllocator};
use tracing::{info, warn};

/// (label, requested size) pairs allocated in order
const REQUESTS: [(&str, usize); 4] = [("A", 64), ("B", 128), ("C", 225), ("D", 256)];

/// Addresses released after the first state dump
const RELEASES: [usize; 2] = [0, 512];

fn main() -> miette::Result<()> {
    init_tracing();

    let config = AllocatorConfig::from_env();
    info!(total_size = config.total_size, "Starting buddy ledger demo");
    let mut allocator = BuddyAllocator::new(config)?;

    for (label, size) in REQUESTS {
        match allocator.allocate(label, size) {
            Ok(address) => info!(label, size, address, "allocation succeeded"),
            Err(e) => warn!(label, size, error = %e, "allocation failed"),
        }
    }

    println!("\n{}", allocator.snapshot());

    for address in RELEASES {
        match allocator.deallocate(address) {
            Ok(()) => info!(address, "deallocation succeeded"),
            Err(e) => warn!(address, error = %e, "deallocation failed"),
        }
    }

    println!("\n{}", allocator.snapshot());

    let stats = allocator.stats();
    info!(
        used = stats.used_memory,
        available = stats.available_memory,
        peak = stats.peak_memory,
        pressure = %stats.memory_pressure(),
        "Final ledger statistics"
    );

    allocator.verify()?;
    Ok(())
}
