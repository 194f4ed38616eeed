/*!
 * Buddy Ledger Library
 * Simulated buddy-system memory allocator
 */

pub mod core;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use crate::core::{Address, AllocatorConfig, Label, Size};
pub use memory::{
    Allocator, BlockStatus, BlockView, BuddyAllocator, LedgerSnapshot, MemoryError, MemoryInfo,
    MemoryPressure, MemoryResult, MemoryStats, SharedAllocator,
};
pub use monitoring::init_tracing;
