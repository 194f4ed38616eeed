/*!
 * Memory Module
 * Buddy-system allocation over a simulated address range
 */

pub mod manager;
pub mod rounding;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::{BuddyAllocator, SharedAllocator};
pub use rounding::next_power_of_two;
pub use traits::*;
pub use types::*;
