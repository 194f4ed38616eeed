/*!
 * Allocator Configuration
 */

use super::limits::{DEFAULT_TOTAL_SIZE, TOTAL_SIZE_ENV};
use super::types::Size;
use crate::memory::{MemoryError, MemoryResult};
use log::warn;
use serde::{Deserialize, Serialize};

/// Configuration for a buddy ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Extent of the managed range; must be a non-zero power of two
    pub total_size: Size,
}

impl AllocatorConfig {
    pub fn new(total_size: Size) -> Self {
        Self { total_size }
    }

    /// Read the managed range size from `BUDDY_TOTAL_SIZE`
    ///
    /// Falls back to the default when the variable is unset or unparsable.
    /// Validation happens when the allocator is built, not here.
    pub fn from_env() -> Self {
        match std::env::var(TOTAL_SIZE_ENV) {
            Ok(raw) => match raw.trim().parse::<Size>() {
                Ok(total_size) => Self::new(total_size),
                Err(e) => {
                    warn!(
                        "Ignoring {}={:?} ({}), using default size {}",
                        TOTAL_SIZE_ENV, raw, e, DEFAULT_TOTAL_SIZE
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn validate(&self) -> MemoryResult<()> {
        if self.total_size == 0 || !self.total_size.is_power_of_two() {
            return Err(MemoryError::InvalidTotalSize(self.total_size));
        }
        Ok(())
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_SIZE)
    }
}
