/*!
 * Shared Allocator
 * Thread-safe handle around a single buddy ledger
 */

use super::super::types::{LedgerSnapshot, MemoryResult, MemoryStats};
use super::BuddyAllocator;
use crate::core::types::{Address, Size};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle serializing every operation through one lock
///
/// Each allocate or deallocate holds the lock for its whole run, so other
/// threads never see a half-split or half-coalesced ledger.
#[derive(Debug, Clone)]
pub struct SharedAllocator {
    inner: Arc<Mutex<BuddyAllocator>>,
}

impl SharedAllocator {
    pub fn new(allocator: BuddyAllocator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(allocator)),
        }
    }

    pub fn allocate(&self, label: &str, size: Size) -> MemoryResult<Address> {
        self.inner.lock().allocate(label, size)
    }

    pub fn deallocate(&self, address: Address) -> MemoryResult<()> {
        self.inner.lock().deallocate(address)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn stats(&self) -> MemoryStats {
        self.inner.lock().stats()
    }

    /// Run `f` against the allocator while holding the lock
    pub fn with<R>(&self, f: impl FnOnce(&BuddyAllocator) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl From<BuddyAllocator> for SharedAllocator {
    fn from(allocator: BuddyAllocator) -> Self {
        Self::new(allocator)
    }
}
