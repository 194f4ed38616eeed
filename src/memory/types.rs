/*!
 * Memory Types
 * Common types for the buddy ledger
 */

use crate::core::limits::{
    PRESSURE_CRITICAL_THRESHOLD, PRESSURE_HIGH_THRESHOLD, PRESSURE_MEDIUM_THRESHOLD,
};
use crate::core::types::{Address, Label, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant is recoverable: the ledger is left exactly as it was
/// before the failing call.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Insufficient memory: requested {requested} (rounded to {required}), largest free block is {largest_free}")]
    #[diagnostic(
        code(memory::insufficient_memory),
        help("Free existing allocations so their buddies can coalesce, then retry.")
    )]
    InsufficientMemory {
        requested: Size,
        required: Size,
        largest_free: Size,
    },

    #[error("No allocated block starts at address {0}")]
    #[diagnostic(
        code(memory::address_not_found),
        help("The block may already have been freed, or the address was never returned by allocate.")
    )]
    AddressNotFound(Address),

    #[error("Invalid allocation size: {0}")]
    #[diagnostic(
        code(memory::invalid_size),
        help("Allocation requests must be at least 1.")
    )]
    InvalidSize(Size),

    #[error("Invalid total size: {0} is not a non-zero power of two")]
    #[diagnostic(
        code(memory::invalid_total_size),
        help("Configure the managed range with a power of two, e.g. 1024.")
    )]
    InvalidTotalSize(Size),

    #[error("Ledger corruption detected at {address}: {reason}")]
    #[diagnostic(code(memory::corruption_detected))]
    CorruptionDetected { address: Address, reason: String },
}

/// Free/used state of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Free,
    Allocated,
}

impl BlockStatus {
    pub fn is_free(self) -> bool {
        matches!(self, BlockStatus::Free)
    }
}

impl fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BlockStatus::Free => write!(f, "Free"),
            BlockStatus::Allocated => write!(f, "Allocated"),
        }
    }
}

/// Read-only view of one ledger block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockView {
    pub start: Address,
    pub size: Size,
    pub status: BlockStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
}

impl BlockView {
    /// One past the last address covered by the block
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    pub fn is_free(&self) -> bool {
        self.status.is_free()
    }
}

impl fmt::Display for BlockView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Start: {}, Size: {}, {}", self.start, self.size, self.status)?;
        if let Some(label) = &self.label {
            write!(f, " ({})", label)?;
        }
        Ok(())
    }
}

/// Owned copy of the ledger, ordered by ascending start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub total_size: Size,
    pub blocks: Vec<BlockView>,
}

impl LedgerSnapshot {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BlockView> {
        self.blocks.iter()
    }

    /// `(start, size, status)` triples, the minimal display form
    pub fn layout(&self) -> Vec<(Address, Size, BlockStatus)> {
        self.blocks
            .iter()
            .map(|b| (b.start, b.size, b.status))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<'a> IntoIterator for &'a LedgerSnapshot {
    type Item = &'a BlockView;
    type IntoIter = std::slice::Iter<'a, BlockView>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl fmt::Display for LedgerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Memory State ({} total):", self.total_size)?;
        for block in &self.blocks {
            writeln!(f, "{}", block)?;
        }
        Ok(())
    }
}

/// Memory statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: usize,
    pub used_memory: usize,
    pub available_memory: usize,
    pub peak_memory: usize,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: usize,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.usage_percentage / 100.0)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= PRESSURE_CRITICAL_THRESHOLD {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH_THRESHOLD {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
