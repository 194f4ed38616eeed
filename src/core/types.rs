/*!
 * Core Types
 * Common types used across the allocator
 */

/// Offset from the base of the managed range
pub type Address = usize;

/// Extent of an address range
pub type Size = usize;

/// Opaque caller-supplied tag attached to an allocation for reporting
pub type Label = smartstring::alias::String;
