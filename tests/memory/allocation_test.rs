/*!
 * Allocation Tests
 * Rounding, best-fit selection, splitting and failure paths
 */

use crate::common::{allocator, assert_partition, FREE, USED};
use buddy_ledger::{Allocator, BuddyAllocator, MemoryError, MemoryInfo, MemoryPressure};
use pretty_assertions::assert_eq;

#[test]
fn test_fresh_ledger_is_one_free_block() {
    let alloc = allocator(1024);
    assert_eq!(alloc.snapshot().layout(), vec![(0, 1024, FREE)]);
    assert_eq!(alloc.info(), (1024, 0, 1024));
}

#[test]
fn test_split_produces_buddy_chain() {
    let mut alloc = allocator(1024);

    let addr = alloc.allocate("A", 64).unwrap();

    assert_eq!(addr, 0);
    assert_eq!(
        alloc.snapshot().layout(),
        vec![
            (0, 64, USED),
            (64, 64, FREE),
            (128, 128, FREE),
            (256, 256, FREE),
            (512, 512, FREE),
        ]
    );
    assert_partition(&alloc.snapshot());
}

#[test]
fn test_request_is_rounded_up() {
    let mut alloc = allocator(1024);

    let addr = alloc.allocate("C", 225).unwrap();

    assert_eq!(alloc.block_size(addr), Some(256));
    assert_eq!(alloc.info(), (1024, 256, 768));
}

#[test]
fn test_best_fit_picks_smallest_qualifying_block() {
    // Leaves free blocks of 64, 128 and 256
    let mut alloc = allocator(512);
    alloc.allocate("seed", 64).unwrap();

    let addr = alloc.allocate("fit", 100).unwrap();

    assert_eq!(addr, 128);
    assert_eq!(alloc.block_size(addr), Some(128));
    assert_eq!(
        alloc.snapshot().layout(),
        vec![(0, 64, USED), (64, 64, FREE), (128, 128, USED), (256, 256, FREE)]
    );
}

#[test]
fn test_best_fit_tie_breaks_on_lowest_start() {
    let mut alloc = allocator(1024);
    let a = alloc.allocate("a", 256).unwrap();
    let b = alloc.allocate("b", 256).unwrap();
    let c = alloc.allocate("c", 256).unwrap();
    assert_eq!((a, b, c), (0, 256, 512));

    alloc.deallocate(b).unwrap();
    // Free 256-blocks at 256 and 768
    assert_eq!(
        alloc.snapshot().layout(),
        vec![(0, 256, USED), (256, 256, FREE), (512, 256, USED), (768, 256, FREE)]
    );

    assert_eq!(alloc.allocate("d", 200).unwrap(), 256);
    assert_eq!(alloc.allocate("e", 200).unwrap(), 768);
}

#[test]
fn test_exhaustion_leaves_ledger_unchanged() {
    let mut alloc = allocator(1024);
    alloc.allocate("big", 512).unwrap();
    let before = alloc.snapshot();

    let result = alloc.allocate("too-big", 513);

    assert_eq!(
        result,
        Err(MemoryError::InsufficientMemory {
            requested: 513,
            required: 1024,
            largest_free: 512,
        })
    );
    assert_eq!(alloc.snapshot(), before);
}

#[test]
fn test_request_larger_than_range_fails() {
    let mut alloc = allocator(1024);

    assert!(matches!(
        alloc.allocate("huge", 2048),
        Err(MemoryError::InsufficientMemory { required: 2048, .. })
    ));
    assert!(matches!(
        alloc.allocate("overflow", usize::MAX),
        Err(MemoryError::InsufficientMemory {
            required: usize::MAX,
            largest_free: 1024,
            ..
        })
    ));
    assert_eq!(alloc.snapshot().layout(), vec![(0, 1024, FREE)]);
}

#[test]
fn test_zero_sized_request_is_rejected() {
    let mut alloc = allocator(1024);

    assert_eq!(alloc.allocate("empty", 0), Err(MemoryError::InvalidSize(0)));
    assert_eq!(alloc.snapshot().layout(), vec![(0, 1024, FREE)]);
}

#[test]
fn test_fill_every_unit() {
    let mut alloc = allocator(64);
    let addrs: Vec<_> = (0..64)
        .map(|i| alloc.allocate(&format!("p{}", i), 1).unwrap())
        .collect();

    assert_eq!(addrs, (0..64).collect::<Vec<_>>());
    assert!(matches!(
        alloc.allocate("extra", 1),
        Err(MemoryError::InsufficientMemory { largest_free: 0, .. })
    ));
    assert_eq!(alloc.stats().memory_pressure(), MemoryPressure::Critical);
}

#[test]
fn test_whole_range_allocation() {
    let mut alloc = allocator(1024);

    assert_eq!(alloc.allocate("all", 1000).unwrap(), 0);
    assert_eq!(alloc.snapshot().layout(), vec![(0, 1024, USED)]);
    assert_eq!(alloc.block_count(), 1);
}

#[test]
fn test_labels_are_reported_in_snapshot() {
    let mut alloc = allocator(256);
    alloc.allocate("A", 64).unwrap();

    let snapshot = alloc.snapshot();
    assert_eq!(snapshot.blocks[0].label.as_deref(), Some("A"));
    assert_eq!(snapshot.blocks[1].label, None);

    let rendered = snapshot.to_string();
    assert!(rendered.contains("Start: 0, Size: 64, Allocated (A)"));
    assert!(rendered.contains("Start: 64, Size: 64, Free"));
}

#[test]
fn test_snapshot_is_detached_from_ledger() {
    let mut alloc = allocator(1024);
    let mut snapshot = alloc.snapshot();
    snapshot.blocks.clear();

    assert_eq!(alloc.snapshot().layout(), vec![(0, 1024, FREE)]);
    assert_eq!(alloc.allocate("A", 1024).unwrap(), 0);
}

#[test]
fn test_stats_track_usage_and_peak() {
    let mut alloc = allocator(1024);
    let a = alloc.allocate("A", 512).unwrap();
    alloc.allocate("B", 300).unwrap();

    let stats = alloc.stats();
    assert_eq!(stats.used_memory, 1024);
    assert_eq!(stats.available_memory, 0);
    assert_eq!(stats.allocated_blocks, 2);
    assert_eq!(stats.free_blocks, 0);

    alloc.deallocate(a).unwrap();
    let stats = alloc.stats();
    assert_eq!(stats.used_memory, 512);
    assert_eq!(stats.peak_memory, 1024);
    assert_eq!(stats.largest_free_block, 512);
    assert_eq!(stats.memory_pressure(), MemoryPressure::Low);
    assert_eq!(alloc.pressure(), MemoryPressure::Low);
}

#[test]
fn test_invalid_total_size_is_rejected() {
    assert_eq!(
        BuddyAllocator::with_capacity(1000).unwrap_err(),
        MemoryError::InvalidTotalSize(1000)
    );
    assert_eq!(
        BuddyAllocator::with_capacity(0).unwrap_err(),
        MemoryError::InvalidTotalSize(0)
    );
}

#[test]
fn test_allocator_trait_object_usage() {
    fn churn(alloc: &mut dyn Allocator) -> usize {
        let addr = alloc.allocate("t", 10).unwrap();
        let size = alloc.block_size(addr).unwrap();
        alloc.deallocate(addr).unwrap();
        size
    }

    let mut alloc = BuddyAllocator::default();
    assert_eq!(churn(&mut alloc), 16);
    assert_eq!(alloc.snapshot().layout(), vec![(0, 1024, FREE)]);
}
