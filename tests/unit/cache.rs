//! Set-Associative Cache Unit Tests.
//!
//! Verifies the recency-ordered cache building block: construction
//! invariants, hit/miss classification, MRU promotion, unconditional LRU
//! eviction, targeted invalidation, and the empty-slot/tag-zero aliasing.
//!
//! The cache is constructed directly from a [`CacheGeometry`]; no topology
//! needed.

use cachesim::cache::SetAssocCache;
use cachesim::{CacheGeometry, ConfigError};
use proptest::prelude::*;

// ──────────────────────────────────────────────────────────
// Helpers: small deterministic geometries
// ──────────────────────────────────────────────────────────

/// Two-way, single-set cache: 128 bytes of 64-byte lines.
///
/// Every line maps to the same set, so eviction order is fully
/// deterministic: [MRU, LRU].
fn two_way_one_set() -> SetAssocCache {
    SetAssocCache::new(CacheGeometry {
        size_bytes: 128,
        line_bytes: 64,
        ways: 2,
    })
    .unwrap()
}

/// Four-way, single-set cache: 256 bytes of 64-byte lines.
fn four_way_one_set() -> SetAssocCache {
    SetAssocCache::new(CacheGeometry {
        size_bytes: 256,
        line_bytes: 64,
        ways: 4,
    })
    .unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Construction invariants
// ══════════════════════════════════════════════════════════

/// `set_count * ways * line_bytes` must reproduce the declared capacity.
#[test]
fn capacity_invariant_holds() {
    let cache = SetAssocCache::new(CacheGeometry {
        size_bytes: 32 * 1024,
        line_bytes: 64,
        ways: 8,
    })
    .unwrap();

    assert_eq!(
        cache.set_count() * cache.ways() * cache.line_bytes(),
        32 * 1024
    );
    assert!(cache.ways().is_power_of_two());
}

/// Non-power-of-two associativity is a construction error.
#[test]
fn rejects_non_power_of_two_ways() {
    let err = SetAssocCache::new(CacheGeometry {
        size_bytes: 192,
        line_bytes: 64,
        ways: 3,
    })
    .unwrap_err();

    assert_eq!(err, ConfigError::WaysNotPowerOfTwo { ways: 3 });
}

/// Non-power-of-two line size is a construction error.
#[test]
fn rejects_non_power_of_two_line() {
    let err = SetAssocCache::new(CacheGeometry {
        size_bytes: 192,
        line_bytes: 48,
        ways: 2,
    })
    .unwrap_err();

    assert_eq!(err, ConfigError::LineNotPowerOfTwo { line_bytes: 48 });
}

/// Capacity that does not divide into whole sets is a construction error.
#[test]
fn rejects_indivisible_capacity() {
    let err = SetAssocCache::new(CacheGeometry {
        size_bytes: 100,
        line_bytes: 64,
        ways: 2,
    })
    .unwrap_err();

    assert_eq!(
        err,
        ConfigError::SizeNotDivisible {
            size_bytes: 100,
            line_bytes: 64,
            ways: 2,
        }
    );
}

// ══════════════════════════════════════════════════════════
// 2. Cold miss / warm hit
// ══════════════════════════════════════════════════════════

/// First access to any (nonzero) line is a miss.
#[test]
fn cold_access_misses() {
    let mut cache = two_way_one_set();
    assert!(!cache.access(0x1000));
}

/// Immediate re-access of the same line hits.
#[test]
fn immediate_re_access_hits() {
    let mut cache = two_way_one_set();
    cache.access(0x1000);
    assert!(cache.access(0x1000));
}

/// Different byte offsets within one 64-byte line share an entry.
#[test]
fn same_line_different_offset_hits() {
    let mut cache = two_way_one_set();
    cache.access(0x1000);
    assert!(cache.access(0x1000 + 32));
    assert!(cache.access(0x1000 + 63));
}

// ══════════════════════════════════════════════════════════
// 3. MRU promotion and LRU eviction
// ══════════════════════════════════════════════════════════

/// Re-accessing the oldest of W resident lines promotes it to MRU, so a
/// following miss evicts the *next* least-recently-used line instead.
#[test]
fn hit_promotes_to_mru() {
    let mut cache = four_way_one_set();

    // Fill all four ways; recency after this is [0x100, 0xC0, 0x80, 0x40].
    for line in [0x40u64, 0x80, 0xC0, 0x100] {
        assert!(!cache.access(line));
    }

    // Promote the oldest line back to MRU.
    assert!(cache.access(0x40));

    // A new line now evicts 0x80 (the LRU after promotion), not 0x40.
    assert!(!cache.access(0x140));
    assert!(cache.contains(0x40));
    assert!(!cache.contains(0x80));
    assert!(cache.contains(0xC0));
    assert!(cache.contains(0x100));
}

/// Two-way single-set eviction order, traced step by step.
#[test]
fn two_way_eviction_scenario() {
    let mut cache = two_way_one_set();

    assert!(!cache.access(0x40)); // miss, installs at way 0
    assert!(!cache.access(0x80)); // miss, 0x40 shifts to way 1
    assert!(cache.access(0x40)); // hit, promotes back to way 0
    assert!(!cache.access(0xC0)); // miss, evicts the LRU (0x80)

    assert!(!cache.contains(0x80));
    assert!(cache.contains(0x40));
}

/// Eviction is unconditional: the last way falls off on every miss even if
/// it was recently installed.
#[test]
fn miss_always_evicts_last_way() {
    let mut cache = two_way_one_set();
    cache.access(0x40);
    cache.access(0x80);
    cache.access(0xC0); // evicts 0x40
    assert!(!cache.contains(0x40));
    assert!(cache.contains(0x80));
    assert!(cache.contains(0xC0));
}

// ══════════════════════════════════════════════════════════
// 4. Invalidation
// ══════════════════════════════════════════════════════════

/// Invalidation removes exactly the named line; other residents survive
/// with their relative recency intact.
#[test]
fn invalidate_removes_exactly_one_entry() {
    let mut cache = four_way_one_set();

    // Recency after fills: [0xC0, 0x80, 0x40, empty].
    cache.access(0x40);
    cache.access(0x80);
    cache.access(0xC0);

    cache.invalidate(0x80);

    assert!(!cache.contains(0x80));
    assert!(cache.contains(0x40));
    assert!(cache.contains(0xC0));

    // Relative order is preserved: filling the set back up and missing once
    // must evict 0x40 (still the least recent), not 0xC0.
    cache.access(0x100);
    cache.access(0x140);
    assert!(!cache.access(0x180));
    assert!(!cache.contains(0x40));
    assert!(cache.contains(0xC0));
}

/// Invalidating a line that is not resident is a no-op.
#[test]
fn invalidate_absent_line_is_noop() {
    let mut cache = two_way_one_set();
    cache.access(0x40);
    cache.invalidate(0x80);
    assert!(cache.contains(0x40));
    assert!(cache.access(0x40));
}

/// After invalidation the next access to that line is a miss.
#[test]
fn invalidated_line_misses_on_next_access() {
    let mut cache = two_way_one_set();
    cache.access(0x40);
    cache.invalidate(0x40);
    assert!(!cache.access(0x40));
}

// ══════════════════════════════════════════════════════════
// 5. Tag-zero / empty-slot aliasing
// ══════════════════════════════════════════════════════════

/// Line 0 carries tag 0, which is also the empty-slot marker: on a fresh
/// set the lookup matches a vacant slot and reports a (spurious) hit. The
/// aliasing is part of the modeled behavior and is not special-cased.
#[test]
fn address_zero_aliases_empty_slots() {
    let mut cache = two_way_one_set();
    assert!(cache.access(0));

    // Once the set is full of real lines there are no vacant slots left,
    // so line 0 misses like any other absent line.
    cache.access(0x40);
    cache.access(0x80);
    assert!(!cache.access(0));
}

/// Reset restores the all-empty state.
#[test]
fn reset_clears_all_entries() {
    let mut cache = four_way_one_set();
    cache.access(0x40);
    cache.access(0x80);
    cache.reset();
    assert!(!cache.contains(0x40));
    assert!(!cache.contains(0x80));
    assert!(!cache.access(0x40));
}

// ══════════════════════════════════════════════════════════
// 6. Properties
// ══════════════════════════════════════════════════════════

proptest! {
    /// Any access is immediately re-hittable (nonzero lines, no intervening
    /// traffic).
    #[test]
    fn re_access_always_hits(lines in prop::collection::vec(1u64..0x4000, 1..64)) {
        let mut cache = SetAssocCache::new(CacheGeometry {
            size_bytes: 1024,
            line_bytes: 64,
            ways: 2,
        }).unwrap();

        for &line in &lines {
            let addr = line * 64;
            cache.access(addr);
            prop_assert!(cache.access(addr));
        }
    }

    /// Invalidation always forces the next access to the same line to miss,
    /// regardless of prior traffic.
    #[test]
    fn invalidate_forces_miss(
        warmup in prop::collection::vec(1u64..0x4000, 0..64),
        victim in 1u64..0x4000,
    ) {
        let mut cache = SetAssocCache::new(CacheGeometry {
            size_bytes: 1024,
            line_bytes: 64,
            ways: 2,
        }).unwrap();

        for &line in &warmup {
            cache.access(line * 64);
        }
        cache.invalidate(victim * 64);
        prop_assert!(!cache.access(victim * 64));
    }
}
