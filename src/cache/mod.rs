//! Recency-ordered set-associative cache.
//!
//! This is the universal building block of every modeled topology: each L1,
//! L2, and victim cache is one of these with a different geometry. The cache
//! tracks line tags only (no data, no dirty state) because the simulator
//! classifies accesses rather than modeling their contents.
//!
//! Each set is a strict recency queue: slot 0 is most-recently-used and the
//! last slot is the eviction victim. Tag 0 doubles as the empty-slot marker,
//! so a genuine access to line-aligned address 0 is indistinguishable from
//! an empty slot: the lookup matches vacant slots as if they held line 0.
//! That aliasing is a documented property of the model and is kept as-is;
//! address 0 is not special-cased.

use crate::common::error::ConfigError;
use crate::config::CacheGeometry;

/// A fixed-geometry set-associative cache of line tags.
///
/// All slots start empty; contents mutate only through [`access`] and
/// [`invalidate`] for the lifetime of a profiling session. No operation on
/// a constructed cache can fail, and the hot path performs no allocation.
///
/// [`access`]: SetAssocCache::access
/// [`invalidate`]: SetAssocCache::invalidate
#[derive(Debug)]
pub struct SetAssocCache {
    /// `set_count * ways` tags, recency-ordered within each set; 0 = empty.
    slots: Vec<u64>,
    set_count: usize,
    ways: usize,
    line_shift: u32,
}

impl SetAssocCache {
    /// Builds an empty cache with the given geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the way count or line size is not a
    /// power of two, or if the capacity does not divide exactly into
    /// `set_count * ways * line_bytes`.
    pub fn new(geometry: CacheGeometry) -> Result<Self, ConfigError> {
        let CacheGeometry {
            size_bytes,
            line_bytes,
            ways,
        } = geometry;

        if !ways.is_power_of_two() {
            return Err(ConfigError::WaysNotPowerOfTwo { ways });
        }
        if !line_bytes.is_power_of_two() {
            return Err(ConfigError::LineNotPowerOfTwo { line_bytes });
        }

        let set_count = size_bytes / line_bytes / ways;
        if set_count == 0 || set_count * ways * line_bytes != size_bytes {
            return Err(ConfigError::SizeNotDivisible {
                size_bytes,
                line_bytes,
                ways,
            });
        }

        Ok(Self {
            slots: vec![0; set_count * ways],
            set_count,
            ways,
            line_shift: line_bytes.trailing_zeros(),
        })
    }

    /// Number of sets.
    #[must_use]
    pub const fn set_count(&self) -> usize {
        self.set_count
    }

    /// Associativity (ways per set).
    #[must_use]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Line size in bytes.
    #[must_use]
    pub const fn line_bytes(&self) -> usize {
        1 << self.line_shift
    }

    /// Looks up `addr`, updating recency state, and reports hit or miss.
    ///
    /// On a hit the entry rotates to the front of its set (true MRU
    /// promotion, preserving the relative order of the entries ahead of
    /// it). On a miss every entry shifts one slot toward the back, the
    /// last slot falls off unconditionally, and the new tag is installed
    /// at the front.
    pub fn access(&mut self, addr: u64) -> bool {
        let (set, tag) = self.set_for(addr);

        if let Some(pos) = set.iter().position(|&stored| stored == tag) {
            set[..=pos].rotate_right(1);
            return true;
        }

        set.rotate_right(1);
        set[0] = tag;
        false
    }

    /// Removes `addr` from the cache if present; a no-op otherwise.
    ///
    /// Later entries shift forward to fill the gap so their relative
    /// recency order survives, and the freed last slot is zeroed.
    pub fn invalidate(&mut self, addr: u64) {
        let (set, tag) = self.set_for(addr);

        if let Some(pos) = set.iter().position(|&stored| stored == tag) {
            set[pos..].rotate_left(1);
            let last = set.len() - 1;
            set[last] = 0;
        }
    }

    /// Reports whether `addr` is cached without disturbing recency state.
    #[must_use]
    pub fn contains(&self, addr: u64) -> bool {
        let tag = addr >> self.line_shift;
        let base = self.set_index(tag) * self.ways;
        self.slots[base..base + self.ways]
            .iter()
            .any(|&stored| stored == tag && tag != 0)
    }

    /// Clears every slot back to empty.
    pub fn reset(&mut self) {
        self.slots.fill(0);
    }

    /// Returns the recency-ordered set holding `addr`, plus its line tag.
    fn set_for(&mut self, addr: u64) -> (&mut [u64], u64) {
        let tag = addr >> self.line_shift;
        let base = self.set_index(tag) * self.ways;
        (&mut self.slots[base..base + self.ways], tag)
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn set_index(&self, tag: u64) -> usize {
        (tag % self.set_count as u64) as usize
    }
}
