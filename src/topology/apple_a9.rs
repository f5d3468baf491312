//! Apple A9 topology.
//!
//! A single two-core cluster: per-core split L1s over one cluster-shared
//! L2. Unlike Jaguar the hierarchy is probed bottom-up; an L1 hit returns
//! immediately and never touches the L2.
//!
//! The chip also carries a 4 MiB victim L3 shared with the GPU. It is part
//! of the cache constellation and is reset with the rest, but the
//! classification logic does not consult it yet.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, trace};

use crate::cache::SetAssocCache;
use crate::common::access::{AccessMode, AccessResult};
use crate::common::addr::line_span;
use crate::common::error::ConfigError;
use crate::config::CacheGeometry;

/// Simulated cores on the chip.
pub const CORE_COUNT: usize = 2;

/// The A9's single cluster: two cores, shared L2, unused victim L3.
#[derive(Debug)]
pub struct AppleA9Module {
    data_l1: Vec<SetAssocCache>,
    code_l1: Vec<SetAssocCache>,
    level2: SetAssocCache,
    level3_victim: SetAssocCache,
}

impl AppleA9Module {
    fn new() -> Result<Self, ConfigError> {
        let mut data_l1 = Vec::with_capacity(CORE_COUNT);
        let mut code_l1 = Vec::with_capacity(CORE_COUNT);
        for _ in 0..CORE_COUNT {
            data_l1.push(SetAssocCache::new(CacheGeometry::A9_D1)?);
            code_l1.push(SetAssocCache::new(CacheGeometry::A9_I1)?);
        }
        Ok(Self {
            data_l1,
            code_l1,
            level2: SetAssocCache::new(CacheGeometry::A9_L2)?,
            level3_victim: SetAssocCache::new(CacheGeometry::A9_L3)?,
        })
    }

    fn reset(&mut self) {
        for cache in self.data_l1.iter_mut().chain(self.code_l1.iter_mut()) {
            cache.reset();
        }
        self.level2.reset();
        self.level3_victim.reset();
    }

    /// Classifies one aligned line access by `core`.
    fn access(&mut self, core: usize, line_addr: u64, mode: AccessMode) -> AccessResult {
        if mode == AccessMode::Write {
            trace!(core, line_addr, "write invalidation broadcast");
            for other in 0..CORE_COUNT {
                if other == core {
                    continue;
                }
                self.data_l1[other].invalidate(line_addr);
                self.code_l1[other].invalidate(line_addr);
            }
        }

        let l1_hit = if mode.is_code() {
            self.code_l1[core].access(line_addr)
        } else {
            self.data_l1[core].access(line_addr)
        };
        if l1_hit {
            return AccessResult::l1_hit(mode);
        }

        if self.level2.access(line_addr) {
            return AccessResult::L2Hit;
        }

        // A victim L3 lookup would go here once it is wired in; for now a
        // L2 miss falls straight through to memory.
        AccessResult::l2_miss(mode)
    }
}

/// Whole-chip Apple A9 simulator.
#[derive(Debug)]
pub struct AppleA9Sim {
    module: AppleA9Module,
    core: AtomicUsize,
}

impl AppleA9Sim {
    /// Builds the chip with every cache empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a documented geometry is structurally
    /// invalid; with the built-in constants this cannot happen.
    pub fn new() -> Result<Self, ConfigError> {
        debug!("initializing Apple A9 hierarchy: 1 cluster x 2 cores");
        Ok(Self {
            module: AppleA9Module::new()?,
            core: AtomicUsize::new(0),
        })
    }

    /// Classifies one access of `size` bytes at `addr` by `core_index`.
    ///
    /// Splits the access into touched 64-byte lines and reports the worst
    /// per-line outcome. Out-of-range core indices alias modulo the core
    /// count.
    pub fn access(
        &mut self,
        core_index: usize,
        addr: u64,
        size: u64,
        mode: AccessMode,
    ) -> AccessResult {
        let core = core_index % CORE_COUNT;
        let mut worst = AccessResult::D1Hit;
        for line_addr in line_span(addr, size) {
            worst = worst.max(self.module.access(core, line_addr, mode));
        }
        worst
    }

    /// Hands out the next simulated core index, round-robin over both cores.
    pub fn next_core(&self) -> usize {
        self.core.fetch_add(1, Ordering::Relaxed) % CORE_COUNT
    }

    /// Number of simulated cores.
    #[must_use]
    pub const fn core_count(&self) -> usize {
        CORE_COUNT
    }

    /// Empties every cache for a fresh profiling session.
    pub fn reset(&mut self) {
        self.module.reset();
    }
}
