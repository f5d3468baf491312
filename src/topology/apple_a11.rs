//! Apple A11 topology.
//!
//! The A9's successor keeps the single-cluster shape but gives every core a
//! private 8 MiB L2 instead of a shared one. Invalidation therefore never
//! touches any L2: a write only kicks the line out of the sibling cores'
//! L1s, and each core's private L2 keeps serving its own copy.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, trace};

use crate::cache::SetAssocCache;
use crate::common::access::{AccessMode, AccessResult};
use crate::common::addr::line_span;
use crate::common::error::ConfigError;
use crate::config::CacheGeometry;

/// Simulated cores on the chip.
pub const CORE_COUNT: usize = 6;

/// The A11's single cluster: six cores with split L1s and private L2s.
#[derive(Debug)]
pub struct AppleA11Module {
    data_l1: Vec<SetAssocCache>,
    code_l1: Vec<SetAssocCache>,
    level2: Vec<SetAssocCache>,
}

impl AppleA11Module {
    fn new() -> Result<Self, ConfigError> {
        let mut data_l1 = Vec::with_capacity(CORE_COUNT);
        let mut code_l1 = Vec::with_capacity(CORE_COUNT);
        let mut level2 = Vec::with_capacity(CORE_COUNT);
        for _ in 0..CORE_COUNT {
            data_l1.push(SetAssocCache::new(CacheGeometry::A11_D1)?);
            code_l1.push(SetAssocCache::new(CacheGeometry::A11_I1)?);
            level2.push(SetAssocCache::new(CacheGeometry::A11_L2)?);
        }
        Ok(Self {
            data_l1,
            code_l1,
            level2,
        })
    }

    fn reset(&mut self) {
        for cache in self
            .data_l1
            .iter_mut()
            .chain(self.code_l1.iter_mut())
            .chain(self.level2.iter_mut())
        {
            cache.reset();
        }
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

        if self.level2[core].access(line_addr) {
            return AccessResult::L2Hit;
        }

        AccessResult::l2_miss(mode)
    }
}

/// Whole-chip Apple A11 simulator.
#[derive(Debug)]
pub struct AppleA11Sim {
    module: AppleA11Module,
    core: AtomicUsize,
}

impl AppleA11Sim {
    /// Builds the chip with every cache empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a documented geometry is structurally
    /// invalid; with the built-in constants this cannot happen.
    pub fn new() -> Result<Self, ConfigError> {
        debug!("initializing Apple A11 hierarchy: 1 cluster x 6 cores");
        Ok(Self {
            module: AppleA11Module::new()?,
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

    /// Hands out the next simulated core index, round-robin over all six.
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
