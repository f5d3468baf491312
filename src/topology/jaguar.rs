//! AMD Jaguar dual-module topology.
//!
//! Two four-core dies, each with per-core split L1s over a shared,
//! inclusive 2 MiB L2. Because the hierarchy is inclusive the L2 is probed
//! on every access, before the requesting core's L1.
//!
//! Coherence approximation: a write kicks the line out of every sibling
//! core's L1s within the writer's die and out of the *other* die's L2. The
//! other die's L1s are left alone, so a remote core's L1 can keep reporting
//! a hit for a line its own L2 no longer holds. The asymmetry is part of
//! the modeled behavior; do not "fix" it.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, trace};

use crate::cache::SetAssocCache;
use crate::common::access::{AccessMode, AccessResult};
use crate::common::addr::line_span;
use crate::common::error::ConfigError;
use crate::config::CacheGeometry;

/// Cores per die.
pub const CORES_PER_MODULE: usize = 4;

/// Dies per chip.
pub const MODULE_COUNT: usize = 2;

/// Simulated cores exposed by the whole chip.
pub const CORE_COUNT: usize = CORES_PER_MODULE * MODULE_COUNT;

/// One four-core Jaguar die: per-core split L1s over a shared L2.
///
/// The sibling die is not owned here; the simulator passes it in on each
/// per-line access so the cross-die L2 invalidation can be applied without
/// shared mutable handles.
#[derive(Debug)]
pub struct JaguarModule {
    data_l1: Vec<SetAssocCache>,
    code_l1: Vec<SetAssocCache>,
    level2: SetAssocCache,
}

impl JaguarModule {
    fn new() -> Result<Self, ConfigError> {
        let mut data_l1 = Vec::with_capacity(CORES_PER_MODULE);
        let mut code_l1 = Vec::with_capacity(CORES_PER_MODULE);
        for _ in 0..CORES_PER_MODULE {
            data_l1.push(SetAssocCache::new(CacheGeometry::JAGUAR_D1)?);
            code_l1.push(SetAssocCache::new(CacheGeometry::JAGUAR_I1)?);
        }
        Ok(Self {
            data_l1,
            code_l1,
            level2: SetAssocCache::new(CacheGeometry::JAGUAR_L2)?,
        })
    }

    fn reset(&mut self) {
        for cache in self.data_l1.iter_mut().chain(self.code_l1.iter_mut()) {
            cache.reset();
        }
        self.level2.reset();
    }

    /// Classifies one aligned line access by `core` on this die.
    ///
    /// `sibling` is the other die; it is touched only to keep its inclusive
    /// L2 consistent with writes on this die.
    fn access(
        &mut self,
        core: usize,
        line_addr: u64,
        mode: AccessMode,
        sibling: &mut Self,
    ) -> AccessResult {
        if mode == AccessMode::Write {
            trace!(core, line_addr, "write invalidation broadcast");
            for other in 0..CORES_PER_MODULE {
                if other == core {
                    continue;
                }
                self.data_l1[other].invalidate(line_addr);
                self.code_l1[other].invalidate(line_addr);
            }
            sibling.level2.invalidate(line_addr);
        }

        // Inclusive hierarchy: the L2 sees every access.
        let l2_hit = self.level2.access(line_addr);
        let l1_hit = if mode.is_code() {
            self.code_l1[core].access(line_addr)
        } else {
            self.data_l1[core].access(line_addr)
        };

        if l2_hit && l1_hit {
            AccessResult::l1_hit(mode)
        } else if l2_hit {
            AccessResult::L2Hit
        } else {
            AccessResult::l2_miss(mode)
        }
    }
}

/// Whole-chip Jaguar simulator: two dies plus the round-robin core counter.
#[derive(Debug)]
pub struct JaguarSim {
    modules: [JaguarModule; MODULE_COUNT],
    core: AtomicUsize,
}

impl JaguarSim {
    /// Builds the chip with every cache empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a documented geometry is structurally
    /// invalid; with the built-in constants this cannot happen.
    pub fn new() -> Result<Self, ConfigError> {
        debug!("initializing Jaguar hierarchy: 2 modules x 4 cores");
        Ok(Self {
            modules: [JaguarModule::new()?, JaguarModule::new()?],
            core: AtomicUsize::new(0),
        })
    }

    /// Classifies one access of `size` bytes at `addr` by `core_index`.
    ///
    /// The access is split into the 64-byte lines it touches; the whole
    /// access reports the worst per-line outcome. Core indices select the
    /// die via `(core / 4) % 2`; out-of-range indices alias modulo the
    /// core count rather than erroring.
    pub fn access(
        &mut self,
        core_index: usize,
        addr: u64,
        size: u64,
        mode: AccessMode,
    ) -> AccessResult {
        let module_index = (core_index / CORES_PER_MODULE) % MODULE_COUNT;
        let core = core_index % CORES_PER_MODULE;

        let mut worst = AccessResult::D1Hit;
        for line_addr in line_span(addr, size) {
            let (module, sibling) = self.module_pair(module_index);
            worst = worst.max(module.access(core, line_addr, mode, sibling));
        }
        worst
    }

    /// Hands out the next simulated core index, round-robin over all eight.
    ///
    /// Safe to call from multiple threads; this counter is the only
    /// concurrency-safe state in the simulator.
    pub fn next_core(&self) -> usize {
        self.core.fetch_add(1, Ordering::Relaxed) % CORE_COUNT
    }

    /// Number of simulated cores.
    #[must_use]
    pub const fn core_count(&self) -> usize {
        CORE_COUNT
    }

    /// Empties every cache on both dies for a fresh profiling session.
    pub fn reset(&mut self) {
        for module in &mut self.modules {
            module.reset();
        }
    }

    /// Splits the die array into (selected, sibling) without aliasing.
    fn module_pair(&mut self, index: usize) -> (&mut JaguarModule, &mut JaguarModule) {
        let (head, tail) = self.modules.split_at_mut(1);
        if index == 0 {
            (&mut head[0], &mut tail[0])
        } else {
            (&mut tail[0], &mut head[0])
        }
    }
}
