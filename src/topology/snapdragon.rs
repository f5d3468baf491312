//! Qualcomm Snapdragon 845 topology.
//!
//! A heterogeneous `big.LITTLE` chip: eight cores split by index into a
//! four-core A75 (big) cluster and a four-core A55 (little) cluster with
//! different L1 geometries and private per-core L2s. Coherence is modeled
//! within a cluster only: a write invalidates the other cores' L1s in the
//! writer's cluster and never crosses to the other cluster.
//!
//! The core-assignment helper here differs from the other topologies: the
//! counter starts at 1 and index 0 is skipped on wraparound. That rule is
//! kept exactly as modeled and deliberately not unified with the others.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, trace};

use crate::cache::SetAssocCache;
use crate::common::access::{AccessMode, AccessResult};
use crate::common::addr::line_span;
use crate::common::error::ConfigError;
use crate::config::CacheGeometry;

/// Simulated cores on the chip.
pub const CORE_COUNT: usize = 8;

/// Cores per cluster; the first half of the index space is the big cluster.
pub const CLUSTER_CORES: usize = CORE_COUNT / 2;

/// Per-cluster cache constellation: split L1s and private L2s per core.
#[derive(Debug)]
struct Cluster {
    data_l1: Vec<SetAssocCache>,
    code_l1: Vec<SetAssocCache>,
    level2: Vec<SetAssocCache>,
}

impl Cluster {
    fn new(
        d1: CacheGeometry,
        i1: CacheGeometry,
        l2: CacheGeometry,
    ) -> Result<Self, ConfigError> {
        let mut data_l1 = Vec::with_capacity(CLUSTER_CORES);
        let mut code_l1 = Vec::with_capacity(CLUSTER_CORES);
        let mut level2 = Vec::with_capacity(CLUSTER_CORES);
        for _ in 0..CLUSTER_CORES {
            data_l1.push(SetAssocCache::new(d1)?);
            code_l1.push(SetAssocCache::new(i1)?);
            level2.push(SetAssocCache::new(l2)?);
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
}

/// The whole eight-core module: one big cluster, one little cluster.
#[derive(Debug)]
pub struct Snapdragon845Module {
    big: Cluster,
    little: Cluster,
}

impl Snapdragon845Module {
    fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            big: Cluster::new(
                CacheGeometry::SD845_A75_D1,
                CacheGeometry::SD845_A75_I1,
                CacheGeometry::SD845_A75_L2,
            )?,
            little: Cluster::new(
                CacheGeometry::SD845_A55_D1,
                CacheGeometry::SD845_A55_I1,
                CacheGeometry::SD845_A55_L2,
            )?,
        })
    }

    fn reset(&mut self) {
        self.big.reset();
        self.little.reset();
    }

    /// Classifies one aligned line access by raw core index `core`.
    ///
    /// Cluster membership is resolved here: indices 0..4 select the big
    /// cluster, 4..8 the little one, with a cluster-local index for the
    /// cache arrays.
    fn access(&mut self, core: usize, line_addr: u64, mode: AccessMode) -> AccessResult {
        let is_big = core < CLUSTER_CORES;
        let local = if is_big { core } else { core - CLUSTER_CORES };
        let cluster = if is_big { &mut self.big } else { &mut self.little };

        if mode == AccessMode::Write {
            trace!(core, line_addr, "write invalidation broadcast (cluster-local)");
            for other in 0..CLUSTER_CORES {
                if other == local {
                    continue;
                }
                cluster.data_l1[other].invalidate(line_addr);
                cluster.code_l1[other].invalidate(line_addr);
            }
        }

        let l1_hit = if mode.is_code() {
            cluster.code_l1[local].access(line_addr)
        } else {
            cluster.data_l1[local].access(line_addr)
        };
        if l1_hit {
            return AccessResult::l1_hit(mode);
        }

        if cluster.level2[local].access(line_addr) {
            return AccessResult::L2Hit;
        }

        AccessResult::l2_miss(mode)
    }
}

/// Whole-chip Snapdragon 845 simulator.
#[derive(Debug)]
pub struct Snapdragon845Sim {
    module: Snapdragon845Module,
    core: AtomicUsize,
}

impl Snapdragon845Sim {
    /// Builds the chip with every cache empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a documented geometry is structurally
    /// invalid; with the built-in constants this cannot happen.
    pub fn new() -> Result<Self, ConfigError> {
        debug!("initializing Snapdragon 845 hierarchy: 2 clusters x 4 cores");
        Ok(Self {
            module: Snapdragon845Module::new()?,
            core: AtomicUsize::new(1),
        })
    }

    /// Classifies one access of `size` bytes at `addr` by `core_index`.
    ///
    /// Splits the access into touched 64-byte lines and reports the worst
    /// per-line outcome. The raw core index is passed through to the
    /// module, which resolves cluster membership; out-of-range indices
    /// alias modulo the core count.
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

    /// Hands out the next simulated core index.
    ///
    /// Round-robin over cores 1..8: the counter starts at 1 and a
    /// wraparound result of 0 is replaced by 1 with an extra counter bump,
    /// so index 0 is never handed out by this helper.
    pub fn next_core(&self) -> usize {
        let mut next = self.core.fetch_add(1, Ordering::Relaxed) % CORE_COUNT;
        if next == 0 {
            next = 1;
            self.core.fetch_add(1, Ordering::Relaxed);
        }
        next
    }

    /// Number of simulated cores.
    #[must_use]
    pub const fn core_count(&self) -> usize {
        CORE_COUNT
    }

    /// Empties every cache in both clusters for a fresh profiling session.
    pub fn reset(&mut self) {
        self.module.reset();
    }
}
