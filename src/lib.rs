//! Multi-core cache hierarchy simulator.
//!
//! This crate estimates, for a stream of observed memory accesses supplied
//! by an instrumentation harness, what each access would have done to a
//! real CPU's cache hierarchy: hit at L1, hit at a shared level, or miss
//! entirely. It provides:
//! 1. **Cache:** A recency-ordered set-associative cache of line tags, the
//!    building block for every modeled L1/L2/victim cache.
//! 2. **Topologies:** Four chip families (AMD Jaguar, Apple A9, Apple A11,
//!    Snapdragon 845), each with its own coherence and classification
//!    policy over a private cache constellation.
//! 3. **Simulators:** Per-chip entry points that split line-straddling
//!    accesses, route core indices to modules, and reduce per-line results
//!    to a worst-case classification.
//! 4. **Configuration:** serde-deserializable topology selection and the
//!    documented per-chip cache geometries.
//!
//! The engine is passive and synchronous: it runs on the caller's thread,
//! allocates nothing on the access path, and is deterministic given its
//! inputs and cache state. Callers must not drive two accesses into the
//! same module concurrently; the round-robin core-assignment counters are
//! the only concurrency-safe state. It is not cycle-accurate and does not
//! model prefetching, TLBs, or bus timing; coherence is approximated as
//! unconditional invalidation, with no MESI-style line states.
//!
//! # Examples
//!
//! ```
//! use cachesim::{AccessMode, AccessResult, HierarchySim, SimConfig};
//!
//! let mut sim = HierarchySim::new(&SimConfig::default()).unwrap();
//! let core = sim.next_core();
//!
//! // Cold read misses all the way down; an immediate re-read hits the L1.
//! assert_eq!(sim.access(core, 0x1000, 8, AccessMode::Read), AccessResult::L2DataMiss);
//! assert_eq!(sim.access(core, 0x1000, 8, AccessMode::Read), AccessResult::D1Hit);
//! ```

/// Recency-ordered set-associative cache.
pub mod cache;

/// Access types, line addressing, and configuration errors.
pub mod common;

/// Topology selection and documented chip geometries.
pub mod config;

/// Per-chip topology modules and top-level simulators.
pub mod topology;

pub use crate::common::access::{AccessMode, AccessResult};
pub use crate::common::error::ConfigError;
pub use crate::config::{CacheGeometry, SimConfig, Topology};
pub use crate::topology::HierarchySim;
