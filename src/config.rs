//! Configuration for the cache hierarchy simulator.
//!
//! This module defines the configuration structures used to select and
//! parameterize a simulated chip. It provides:
//! 1. **Defaults:** The documented cache geometries of every modeled chip.
//! 2. **Geometry:** The per-cache size/line/ways triple with its invariants.
//! 3. **Topology Selection:** The closed set of chip families a harness can
//!    instantiate.
//!
//! Configuration is supplied as JSON by the instrumentation harness, or use
//! `SimConfig::default()` for the built-in Jaguar topology.

use serde::Deserialize;

/// Documented cache geometry constants for the modeled chips.
///
/// These values come from the vendors' published cache hierarchies and are
/// fixed per chip; they are not tunables.
mod defaults {
    /// Cache line size in bytes, common to every modeled chip.
    pub const LINE_BYTES: usize = 64;

    /// Jaguar per-core data L1: 32 KiB.
    pub const JAGUAR_D1_BYTES: usize = 32 * 1024;
    /// Jaguar data L1 associativity.
    pub const JAGUAR_D1_WAYS: usize = 8;
    /// Jaguar per-core instruction L1: 32 KiB.
    pub const JAGUAR_I1_BYTES: usize = 32 * 1024;
    /// Jaguar instruction L1 associativity.
    pub const JAGUAR_I1_WAYS: usize = 2;
    /// Jaguar per-module shared L2: 2 MiB.
    pub const JAGUAR_L2_BYTES: usize = 2 * 1024 * 1024;
    /// Jaguar L2 associativity.
    pub const JAGUAR_L2_WAYS: usize = 16;

    /// Apple A9 per-core data L1: 64 KiB.
    pub const A9_D1_BYTES: usize = 64 * 1024;
    /// Apple A9 data L1 associativity.
    pub const A9_D1_WAYS: usize = 4;
    /// Apple A9 per-core instruction L1: 64 KiB.
    pub const A9_I1_BYTES: usize = 64 * 1024;
    /// Apple A9 instruction L1 associativity.
    pub const A9_I1_WAYS: usize = 2;
    /// Apple A9 cluster-shared L2: 3 MiB.
    pub const A9_L2_BYTES: usize = 3 * 1024 * 1024;
    /// Apple A9 L2 associativity.
    pub const A9_L2_WAYS: usize = 16;
    /// Apple A9 shared victim L3: 4 MiB (modeled but not consulted).
    pub const A9_L3_BYTES: usize = 4 * 1024 * 1024;
    /// Apple A9 victim L3 associativity.
    pub const A9_L3_WAYS: usize = 1;

    /// Apple A11 per-core data L1: 64 KiB.
    pub const A11_D1_BYTES: usize = 64 * 1024;
    /// Apple A11 data L1 associativity.
    pub const A11_D1_WAYS: usize = 4;
    /// Apple A11 per-core instruction L1: 64 KiB.
    pub const A11_I1_BYTES: usize = 64 * 1024;
    /// Apple A11 instruction L1 associativity.
    pub const A11_I1_WAYS: usize = 2;
    /// Apple A11 per-core L2: 8 MiB.
    pub const A11_L2_BYTES: usize = 8 * 1024 * 1024;
    /// Apple A11 L2 associativity.
    pub const A11_L2_WAYS: usize = 16;

    /// Snapdragon 845 A75 (big) data L1: 64 KiB.
    pub const SD845_A75_D1_BYTES: usize = 64 * 1024;
    /// Snapdragon 845 A75 data L1 associativity.
    pub const SD845_A75_D1_WAYS: usize = 4;
    /// Snapdragon 845 A75 instruction L1: 64 KiB.
    pub const SD845_A75_I1_BYTES: usize = 64 * 1024;
    /// Snapdragon 845 A75 instruction L1 associativity.
    pub const SD845_A75_I1_WAYS: usize = 4;
    /// Snapdragon 845 A75 per-core L2: 256 KiB.
    pub const SD845_A75_L2_BYTES: usize = 256 * 1024;
    /// Snapdragon 845 A75 L2 associativity.
    pub const SD845_A75_L2_WAYS: usize = 8;

    /// Snapdragon 845 A55 (little) data L1: 64 KiB.
    pub const SD845_A55_D1_BYTES: usize = 64 * 1024;
    /// Snapdragon 845 A55 data L1 associativity.
    pub const SD845_A55_D1_WAYS: usize = 2;
    /// Snapdragon 845 A55 instruction L1: 64 KiB.
    pub const SD845_A55_I1_BYTES: usize = 64 * 1024;
    /// Snapdragon 845 A55 instruction L1 associativity.
    pub const SD845_A55_I1_WAYS: usize = 4;
    /// Snapdragon 845 A55 per-core L2: 128 KiB.
    pub const SD845_A55_L2_BYTES: usize = 128 * 1024;
    /// Snapdragon 845 A55 L2 associativity.
    pub const SD845_A55_L2_WAYS: usize = 8;
}

/// Geometry of one set-associative cache.
///
/// Capacity must divide exactly into `set_count * ways * line_bytes`, the
/// way count must be a power of two, and the line size must be a power of
/// two. Violations are reported by
/// [`SetAssocCache::new`](crate::cache::SetAssocCache::new) as
/// [`ConfigError`](crate::common::ConfigError) values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct CacheGeometry {
    /// Total cache capacity in bytes.
    pub size_bytes: usize,

    /// Cache line size in bytes.
    #[serde(default = "CacheGeometry::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways per set).
    pub ways: usize,
}

impl CacheGeometry {
    /// Jaguar per-core data L1 geometry.
    pub const JAGUAR_D1: Self =
        Self::fixed(defaults::JAGUAR_D1_BYTES, defaults::JAGUAR_D1_WAYS);
    /// Jaguar per-core instruction L1 geometry.
    pub const JAGUAR_I1: Self =
        Self::fixed(defaults::JAGUAR_I1_BYTES, defaults::JAGUAR_I1_WAYS);
    /// Jaguar per-module shared L2 geometry.
    pub const JAGUAR_L2: Self =
        Self::fixed(defaults::JAGUAR_L2_BYTES, defaults::JAGUAR_L2_WAYS);

    /// Apple A9 per-core data L1 geometry.
    pub const A9_D1: Self = Self::fixed(defaults::A9_D1_BYTES, defaults::A9_D1_WAYS);
    /// Apple A9 per-core instruction L1 geometry.
    pub const A9_I1: Self = Self::fixed(defaults::A9_I1_BYTES, defaults::A9_I1_WAYS);
    /// Apple A9 cluster-shared L2 geometry.
    pub const A9_L2: Self = Self::fixed(defaults::A9_L2_BYTES, defaults::A9_L2_WAYS);
    /// Apple A9 shared victim L3 geometry.
    pub const A9_L3: Self = Self::fixed(defaults::A9_L3_BYTES, defaults::A9_L3_WAYS);

    /// Apple A11 per-core data L1 geometry.
    pub const A11_D1: Self = Self::fixed(defaults::A11_D1_BYTES, defaults::A11_D1_WAYS);
    /// Apple A11 per-core instruction L1 geometry.
    pub const A11_I1: Self = Self::fixed(defaults::A11_I1_BYTES, defaults::A11_I1_WAYS);
    /// Apple A11 per-core L2 geometry.
    pub const A11_L2: Self = Self::fixed(defaults::A11_L2_BYTES, defaults::A11_L2_WAYS);

    /// Snapdragon 845 big-cluster (A75) data L1 geometry.
    pub const SD845_A75_D1: Self =
        Self::fixed(defaults::SD845_A75_D1_BYTES, defaults::SD845_A75_D1_WAYS);
    /// Snapdragon 845 big-cluster (A75) instruction L1 geometry.
    pub const SD845_A75_I1: Self =
        Self::fixed(defaults::SD845_A75_I1_BYTES, defaults::SD845_A75_I1_WAYS);
    /// Snapdragon 845 big-cluster (A75) per-core L2 geometry.
    pub const SD845_A75_L2: Self =
        Self::fixed(defaults::SD845_A75_L2_BYTES, defaults::SD845_A75_L2_WAYS);
    /// Snapdragon 845 little-cluster (A55) data L1 geometry.
    pub const SD845_A55_D1: Self =
        Self::fixed(defaults::SD845_A55_D1_BYTES, defaults::SD845_A55_D1_WAYS);
    /// Snapdragon 845 little-cluster (A55) instruction L1 geometry.
    pub const SD845_A55_I1: Self =
        Self::fixed(defaults::SD845_A55_I1_BYTES, defaults::SD845_A55_I1_WAYS);
    /// Snapdragon 845 little-cluster (A55) per-core L2 geometry.
    pub const SD845_A55_L2: Self =
        Self::fixed(defaults::SD845_A55_L2_BYTES, defaults::SD845_A55_L2_WAYS);

    /// Builds a geometry with the standard 64-byte line size.
    const fn fixed(size_bytes: usize, ways: usize) -> Self {
        Self {
            size_bytes,
            line_bytes: defaults::LINE_BYTES,
            ways,
        }
    }

    /// Returns the default line size in bytes.
    const fn default_line() -> usize {
        defaults::LINE_BYTES
    }
}

/// Chip topology selector.
///
/// Each variant names one modeled chip family; the simulator for a variant
/// owns that chip's full cache constellation. The set is closed on purpose:
/// the invalidation and classification rules differ per chip and are not
/// generalizable behind a common interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Topology {
    /// AMD Jaguar: two four-core modules, each with a shared inclusive L2.
    #[default]
    Jaguar,
    /// Apple A9: two cores over a shared L2 and an unused victim L3.
    AppleA9,
    /// Apple A11: six cores with private per-core L2s.
    AppleA11,
    /// Qualcomm Snapdragon 845: `big.LITTLE` with two four-core clusters.
    #[serde(alias = "SD845")]
    Snapdragon845,
}

impl Topology {
    /// Number of simulated cores the topology exposes.
    #[must_use]
    pub const fn core_count(self) -> usize {
        match self {
            Self::Jaguar | Self::Snapdragon845 => 8,
            Self::AppleA9 => 2,
            Self::AppleA11 => 6,
        }
    }
}

/// Root simulator configuration.
///
/// Deserialized from JSON supplied by the instrumentation harness.
///
/// # Examples
///
/// ```
/// use cachesim::config::{SimConfig, Topology};
///
/// let config: SimConfig = serde_json::from_str(r#"{ "topology": "AppleA11" }"#).unwrap();
/// assert_eq!(config.topology, Topology::AppleA11);
/// assert_eq!(config.topology.core_count(), 6);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct SimConfig {
    /// Chip topology to simulate.
    #[serde(default)]
    pub topology: Topology,
}
