//! Chip topology modules and top-level simulators.
//!
//! One module per modeled chip family, each owning its own cache
//! constellation and encoding that chip's invalidation and classification
//! policy:
//! 1. **Jaguar:** dual-die, shared inclusive L2 per die, cross-die L2
//!    invalidation.
//! 2. **Apple A9:** single cluster, shared L2, unwired victim L3.
//! 3. **Apple A11:** single cluster, private per-core L2s.
//! 4. **Snapdragon 845:** `big.LITTLE` clusters with cluster-scoped coherence.
//!
//! The families share a method shape but intentionally no trait: their
//! per-chip contracts differ enough that a common interface would obscure
//! them. [`HierarchySim`] dispatches over the closed set instead.

/// Apple A11 single-cluster topology (private per-core L2s).
pub mod apple_a11;

/// Apple A9 single-cluster topology (shared L2, victim L3).
pub mod apple_a9;

/// AMD Jaguar dual-die topology.
pub mod jaguar;

/// Qualcomm Snapdragon 845 `big.LITTLE` topology.
pub mod snapdragon;

pub use apple_a11::AppleA11Sim;
pub use apple_a9::AppleA9Sim;
pub use jaguar::JaguarSim;
pub use snapdragon::Snapdragon845Sim;

use crate::common::access::{AccessMode, AccessResult};
use crate::common::error::ConfigError;
use crate::config::{SimConfig, Topology};

/// Topology-dispatched simulator, selected once at configuration time.
///
/// Wraps exactly one chip simulator and forwards the uniform operations to
/// it. Construction zero-initializes every owned cache; thereafter
/// [`access`](Self::access) is the sole steady-state entry point.
#[derive(Debug)]
pub enum HierarchySim {
    /// Dual-die AMD Jaguar chip.
    Jaguar(JaguarSim),
    /// Apple A9 chip.
    AppleA9(AppleA9Sim),
    /// Apple A11 chip.
    AppleA11(AppleA11Sim),
    /// Qualcomm Snapdragon 845 chip.
    Snapdragon845(Snapdragon845Sim),
}

impl HierarchySim {
    /// Builds the simulator selected by `config.topology`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a chip geometry is structurally
    /// invalid; the built-in chip constants always construct.
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        Ok(match config.topology {
            Topology::Jaguar => Self::Jaguar(JaguarSim::new()?),
            Topology::AppleA9 => Self::AppleA9(AppleA9Sim::new()?),
            Topology::AppleA11 => Self::AppleA11(AppleA11Sim::new()?),
            Topology::Snapdragon845 => Self::Snapdragon845(Snapdragon845Sim::new()?),
        })
    }

    /// Classifies one access of `size` bytes at `addr` by `core_index`.
    pub fn access(
        &mut self,
        core_index: usize,
        addr: u64,
        size: u64,
        mode: AccessMode,
    ) -> AccessResult {
        match self {
            Self::Jaguar(sim) => sim.access(core_index, addr, size, mode),
            Self::AppleA9(sim) => sim.access(core_index, addr, size, mode),
            Self::AppleA11(sim) => sim.access(core_index, addr, size, mode),
            Self::Snapdragon845(sim) => sim.access(core_index, addr, size, mode),
        }
    }

    /// Hands out the next simulated core index for callers without real
    /// affinity data, using the selected topology's own assignment rule.
    pub fn next_core(&self) -> usize {
        match self {
            Self::Jaguar(sim) => sim.next_core(),
            Self::AppleA9(sim) => sim.next_core(),
            Self::AppleA11(sim) => sim.next_core(),
            Self::Snapdragon845(sim) => sim.next_core(),
        }
    }

    /// Number of simulated cores the selected topology exposes.
    #[must_use]
    pub const fn core_count(&self) -> usize {
        match self {
            Self::Jaguar(sim) => sim.core_count(),
            Self::AppleA9(sim) => sim.core_count(),
            Self::AppleA11(sim) => sim.core_count(),
            Self::Snapdragon845(sim) => sim.core_count(),
        }
    }

    /// Empties every owned cache for a fresh profiling session.
    pub fn reset(&mut self) {
        match self {
            Self::Jaguar(sim) => sim.reset(),
            Self::AppleA9(sim) => sim.reset(),
            Self::AppleA11(sim) => sim.reset(),
            Self::Snapdragon845(sim) => sim.reset(),
        }
    }
}
