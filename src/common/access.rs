//! Memory access classification types.
//!
//! This module defines the two vocabularies shared by every topology:
//! 1. **Access Modes:** Distinguishing data reads, instruction fetches, and writes.
//! 2. **Access Results:** The severity-ordered outcome of a simulated access.

/// Kind of memory access observed by the instrumentation harness.
///
/// The mode decides which L1 array a probe targets (instruction vs. data)
/// and whether the access triggers a coherence invalidation broadcast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessMode {
    /// Ordinary data read (load).
    Read,
    /// Instruction fetch.
    CodeRead,
    /// Data write (store).
    Write,
}

impl AccessMode {
    /// Returns `true` for instruction fetches.
    #[inline]
    #[must_use]
    pub const fn is_code(self) -> bool {
        matches!(self, Self::CodeRead)
    }
}

/// Outcome of a simulated access, ordered by increasing severity.
///
/// The numeric ordering is load-bearing: when an access straddles cache
/// lines, the whole access reports the numerically largest outcome among
/// its lines. The trailing variants are reserved slots kept so that
/// harness-side result tables stay index-compatible; the engine never
/// produces them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum AccessResult {
    /// Hit in the requesting core's data L1.
    D1Hit = 0,
    /// Hit in the requesting core's instruction L1.
    I1Hit,
    /// Missed the L1 but hit the L2.
    L2Hit,
    /// Missed the L2 on an instruction fetch.
    L2CodeMiss,
    /// Missed the L2 on a data access.
    L2DataMiss,
    /// Reserved for harness-side prefetch bookkeeping.
    PrefetchHitD1,
    /// Reserved for harness-side prefetch bookkeeping.
    PrefetchHitL2,
    /// Reserved instruction-count slot for harness-side bookkeeping.
    InstructionsExecuted,
}

impl AccessResult {
    /// The L1-hit outcome matching `mode` (I1 for fetches, D1 otherwise).
    #[inline]
    pub(crate) const fn l1_hit(mode: AccessMode) -> Self {
        match mode {
            AccessMode::CodeRead => Self::I1Hit,
            AccessMode::Read | AccessMode::Write => Self::D1Hit,
        }
    }

    /// The L2-miss outcome matching `mode`.
    #[inline]
    pub(crate) const fn l2_miss(mode: AccessMode) -> Self {
        match mode {
            AccessMode::CodeRead => Self::L2CodeMiss,
            AccessMode::Read | AccessMode::Write => Self::L2DataMiss,
        }
    }
}
