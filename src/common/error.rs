//! Configuration error definitions.
//!
//! All failures in this crate are construction-time configuration defects;
//! the steady-state access path is infallible by design. This module defines
//! the error type returned when a cache geometry violates the structural
//! invariants required by the set-associative layout.

use thiserror::Error;

/// A cache geometry rejected at construction time.
///
/// The set-associative layout requires the declared capacity to divide
/// exactly into `set_count * ways * line_bytes`, the way count to be a
/// power of two, and the line size to be a power of two so the tag can be
/// computed with a shift.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The way count is not a power of two.
    #[error("associativity must be a power of two, got {ways} ways")]
    WaysNotPowerOfTwo {
        /// The rejected way count.
        ways: usize,
    },

    /// The line size is not a power of two.
    #[error("line size must be a power of two, got {line_bytes} bytes")]
    LineNotPowerOfTwo {
        /// The rejected line size in bytes.
        line_bytes: usize,
    },

    /// The capacity does not divide exactly into whole sets.
    #[error(
        "cache size {size_bytes} does not divide into {ways}-way sets of {line_bytes}-byte lines"
    )]
    SizeNotDivisible {
        /// The declared total capacity in bytes.
        size_bytes: usize,
        /// The line size in bytes.
        line_bytes: usize,
        /// The way count.
        ways: usize,
    },
}
