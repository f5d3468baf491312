//! Common types shared across the cache hierarchy simulator.
//!
//! This module provides the building blocks used by every topology:
//! 1. **Access Types:** Modes (read/fetch/write) and severity-ordered results.
//! 2. **Line Addressing:** The fixed 64-byte line constants and the span
//!    iterator for line-straddling accesses.
//! 3. **Error Handling:** Construction-time geometry validation errors.

/// Access mode and severity-ordered access result definitions.
pub mod access;

/// Line-granular address decomposition helpers.
pub mod addr;

/// Configuration error types.
pub mod error;

pub use access::{AccessMode, AccessResult};
pub use addr::{line_span, LINE_SHIFT, LINE_SIZE};
pub use error::ConfigError;
