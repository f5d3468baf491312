//! # Unit Components
//!
//! Fine-grained tests for the individual pieces of the simulator: the
//! recency-ordered cache, the configuration layer, and one file per chip
//! topology.


/// Tests for the set-associative cache building block.
pub mod cache;

/// Tests for geometry/topology configuration and the dispatch enum.
pub mod config;
