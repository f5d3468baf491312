//! Configuration and Dispatch Unit Tests.
//!
//! Verifies JSON deserialization of the simulator configuration, the
//! documented per-chip cache geometries, and the topology dispatch enum.

use cachesim::cache::SetAssocCache;
use cachesim::{AccessMode, AccessResult, CacheGeometry, HierarchySim, SimConfig, Topology};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Deserialization
// ══════════════════════════════════════════════════════════

/// The default configuration selects the Jaguar topology.
#[test]
fn default_topology_is_jaguar() {
    let config = SimConfig::default();
    assert_eq!(config.topology, Topology::Jaguar);
}

/// Topology tags deserialize from their `PascalCase` names.
#[rstest]
#[case::jaguar(r#"{ "topology": "Jaguar" }"#, Topology::Jaguar)]
#[case::a9(r#"{ "topology": "AppleA9" }"#, Topology::AppleA9)]
#[case::a11(r#"{ "topology": "AppleA11" }"#, Topology::AppleA11)]
#[case::sd845(r#"{ "topology": "Snapdragon845" }"#, Topology::Snapdragon845)]
#[case::sd845_alias(r#"{ "topology": "SD845" }"#, Topology::Snapdragon845)]
fn topology_deserializes(#[case] json: &str, #[case] expected: Topology) {
    let config: SimConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.topology, expected);
}

/// An empty object falls back to the default topology.
#[test]
fn missing_topology_defaults() {
    let config: SimConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.topology, Topology::Jaguar);
}

// ══════════════════════════════════════════════════════════
// 2. Documented chip geometries
// ══════════════════════════════════════════════════════════

/// Every documented chip geometry satisfies the construction invariants
/// (capacity divides exactly, ways are a power of two).
#[rstest]
#[case::jaguar_d1(CacheGeometry::JAGUAR_D1)]
#[case::jaguar_i1(CacheGeometry::JAGUAR_I1)]
#[case::jaguar_l2(CacheGeometry::JAGUAR_L2)]
#[case::a9_d1(CacheGeometry::A9_D1)]
#[case::a9_i1(CacheGeometry::A9_I1)]
#[case::a9_l2(CacheGeometry::A9_L2)]
#[case::a9_l3(CacheGeometry::A9_L3)]
#[case::a11_d1(CacheGeometry::A11_D1)]
#[case::a11_i1(CacheGeometry::A11_I1)]
#[case::a11_l2(CacheGeometry::A11_L2)]
#[case::a75_d1(CacheGeometry::SD845_A75_D1)]
#[case::a75_i1(CacheGeometry::SD845_A75_I1)]
#[case::a75_l2(CacheGeometry::SD845_A75_L2)]
#[case::a55_d1(CacheGeometry::SD845_A55_D1)]
#[case::a55_i1(CacheGeometry::SD845_A55_I1)]
#[case::a55_l2(CacheGeometry::SD845_A55_L2)]
fn chip_geometry_constructs(#[case] geometry: CacheGeometry) {
    let cache = SetAssocCache::new(geometry).unwrap();
    assert_eq!(
        cache.set_count() * cache.ways() * cache.line_bytes(),
        geometry.size_bytes
    );
    assert!(cache.ways().is_power_of_two());
}

// ══════════════════════════════════════════════════════════
// 3. Topology dispatch
// ══════════════════════════════════════════════════════════

/// The dispatch enum exposes each topology's core count.
#[rstest]
#[case::jaguar(Topology::Jaguar, 8)]
#[case::a9(Topology::AppleA9, 2)]
#[case::a11(Topology::AppleA11, 6)]
#[case::sd845(Topology::Snapdragon845, 8)]
fn dispatch_reports_core_count(#[case] topology: Topology, #[case] expected: usize) {
    let sim = HierarchySim::new(&SimConfig { topology }).unwrap();
    assert_eq!(sim.core_count(), expected);
    assert_eq!(topology.core_count(), expected);
}

/// Every dispatched topology follows the same steady-state shape: a cold
/// read misses and an immediate re-read by the same core hits the data L1.
#[rstest]
#[case::jaguar(Topology::Jaguar)]
#[case::a9(Topology::AppleA9)]
#[case::a11(Topology::AppleA11)]
#[case::sd845(Topology::Snapdragon845)]
fn dispatch_forwards_accesses(#[case] topology: Topology) {
    let mut sim = HierarchySim::new(&SimConfig { topology }).unwrap();

    assert_eq!(
        sim.access(0, 0x2000, 8, AccessMode::Read),
        AccessResult::L2DataMiss
    );
    assert_eq!(
        sim.access(0, 0x2000, 8, AccessMode::Read),
        AccessResult::D1Hit
    );

    // Reset empties the constellation again.
    sim.reset();
    assert_eq!(
        sim.access(0, 0x2000, 8, AccessMode::Read),
        AccessResult::L2DataMiss
    );
}
