//! # Statistics Tests
//!
//! Derived metrics and serialized shape of the statistics record.

use pretty_assertions::assert_eq;
use procsim_core::SimStats;
use procsim_core::isa::FuClass;

#[test]
fn test_default_stats_all_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.instructions_dispatched, 0);
    assert_eq!(stats.instructions_fired, 0);
    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(stats.fired_by_class, [0; 3]);
    assert_eq!(stats.stalls_rs_full + stats.stalls_rob_full + stats.stalls_no_preg, 0);
    assert_eq!(stats.max_rob_occupancy, 0);
    assert!(stats.timeline.is_none());
}

#[test]
fn test_averages_over_cycles() {
    let stats = SimStats {
        cycles: 7,
        instructions_fired: 3,
        instructions_retired: 3,
        ..SimStats::default()
    };
    assert!((stats.avg_inst_fired() - 3.0 / 7.0).abs() < 1e-12);
    assert!((stats.avg_inst_retired() - 3.0 / 7.0).abs() < 1e-12);
}

#[test]
fn test_fired_by_class_accessor() {
    let stats = SimStats {
        fired_by_class: [5, 3, 1],
        ..SimStats::default()
    };
    assert_eq!(stats.fired(FuClass::K0), 5);
    assert_eq!(stats.fired(FuClass::K1), 3);
    assert_eq!(stats.fired(FuClass::K2), 1);
}

#[test]
fn test_serialized_shape() {
    let stats = SimStats {
        cycles: 10,
        instructions_retired: 4,
        ..SimStats::new(true)
    };
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["cycles"], 10);
    assert_eq!(json["instructions_retired"], 4);
    assert_eq!(json["fired_by_class"], serde_json::json!([0, 0, 0]));
    assert_eq!(json["timeline"], serde_json::json!([]));
}
