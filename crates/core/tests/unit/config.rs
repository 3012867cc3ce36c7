//! # Configuration Tests
//!
//! Defaults, JSON deserialization and validation.

use procsim_core::common::ConfigError;
use procsim_core::config::*;
use procsim_core::isa::FuClass;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.units.count(FuClass::K0), 3);
    assert_eq!(config.units.count(FuClass::K1), 2);
    assert_eq!(config.units.count(FuClass::K2), 1);
    assert_eq!(config.pipeline.width, 4);
    assert_eq!(config.pipeline.rob_size, 12);
    assert_eq!(config.pipeline.rs_capacity(), 12);
    assert_eq!(config.pipeline.preg_pool, 32);
    assert!(!config.general.record_timeline);
    assert!(!config.general.check_invariants);
    assert_eq!(config.general.max_cycles, None);
}

#[test]
fn test_from_json_empty_object_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.pipeline.width, 4);
    assert_eq!(config.units.k0, 3);
}

#[test]
fn test_from_json_full() {
    let json = r#"{
        "general": { "record_timeline": true, "max_cycles": 1000, "check_invariants": true },
        "units": { "k0": 2, "k1": 2, "k2": 2 },
        "pipeline": { "width": 8, "rob_size": 64, "rs_size": 16, "preg_pool": 96 }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert!(config.general.record_timeline);
    assert_eq!(config.general.max_cycles, Some(1000));
    assert_eq!(config.units.k1, 2);
    assert_eq!(config.pipeline.rs_capacity(), 16);
    assert_eq!(config.pipeline.preg_pool, 96);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_json_rejects_negative() {
    let err = Config::from_json(r#"{ "pipeline": { "width": -1 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_from_json_rejects_malformed() {
    assert!(matches!(
        Config::from_json("{ units: "),
        Err(ConfigError::Parse(_))
    ));
}

#[rstest]
#[case::k0(|c: &mut Config| c.units.k0 = 0, "units.k0")]
#[case::k1(|c: &mut Config| c.units.k1 = 0, "units.k1")]
#[case::k2(|c: &mut Config| c.units.k2 = 0, "units.k2")]
#[case::width(|c: &mut Config| c.pipeline.width = 0, "pipeline.width")]
#[case::rob(|c: &mut Config| c.pipeline.rob_size = 0, "pipeline.rob_size")]
#[case::rs(|c: &mut Config| c.pipeline.rs_size = Some(0), "pipeline.rs_size")]
#[case::pool(|c: &mut Config| c.pipeline.preg_pool = 0, "pipeline.preg_pool")]
#[case::max_cycles(|c: &mut Config| c.general.max_cycles = Some(0), "general.max_cycles")]
fn test_validate_rejects_zero(#[case] mutate: fn(&mut Config), #[case] expected: &str) {
    let mut config = Config::default();
    mutate(&mut config);
    match config.validate() {
        Err(ConfigError::NonPositive { field }) => assert_eq!(field, expected),
        other => panic!("expected NonPositive for {expected}, got {other:?}"),
    }
}

#[test]
fn test_error_message_names_field() {
    let mut config = Config::default();
    config.pipeline.rob_size = 0;
    let msg = config.validate().unwrap_err().to_string();
    assert!(msg.contains("pipeline.rob_size"), "{msg}");
}
