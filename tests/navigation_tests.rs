use keyboard_attractor::navigation::{angle_to_display, display_to_angle};
use keyboard_attractor::{AttractorConfig, Direction, PendingTarget, TunableParameters};
use rstest::rstest;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

#[rstest]
#[case(Direction::Forward, FRAC_PI_2, 0.0)]
#[case(Direction::Left, 3.0 * FRAC_PI_4, 45.0)]
#[case(Direction::Right, FRAC_PI_4, -45.0)]
fn test_default_command_angles(
    #[case] direction: Direction,
    #[case] stored: f64,
    #[case] display: f64,
) {
    let target = TunableParameters::default().target(direction);

    assert_eq!(target.angle, stored);
    assert!((angle_to_display(target.angle) - display).abs() < 1e-9);
}

#[rstest]
#[case(0.0, 1.0)]
#[case(FRAC_PI_4, 2.0)]
#[case(PI, 0.5)]
#[case(-3.0, 3.3)]
#[case(12.5, 1.0)]
fn test_target_formula(#[case] angle: f64, #[case] distance: f64) {
    let target = PendingTarget::from_polar(Direction::Left, angle, distance);

    assert!((target.x() - distance * angle.sin()).abs() < 1e-12);
    assert!((target.y() + distance * angle.cos()).abs() < 1e-12);
    assert_eq!(target.z(), 0.0);
}

#[test]
fn test_display_round_trip_far_from_origin() {
    let stored = 3.0 * FRAC_PI_4 + 1000.0 * 0.01;
    assert!((display_to_angle(angle_to_display(stored)) - stored).abs() < 1e-9);
}

#[test]
fn test_sample_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/keyboard_attractor.yaml");

    let config = AttractorConfig::from_yaml_file(path).unwrap();
    let defaults = AttractorConfig::default();

    assert_eq!(config.frame_id, defaults.frame_id);
    assert_eq!(config.topic, defaults.topic);
    assert_eq!(config.queue_depth, defaults.queue_depth);
    assert_eq!(config.keys, defaults.keys);
    assert!(!config.drain_burst);
    assert!((config.angle_left - defaults.angle_left).abs() < 1e-12);
    assert!((config.angle_right - defaults.angle_right).abs() < 1e-12);
    assert!((config.angle_forward - defaults.angle_forward).abs() < 1e-12);
}

#[test]
fn test_missing_config_file_is_error() {
    assert!(AttractorConfig::from_yaml_file("/nonexistent/keyboard_attractor.yaml").is_err());
}
