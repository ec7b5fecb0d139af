// Unit tests for the stability classifier threshold rules

use super::*;

fn classifier() -> StabilityClassifier {
    StabilityClassifier::default()
}

#[test]
fn test_resting_reading_is_stable() {
    assert_eq!(
        classifier().classify_accelerometer(0.0, 0.0, 9.81),
        Stability::Stable
    );
}

#[test]
fn test_box_boundaries_are_inclusive() {
    let c = classifier();
    // Corners of the stable box count as stable
    assert_eq!(c.classify_accelerometer(0.5, 0.5, 9.5), Stability::Stable);
    assert_eq!(c.classify_accelerometer(-0.5, -0.5, 10.5), Stability::Stable);
    assert_eq!(c.classify_accelerometer(0.5, -0.5, 10.5), Stability::Stable);
}

#[test]
fn test_outside_any_axis_is_moving() {
    let c = classifier();
    // One axis out of range at a time
    assert_eq!(c.classify_accelerometer(0.51, 0.0, 10.0), Stability::Moving);
    assert_eq!(c.classify_accelerometer(-0.6, 0.0, 10.0), Stability::Moving);
    assert_eq!(c.classify_accelerometer(0.0, 0.7, 10.0), Stability::Moving);
    assert_eq!(c.classify_accelerometer(0.0, 0.0, 9.4), Stability::Moving);
    assert_eq!(c.classify_accelerometer(0.0, 0.0, 10.6), Stability::Moving);
    // Free fall
    assert_eq!(c.classify_accelerometer(0.0, 0.0, 0.0), Stability::Moving);
}

#[test]
fn test_gyroscope_above_limit_forces_moving() {
    let c = classifier();
    assert_eq!(c.classify_gyroscope(2.1), Some(Stability::Moving));
    assert_eq!(c.classify_gyroscope(5.0), Some(Stability::Moving));
}

#[test]
fn test_gyroscope_at_or_below_limit_is_no_op() {
    let c = classifier();
    // The limit itself does not trigger (strictly greater-than)
    assert_eq!(c.classify_gyroscope(2.0), None);
    assert_eq!(c.classify_gyroscope(0.0), None);
    assert_eq!(c.classify_gyroscope(-5.0), None);
}

#[test]
fn test_custom_thresholds_are_honored() {
    let c = StabilityClassifier::new(crate::config::StabilityThresholds {
        lateral_tolerance: 1.0,
        gravity_min: 9.0,
        gravity_max: 11.0,
        rotation_rate_limit: 1.0,
    });
    assert_eq!(c.classify_accelerometer(0.9, -0.9, 9.1), Stability::Stable);
    assert_eq!(c.classify_gyroscope(1.5), Some(Stability::Moving));
}
