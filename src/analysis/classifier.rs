// Classifier - fixed-threshold device stability classification
//
// This module implements the two classification rules that decide whether
// the device is stable or moving:
//
// - Accelerometer rule: stable iff lateral acceleration is near zero and
//   the z axis reads gravity. The result unconditionally overwrites the
//   previous state: there is no hysteresis or debounce, so readings at the
//   boundary may toggle rapidly. That behavior is intentional.
// - Gyroscope rule: rotation around z above the limit forces the moving
//   state. The gyroscope alone never restores the stable state.

use serde::{Deserialize, Serialize};

use crate::config::StabilityThresholds;

/// Stability represents the two-valued classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    /// Device is at rest: accelerometer near (0, 0, g)
    Stable,
    /// Device is in motion
    Moving,
}

impl Stability {
    /// Whether this is the stable state
    pub fn is_stable(self) -> bool {
        matches!(self, Stability::Stable)
    }
}

/// StabilityClassifier applies the threshold rules to raw sensor values
///
/// Thresholds come from `StabilityThresholds` (defaults are the shipping
/// values). The classifier holds no mutable state; state ownership lives
/// in the controller.
#[derive(Debug, Clone)]
pub struct StabilityClassifier {
    thresholds: StabilityThresholds,
}

impl StabilityClassifier {
    /// Create a new StabilityClassifier with the given thresholds
    pub fn new(thresholds: StabilityThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify an accelerometer reading
    ///
    /// Returns `Stability::Stable` iff:
    /// - |x| ≤ lateral_tolerance
    /// - |y| ≤ lateral_tolerance
    /// - gravity_min ≤ z ≤ gravity_max
    ///
    /// The caller overwrites its state with this result unconditionally.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - Accelerometer axes in m/s²
    pub fn classify_accelerometer(&self, x: f32, y: f32, z: f32) -> Stability {
        let t = &self.thresholds;
        let lateral_ok = x.abs() <= t.lateral_tolerance && y.abs() <= t.lateral_tolerance;
        let gravity_ok = z >= t.gravity_min && z <= t.gravity_max;
        if lateral_ok && gravity_ok {
            Stability::Stable
        } else {
            Stability::Moving
        }
    }

    /// Classify a gyroscope reading
    ///
    /// Returns `Some(Stability::Moving)` iff the rotation rate exceeds the
    /// limit, and `None` otherwise. A `None` result means the reading says
    /// nothing about stability and the caller keeps its current state.
    ///
    /// # Arguments
    /// * `rotation_rate_z` - Rotation rate around z in rad/s
    pub fn classify_gyroscope(&self, rotation_rate_z: f32) -> Option<Stability> {
        if rotation_rate_z > self.thresholds.rotation_rate_limit {
            Some(Stability::Moving)
        } else {
            None
        }
    }
}

impl Default for StabilityClassifier {
    fn default() -> Self {
        Self::new(StabilityThresholds::default())
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
