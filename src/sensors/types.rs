//! Motion sample types delivered by the platform sensor feed.

use serde::{Deserialize, Serialize};

/// A single motion sample from the device IMU.
///
/// Samples arrive at irregular intervals and are consumed once, never
/// retained. Values are trusted as valid, platform-calibrated floats;
/// no range validation happens here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sensor", rename_all = "snake_case")]
pub enum MotionSample {
    /// Three-axis accelerometer reading in m/s².
    Accelerometer { x: f32, y: f32, z: f32 },
    /// Rotation rate around the device z axis in rad/s.
    Gyroscope { rotation_rate_z: f32 },
}

impl MotionSample {
    /// Create an accelerometer sample.
    pub fn accelerometer(x: f32, y: f32, z: f32) -> Self {
        MotionSample::Accelerometer { x, y, z }
    }

    /// Create a gyroscope sample.
    pub fn gyroscope(rotation_rate_z: f32) -> Self {
        MotionSample::Gyroscope { rotation_rate_z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_json_shape() {
        let sample = MotionSample::accelerometer(0.0, 0.1, 9.8);
        let json = serde_json::to_string(&sample).expect("serialize sample");
        assert!(json.contains("\"sensor\":\"accelerometer\""));

        let parsed: MotionSample =
            serde_json::from_str("{\"sensor\":\"gyroscope\",\"rotation_rate_z\":2.5}")
                .expect("parse gyroscope sample");
        assert_eq!(parsed, MotionSample::gyroscope(2.5));
    }
}
