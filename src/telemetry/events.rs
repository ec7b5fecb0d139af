//! Telemetry event types describing applied state changes, exposed to the
//! CLI and to stream subscribers.

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::Stability;

/// Which input caused a state to be applied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Accelerometer,
    Gyroscope,
    Reset,
}

/// One applied state change, including the status text that was displayed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StabilityEvent {
    pub state: Stability,
    pub trigger: Trigger,
    pub status_text: String,
}
