// Telemetry - state change events for CLI and UI surfaces

pub mod events;

pub use events::{StabilityEvent, Trigger};
