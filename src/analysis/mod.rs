// Analysis module - stability classification
//
// Pure threshold logic lives here, separated from the side effects
// (display updates, playback commands) applied by the controller.

pub mod classifier;

pub use classifier::{Stability, StabilityClassifier};
