// Sensor input types and replay feed
//
// The platform sensor service is an external collaborator; this module
// defines the sample contract it delivers and a file-backed replay feed
// that stands in for it on desktop.

pub mod feed;
pub mod types;

pub use feed::ReplayFeed;
pub use types::MotionSample;
