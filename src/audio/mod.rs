// Audio playback collaborator
//
// The controller addresses two independent playback channels and issues
// start/stop/prepare commands against them. The `Playback` trait is the
// seam: the cpal-backed sink implements it on desktop, the stub implements
// it for tests and headless runs.

pub mod stubs;
pub mod track;

cfg_if::cfg_if! {
    if #[cfg(not(target_os = "android"))] {
        pub mod sink_cpal;
        pub use sink_cpal::CpalPlayback;
    }
}

pub use stubs::StubPlayback;
pub use track::Track;

use serde::{Deserialize, Serialize};

/// Identifies one of the two fixed playback channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioChannel {
    /// Track played while the device is stable
    Stable,
    /// Track played while the device is moving
    Movement,
}

impl AudioChannel {
    /// Both channels, in a fixed order (used for reset/teardown sweeps)
    pub const ALL: [AudioChannel; 2] = [AudioChannel::Stable, AudioChannel::Movement];
}

/// Playback capability over the two named channels
///
/// Channels carry independent playing/stopped state. Implementations do not
/// enforce mutual exclusion between channels; the controller's toggle logic
/// guarantees at most one channel plays at a time.
///
/// Command failures after successful construction are handled internally
/// (logged, never surfaced): only construction of an implementation is a
/// modeled error path.
pub trait Playback {
    /// Begin or resume playback on a channel
    fn start(&mut self, channel: AudioChannel);

    /// Halt playback on a channel, leaving its position where it stopped
    fn stop(&mut self, channel: AudioChannel);

    /// Rewind a channel so a subsequent start replays from the beginning
    fn prepare(&mut self, channel: AudioChannel);

    /// Whether a channel is currently playing
    fn is_playing(&self, channel: AudioChannel) -> bool;

    /// Free all playback resources; commands after release are no-ops
    fn release(&mut self);
}
