//! Stub playback sink for desktop testing
//!
//! This module provides a stub implementation of `Playback` that tracks
//! channel state without touching audio hardware. It backs headless replay
//! runs and every behavioral test of the controller's toggle logic.
//!
//! Cloning a `StubPlayback` shares its state, so a test can hand one clone
//! to the controller and keep another for assertions.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use super::{AudioChannel, Playback};

/// Per-channel flags shared between clones
#[derive(Debug)]
struct ChannelFlags {
    playing: AtomicBool,
    /// Whether the playhead sits at the start of the track
    at_start: AtomicBool,
    starts: AtomicU32,
}

impl ChannelFlags {
    fn new() -> Self {
        Self {
            playing: AtomicBool::new(false),
            at_start: AtomicBool::new(true),
            starts: AtomicU32::new(0),
        }
    }
}

/// Stub playback sink tracking channel state in memory
#[derive(Debug, Clone)]
pub struct StubPlayback {
    stable: Arc<ChannelFlags>,
    movement: Arc<ChannelFlags>,
    released: Arc<AtomicBool>,
}

impl StubPlayback {
    /// Create a new stub with both channels stopped and prepared
    pub fn new() -> Self {
        Self {
            stable: Arc::new(ChannelFlags::new()),
            movement: Arc::new(ChannelFlags::new()),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    fn flags(&self, channel: AudioChannel) -> &ChannelFlags {
        match channel {
            AudioChannel::Stable => &self.stable,
            AudioChannel::Movement => &self.movement,
        }
    }

    /// Whether a channel sits at the start of its track (test accessor)
    pub fn is_prepared(&self, channel: AudioChannel) -> bool {
        self.flags(channel).at_start.load(Ordering::Relaxed)
    }

    /// How often a channel has been started (test accessor)
    pub fn start_count(&self, channel: AudioChannel) -> u32 {
        self.flags(channel).starts.load(Ordering::Relaxed)
    }

    /// Whether release() has been called (test accessor)
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Relaxed)
    }
}

impl Default for StubPlayback {
    fn default() -> Self {
        Self::new()
    }
}

impl Playback for StubPlayback {
    fn start(&mut self, channel: AudioChannel) {
        if self.is_released() {
            log::warn!("[Playback] start on released stub");
            return;
        }
        let flags = self.flags(channel);
        flags.playing.store(true, Ordering::Relaxed);
        flags.at_start.store(false, Ordering::Relaxed);
        flags.starts.fetch_add(1, Ordering::Relaxed);
    }

    fn stop(&mut self, channel: AudioChannel) {
        self.flags(channel).playing.store(false, Ordering::Relaxed);
    }

    fn prepare(&mut self, channel: AudioChannel) {
        self.flags(channel).at_start.store(true, Ordering::Relaxed);
    }

    fn is_playing(&self, channel: AudioChannel) -> bool {
        self.flags(channel).playing.load(Ordering::Relaxed)
    }

    fn release(&mut self) {
        for channel in AudioChannel::ALL {
            self.flags(channel).playing.store(false, Ordering::Relaxed);
        }
        self.released.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_clears_prepared_flag() {
        let mut stub = StubPlayback::new();
        assert!(stub.is_prepared(AudioChannel::Stable));

        stub.start(AudioChannel::Stable);
        assert!(stub.is_playing(AudioChannel::Stable));
        assert!(!stub.is_prepared(AudioChannel::Stable));
        assert_eq!(stub.start_count(AudioChannel::Stable), 1);
    }

    #[test]
    fn test_stop_then_prepare_rewinds() {
        let mut stub = StubPlayback::new();
        stub.start(AudioChannel::Movement);
        stub.stop(AudioChannel::Movement);
        assert!(!stub.is_playing(AudioChannel::Movement));
        assert!(!stub.is_prepared(AudioChannel::Movement));

        stub.prepare(AudioChannel::Movement);
        assert!(stub.is_prepared(AudioChannel::Movement));
    }

    #[test]
    fn test_release_silences_and_ignores_start() {
        let mut stub = StubPlayback::new();
        stub.start(AudioChannel::Stable);
        stub.release();

        assert!(stub.is_released());
        assert!(!stub.is_playing(AudioChannel::Stable));

        stub.start(AudioChannel::Movement);
        assert!(!stub.is_playing(AudioChannel::Movement));
    }

    #[test]
    fn test_clones_share_state() {
        let stub = StubPlayback::new();
        let mut for_controller = stub.clone();
        for_controller.start(AudioChannel::Stable);
        assert!(stub.is_playing(AudioChannel::Stable));
    }
}
