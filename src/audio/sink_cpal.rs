//! Desktop playback sink backed by cpal.
//!
//! Each channel owns one output stream that keeps running for the life of
//! the sink; start/stop gate a shared atomic flag read by the stream
//! callback, and prepare rewinds the shared position. This keeps every
//! command non-blocking and the callback allocation-free.
//!
//! Tracks are played at the device rate without resampling. A track that
//! runs to completion flags its channel stopped; a later start replays it
//! from the beginning.
//!
//! Behavioral coverage lives against `StubPlayback`; this sink is only
//! exercised on machines with an output device.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::{AudioChannel, Playback, Track};
use crate::config::AudioAssets;
use crate::error::AudioError;

/// One channel's stream plus the state shared with its callback
struct ChannelSlot {
    /// Kept alive so the output stream keeps running
    _stream: cpal::Stream,
    playing: Arc<AtomicBool>,
    position: Arc<AtomicUsize>,
    track_len: usize,
}

/// Playback sink over the default cpal output device
pub struct CpalPlayback {
    stable: Option<ChannelSlot>,
    movement: Option<ChannelSlot>,
}

impl CpalPlayback {
    /// Open both channels, loading the fixed track of each
    ///
    /// # Arguments
    /// * `assets` - Paths of the stable and movement tracks
    ///
    /// # Errors
    /// - Track file missing or undecodable
    /// - No default output device
    /// - Output stream cannot be opened
    pub fn new(assets: &AudioAssets) -> Result<Self, AudioError> {
        let stable = Self::open_channel(Track::from_wav_file(&assets.stable_track)?)?;
        let movement = Self::open_channel(Track::from_wav_file(&assets.movement_track)?)?;

        log::info!("[Playback] Opened cpal output for both channels");

        Ok(Self {
            stable: Some(stable),
            movement: Some(movement),
        })
    }

    fn open_channel(track: Track) -> Result<ChannelSlot, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::DeviceUnavailable)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::StreamOpenFailed {
                reason: format!("Failed to get default output config: {:?}", e),
            })?;

        let stream_config: cpal::StreamConfig = config.clone().into();
        let channels_count = stream_config.channels as usize;

        let samples: Arc<Vec<f32>> = Arc::new(track.samples().to_vec());
        let track_len = samples.len();
        let playing = Arc::new(AtomicBool::new(false));
        let position = Arc::new(AtomicUsize::new(0));

        let cb_samples = Arc::clone(&samples);
        let cb_playing = Arc::clone(&playing);
        let cb_position = Arc::clone(&position);

        let err_fn = |err| log::error!("Output stream error: {}", err);

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels_count) {
                        let value = if cb_playing.load(Ordering::Relaxed) {
                            let pos = cb_position.load(Ordering::Relaxed);
                            if pos < cb_samples.len() {
                                cb_position.store(pos + 1, Ordering::Relaxed);
                                cb_samples[pos]
                            } else {
                                // Track ran to completion
                                cb_playing.store(false, Ordering::Relaxed);
                                0.0
                            }
                        } else {
                            0.0
                        };
                        for out in frame.iter_mut() {
                            *out = value;
                        }
                    }
                },
                err_fn,
                None,
            ),
            _ => {
                return Err(AudioError::StreamOpenFailed {
                    reason: "Only F32 sample format is currently supported for output".to_string(),
                })
            }
        }
        .map_err(|e| AudioError::StreamOpenFailed {
            reason: format!("{:?}", e),
        })?;

        stream.play().map_err(|e| AudioError::StreamOpenFailed {
            reason: format!("{:?}", e),
        })?;

        Ok(ChannelSlot {
            _stream: stream,
            playing,
            position,
            track_len,
        })
    }

    fn slot(&self, channel: AudioChannel) -> Option<&ChannelSlot> {
        match channel {
            AudioChannel::Stable => self.stable.as_ref(),
            AudioChannel::Movement => self.movement.as_ref(),
        }
    }
}

impl Playback for CpalPlayback {
    fn start(&mut self, channel: AudioChannel) {
        match self.slot(channel) {
            Some(slot) => {
                // A completed track restarts from the beginning
                if slot.position.load(Ordering::Relaxed) >= slot.track_len {
                    slot.position.store(0, Ordering::Relaxed);
                }
                slot.playing.store(true, Ordering::Relaxed);
            }
            None => log::warn!("[Playback] start on released channel {:?}", channel),
        }
    }

    fn stop(&mut self, channel: AudioChannel) {
        match self.slot(channel) {
            Some(slot) => slot.playing.store(false, Ordering::Relaxed),
            None => log::warn!("[Playback] stop on released channel {:?}", channel),
        }
    }

    fn prepare(&mut self, channel: AudioChannel) {
        match self.slot(channel) {
            Some(slot) => slot.position.store(0, Ordering::Relaxed),
            None => log::warn!("[Playback] prepare on released channel {:?}", channel),
        }
    }

    fn is_playing(&self, channel: AudioChannel) -> bool {
        self.slot(channel)
            .map(|slot| slot.playing.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    fn release(&mut self) {
        // Dropping the slots tears down the output streams
        self.stable = None;
        self.movement = None;
        log::info!("[Playback] Released cpal output streams");
    }
}
