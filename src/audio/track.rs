//! WAV track loading for the playback sink.
//!
//! Decodes a track file into mono f32 samples. Multi-channel files are
//! reduced by taking the first channel. No resampling happens here; the
//! sink plays samples at the output device rate.

use std::path::Path;

use crate::error::AudioError;

/// A decoded audio track held fully in memory.
///
/// The two fixed tracks are short loops, so decoding up front keeps the
/// playback callback allocation-free.
#[derive(Debug)]
pub struct Track {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Track {
    /// Load and decode a WAV file.
    ///
    /// Supports 16-bit integer and 32-bit float PCM. Other bit depths are
    /// rejected as `AudioError::UnsupportedFormat`.
    ///
    /// # Arguments
    /// * `path` - Path to the WAV file
    pub fn from_wav_file<P: AsRef<Path>>(path: P) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let mut reader = hound::WavReader::open(path).map_err(|err| AudioError::TrackLoadFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        let spec = reader.spec();
        let channels = spec.channels as usize;

        let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Float, 32) => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(AudioError::from)?,
            (hound::SampleFormat::Int, 16) => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
                .collect::<Result<_, _>>()
                .map_err(AudioError::from)?,
            (format, bits) => {
                return Err(AudioError::UnsupportedFormat {
                    details: format!("{:?} {} bits per sample", format, bits),
                })
            }
        };

        // Take the first channel of interleaved frames
        let samples: Vec<f32> = interleaved.iter().step_by(channels.max(1)).copied().collect();

        log::debug!(
            "[Track] Loaded {} ({} samples at {} Hz, {} channels)",
            path.display(),
            samples.len(),
            spec.sample_rate,
            channels
        );

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
        })
    }

    /// Decoded mono samples in range [-1.0, 1.0].
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate of the source file in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_wav(path: &std::path::Path, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
        for i in 0..100i16 {
            for _ in 0..channels {
                writer.write_sample(i * 100).expect("write sample");
            }
        }
        writer.finalize().expect("finalize wav");
    }

    #[test]
    fn test_load_mono_i16_wav() {
        let path = std::env::temp_dir().join("stability_track_mono.wav");
        write_test_wav(&path, 1);

        let track = Track::from_wav_file(&path).expect("load track");
        assert_eq!(track.len(), 100);
        assert_eq!(track.sample_rate(), 48000);
        assert!(track.samples().iter().all(|s| (-1.0..=1.0).contains(s)));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_stereo_reduces_to_first_channel() {
        let path = std::env::temp_dir().join("stability_track_stereo.wav");
        write_test_wav(&path, 2);

        let track = Track::from_wav_file(&path).expect("load track");
        assert_eq!(track.len(), 100);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_track_load_failed() {
        let err = Track::from_wav_file("does/not/exist.wav").unwrap_err();
        match err {
            AudioError::TrackLoadFailed { path, .. } => {
                assert!(path.contains("does/not/exist.wav"));
            }
            other => panic!("Expected TrackLoadFailed, got {:?}", other),
        }
    }
}
