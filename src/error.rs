// Error types for the stability monitor
//
// This module defines the audio error type used by playback initialization,
// providing structured error handling with numeric codes. Audio failures are
// the only modeled error class: the controller logs them and continues in
// degraded (silent) mode rather than surfacing them to callers.

use std::fmt;

use log::error;

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// surfaces that need numeric codes (telemetry, platform bridges).
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

/// Log an audio error with structured context
///
/// Logs the numeric code and message together with the call site so the
/// degraded-mode decision is visible in the log.
pub fn log_audio_error(err: &AudioError, context: &str) {
    error!(
        "Audio error in {}: code={}, component=Playback, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Audio-related errors
///
/// These errors cover playback initialization: opening the output device and
/// loading the two fixed tracks.
///
/// Error code ranges: 1001-1004
#[derive(Debug, Clone, PartialEq)]
pub enum AudioError {
    /// No usable audio output device was found
    DeviceUnavailable,

    /// Failed to open the audio output stream
    StreamOpenFailed { reason: String },

    /// Failed to read or decode a track file
    TrackLoadFailed { path: String, reason: String },

    /// Track format is not supported by the playback backend
    UnsupportedFormat { details: String },
}

impl ErrorCode for AudioError {
    fn code(&self) -> i32 {
        match self {
            AudioError::DeviceUnavailable => 1001,
            AudioError::StreamOpenFailed { .. } => 1002,
            AudioError::TrackLoadFailed { .. } => 1003,
            AudioError::UnsupportedFormat { .. } => 1004,
        }
    }

    fn message(&self) -> String {
        match self {
            AudioError::DeviceUnavailable => "No default audio output device found".to_string(),
            AudioError::StreamOpenFailed { reason } => {
                format!("Failed to open audio output stream: {}", reason)
            }
            AudioError::TrackLoadFailed { path, reason } => {
                format!("Failed to load track {}: {}", path, reason)
            }
            AudioError::UnsupportedFormat { details } => {
                format!("Unsupported track format: {}", details)
            }
        }
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AudioError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for AudioError {}

/// Convert from hound decode errors to AudioError
impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        AudioError::UnsupportedFormat {
            details: err.to_string(),
        }
    }
}

/// Convert from std::io::Error to AudioError
impl From<std::io::Error> for AudioError {
    fn from(err: std::io::Error) -> Self {
        AudioError::StreamOpenFailed {
            reason: err.to_string(),
        }
    }
}
