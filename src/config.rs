//! Configuration management for classification thresholds and audio assets
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling threshold tuning without recompilation. The defaults are the
//! shipping values; a missing or malformed config file falls back to them
//! with a logged warning.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub thresholds: StabilityThresholds,
    pub audio: AudioAssets,
}

/// Fixed thresholds for the stability classification rules
///
/// A device counts as stable when lateral acceleration on x and y stays
/// within `lateral_tolerance` of zero and the z axis reads gravity, i.e.
/// within `[gravity_min, gravity_max]`. Rotation around z above
/// `rotation_rate_limit` forces the moving state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StabilityThresholds {
    /// Maximum absolute x/y acceleration in m/s² still considered stable
    pub lateral_tolerance: f32,
    /// Lower bound of the gravity-aligned z window in m/s²
    pub gravity_min: f32,
    /// Upper bound of the gravity-aligned z window in m/s²
    pub gravity_max: f32,
    /// Rotation rate around z in rad/s above which the device is moving
    pub rotation_rate_limit: f32,
}

impl Default for StabilityThresholds {
    fn default() -> Self {
        Self {
            lateral_tolerance: 0.5,
            gravity_min: 9.5,
            gravity_max: 10.5,
            rotation_rate_limit: 2.0,
        }
    }
}

/// Paths of the two fixed audio tracks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioAssets {
    /// Track played while the device is stable
    pub stable_track: PathBuf,
    /// Track played while the device is moving
    pub movement_track: PathBuf,
}

impl Default for AudioAssets {
    fn default() -> Self {
        Self {
            stable_track: PathBuf::from("assets/stable.wav"),
            movement_track: PathBuf::from("assets/movement.wav"),
        }
    }
}

impl Default for AppConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            thresholds: StabilityThresholds::default(),
            audio: AudioAssets::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or the defaults if the file is missing or the
    /// JSON is invalid (best-effort policy, failures are logged)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file("assets/stability_config.json")
    }
}
