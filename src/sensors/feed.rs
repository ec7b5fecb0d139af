//! File-backed sample feed for the replay harness.
//!
//! Loads newline-delimited JSON motion samples and drives a controller
//! with them in order, standing in for the platform sensor service in
//! the CLI and in integration tests. Intentionally desktop-focused to
//! support CI and QA workflows.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::controller::StabilityController;
use crate::sensors::MotionSample;

/// An ordered sequence of recorded motion samples.
pub struct ReplayFeed {
    samples: Vec<MotionSample>,
}

impl ReplayFeed {
    /// Load a feed from a newline-delimited JSON file.
    ///
    /// Blank lines and lines starting with `#` are skipped so recordings
    /// can carry annotations.
    ///
    /// # Arguments
    /// * `path` - Path to the JSONL sample file
    ///
    /// # Returns
    /// * `Ok(ReplayFeed)` - Parsed feed in file order
    /// * `Err` - If the file cannot be read or a line is not a valid sample
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("opening sample file {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut samples = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("reading line {} of {}", index + 1, path.display()))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let sample: MotionSample = serde_json::from_str(trimmed)
                .with_context(|| format!("parsing sample on line {} of {}", index + 1, path.display()))?;
            samples.push(sample);
        }

        tracing::info!("[Feed] Loaded {} samples from {}", samples.len(), path.display());
        Ok(Self { samples })
    }

    /// Build a feed directly from samples (used by tests).
    pub fn from_samples(samples: Vec<MotionSample>) -> Self {
        Self { samples }
    }

    /// The samples in delivery order.
    pub fn samples(&self) -> &[MotionSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Deliver every sample to the controller in order.
    ///
    /// Delivery is sequential on the calling thread, matching the
    /// callback-driven model of the platform sensor service.
    pub fn drive(&self, controller: &mut StabilityController) {
        for sample in &self.samples {
            controller.handle_sample(*sample);
        }
    }
}
