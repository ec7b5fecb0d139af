//! Status display collaborator.
//!
//! The UI layer is external; the controller only pushes fixed status
//! strings through the `StatusDisplay` seam. The strings are the original
//! app's messages and are part of the observable contract.

use std::sync::{Arc, Mutex};

/// Status text shown while the device is stable
pub const STATUS_STABLE: &str = "Se mueve? , nop";
/// Status text shown while the device is moving
pub const STATUS_MOVING: &str = "Se mueve? , sip";
/// Status text shown after a user-triggered reset
pub const STATUS_RESET: &str = "Estado: Estable";

/// Accepts a text string describing the current state
pub trait StatusDisplay {
    fn show(&mut self, text: &str);
}

/// Routes status text to the log; the default display for headless runs
pub struct LogDisplay;

impl StatusDisplay for LogDisplay {
    fn show(&mut self, text: &str) {
        log::info!("[Status] {}", text);
    }
}

/// Captures status text for assertions; clones share the captured lines
#[derive(Debug, Clone, Default)]
pub struct CapturingDisplay {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently shown status text
    pub fn last(&self) -> Option<String> {
        self.lines.lock().ok()?.last().cloned()
    }

    /// Every status text shown so far, in order
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl StatusDisplay for CapturingDisplay {
    fn show(&mut self, text: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(text.to_string());
        }
    }
}
