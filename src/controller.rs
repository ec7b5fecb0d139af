// StabilityController: owns the stability state and its collaborators
//
// Replaces the original global mutable state (one boolean plus two audio
// handles) with a single struct holding the state, the playback sink, and
// the display. The platform-integration layer constructs one controller
// and calls resume/pause/teardown from its lifecycle callbacks.
//
// Single-threaded by contract: sample handlers run sequentially as the
// feed delivers them, and no handler blocks.

use tokio::sync::broadcast;

use crate::analysis::classifier::{Stability, StabilityClassifier};
use crate::audio::{AudioChannel, Playback};
use crate::config::StabilityThresholds;
use crate::display::{StatusDisplay, STATUS_MOVING, STATUS_RESET, STATUS_STABLE};
use crate::error::{log_audio_error, AudioError};
use crate::sensors::MotionSample;
use crate::telemetry::{StabilityEvent, Trigger};

/// Capacity of the telemetry broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// StabilityController applies classification results to the audio and
/// display collaborators
///
/// State transitions are driven solely by the two sample handlers and
/// `reset()`. There is no terminal state; the controller runs until
/// `teardown()` releases its resources.
pub struct StabilityController {
    classifier: StabilityClassifier,
    state: Stability,
    /// None in degraded (silent) mode
    playback: Option<Box<dyn Playback>>,
    display: Box<dyn StatusDisplay>,
    events: broadcast::Sender<StabilityEvent>,
    /// Mirrors the sensor feed subscription; samples are dropped while paused
    subscribed: bool,
}

impl StabilityController {
    /// Create a controller with an already-initialized playback sink
    pub fn new(
        thresholds: StabilityThresholds,
        playback: Box<dyn Playback>,
        display: Box<dyn StatusDisplay>,
    ) -> Self {
        Self::build(thresholds, Some(playback), display)
    }

    /// Create a controller in degraded (silent) mode
    ///
    /// Classification and display keep working; playback commands become
    /// no-ops.
    pub fn silent(thresholds: StabilityThresholds, display: Box<dyn StatusDisplay>) -> Self {
        Self::build(thresholds, None, display)
    }

    /// Create a controller from a playback initialization result
    ///
    /// Initialization failure is logged and swallowed, and the controller
    /// continues in degraded mode. This is a deliberate best-effort policy,
    /// not a recoverable error path.
    pub fn with_playback(
        thresholds: StabilityThresholds,
        playback: Result<Box<dyn Playback>, AudioError>,
        display: Box<dyn StatusDisplay>,
    ) -> Self {
        match playback {
            Ok(playback) => Self::new(thresholds, playback, display),
            Err(err) => {
                log_audio_error(&err, "controller init");
                tracing::warn!("[Controller] Continuing in degraded mode with silent audio");
                Self::silent(thresholds, display)
            }
        }
    }

    fn build(
        thresholds: StabilityThresholds,
        playback: Option<Box<dyn Playback>>,
        display: Box<dyn StatusDisplay>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            classifier: StabilityClassifier::new(thresholds),
            state: Stability::Stable,
            playback,
            display,
            events,
            subscribed: false,
        }
    }

    /// Current stability state
    pub fn state(&self) -> Stability {
        self.state
    }

    /// Whether the controller runs without a playback sink
    pub fn is_silent(&self) -> bool {
        self.playback.is_none()
    }

    /// Subscribe to applied state changes
    ///
    /// Events are dropped if no subscriber keeps up; telemetry never blocks
    /// the sample handlers.
    pub fn subscribe_events(&self) -> broadcast::Receiver<StabilityEvent> {
        self.events.subscribe()
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Attach to the sample feed (platform resume callback)
    pub fn resume(&mut self) {
        self.subscribed = true;
        tracing::debug!("[Controller] Subscribed to sensor feed");
    }

    /// Detach from the sample feed (platform pause callback)
    ///
    /// Samples delivered while paused are dropped; no other cancellation
    /// semantics exist.
    pub fn pause(&mut self) {
        self.subscribed = false;
        tracing::debug!("[Controller] Unsubscribed from sensor feed");
    }

    /// Release playback resources (platform destroy callback)
    ///
    /// After teardown the controller is permanently silent.
    pub fn teardown(&mut self) {
        self.subscribed = false;
        if let Some(mut playback) = self.playback.take() {
            playback.release();
        }
        tracing::debug!("[Controller] Tore down playback resources");
    }

    // ========================================================================
    // SAMPLE HANDLERS
    // ========================================================================

    /// Entry point for the sample feed; dispatches to the typed handlers
    ///
    /// Dropped while unsubscribed.
    pub fn handle_sample(&mut self, sample: MotionSample) {
        if !self.subscribed {
            return;
        }
        match sample {
            MotionSample::Accelerometer { x, y, z } => self.on_accelerometer_sample(x, y, z),
            MotionSample::Gyroscope { rotation_rate_z } => {
                self.on_gyroscope_sample(rotation_rate_z)
            }
        }
    }

    /// Handle an accelerometer reading
    ///
    /// The classification result unconditionally overwrites the current
    /// state (no hysteresis, no debounce), then the state is applied.
    pub fn on_accelerometer_sample(&mut self, x: f32, y: f32, z: f32) {
        self.state = self.classifier.classify_accelerometer(x, y, z);
        self.apply_state(Trigger::Accelerometer);
    }

    /// Handle a gyroscope reading
    ///
    /// A rotation rate above the limit forces the moving state; anything
    /// else is a no-op. The gyroscope alone never restores stable.
    pub fn on_gyroscope_sample(&mut self, rotation_rate_z: f32) {
        if let Some(state) = self.classifier.classify_gyroscope(rotation_rate_z) {
            self.state = state;
            self.apply_state(Trigger::Gyroscope);
        }
    }

    /// User-triggered reset
    ///
    /// Forces the stable state, stops and rewinds both channels, and shows
    /// the fixed reset message. Independent of sample history; does not
    /// start playback.
    pub fn reset(&mut self) {
        self.state = Stability::Stable;
        self.display.show(STATUS_RESET);
        if let Some(playback) = self.playback.as_mut() {
            for channel in AudioChannel::ALL {
                if playback.is_playing(channel) {
                    playback.stop(channel);
                }
                playback.prepare(channel);
            }
        }
        self.emit(Trigger::Reset, STATUS_RESET);
    }

    // ========================================================================
    // STATE APPLICATION
    // ========================================================================

    /// Apply the current state to the display and the playback channels
    ///
    /// The idle channel is stopped and rewound before the active channel is
    /// started, so at most one channel plays afterwards.
    fn apply_state(&mut self, trigger: Trigger) {
        let status = if self.state.is_stable() {
            STATUS_STABLE
        } else {
            STATUS_MOVING
        };
        self.display.show(status);

        if let Some(playback) = self.playback.as_mut() {
            let (active, idle) = match self.state {
                Stability::Stable => (AudioChannel::Stable, AudioChannel::Movement),
                Stability::Moving => (AudioChannel::Movement, AudioChannel::Stable),
            };

            if playback.is_playing(idle) {
                playback.stop(idle);
                playback.prepare(idle);
            }
            if !playback.is_playing(active) {
                playback.start(active);
            }
        }

        self.emit(trigger, status);
    }

    fn emit(&self, trigger: Trigger, status_text: &str) {
        // Send failure just means nobody is listening
        let _ = self.events.send(StabilityEvent {
            state: self.state,
            trigger,
            status_text: status_text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::StubPlayback;
    use crate::display::CapturingDisplay;

    fn controller_with_stub() -> (StabilityController, StubPlayback, CapturingDisplay) {
        let stub = StubPlayback::new();
        let display = CapturingDisplay::new();
        let mut controller = StabilityController::new(
            StabilityThresholds::default(),
            Box::new(stub.clone()),
            Box::new(display.clone()),
        );
        controller.resume();
        (controller, stub, display)
    }

    fn assert_at_most_one_playing(stub: &StubPlayback) {
        let both = stub.is_playing(AudioChannel::Stable) && stub.is_playing(AudioChannel::Movement);
        assert!(!both, "both channels playing at once");
    }

    #[test]
    fn test_initial_state_is_stable() {
        let (controller, stub, _) = controller_with_stub();
        assert_eq!(controller.state(), Stability::Stable);
        // No playback until the first sample arrives
        assert!(!stub.is_playing(AudioChannel::Stable));
    }

    #[test]
    fn test_stable_reading_starts_stable_channel() {
        let (mut controller, stub, display) = controller_with_stub();

        controller.on_accelerometer_sample(0.0, 0.0, 10.0);

        assert_eq!(controller.state(), Stability::Stable);
        assert!(stub.is_playing(AudioChannel::Stable));
        assert!(!stub.is_playing(AudioChannel::Movement));
        assert_eq!(display.last().as_deref(), Some(STATUS_STABLE));
    }

    #[test]
    fn test_gyroscope_overrides_stable_reading() {
        let (mut controller, stub, display) = controller_with_stub();

        controller.on_accelerometer_sample(0.0, 0.0, 10.0);
        controller.on_gyroscope_sample(5.0);

        assert_eq!(controller.state(), Stability::Moving);
        assert!(stub.is_playing(AudioChannel::Movement));
        assert!(!stub.is_playing(AudioChannel::Stable));
        // The displaced channel was rewound for the next start
        assert!(stub.is_prepared(AudioChannel::Stable));
        assert_eq!(display.last().as_deref(), Some(STATUS_MOVING));
        assert_at_most_one_playing(&stub);
    }

    #[test]
    fn test_gyroscope_below_limit_is_no_op() {
        let (mut controller, stub, display) = controller_with_stub();

        controller.on_accelerometer_sample(0.0, 0.0, 10.0);
        let starts_before = stub.start_count(AudioChannel::Stable);
        controller.on_gyroscope_sample(2.0);

        assert_eq!(controller.state(), Stability::Stable);
        assert_eq!(stub.start_count(AudioChannel::Stable), starts_before);
        // No new status was shown either
        assert_eq!(display.lines().len(), 1);
    }

    #[test]
    fn test_repeated_stable_readings_do_not_restart_playback() {
        let (mut controller, stub, _) = controller_with_stub();

        controller.on_accelerometer_sample(0.0, 0.0, 10.0);
        controller.on_accelerometer_sample(0.1, -0.1, 9.8);
        controller.on_accelerometer_sample(0.2, 0.0, 10.2);

        assert_eq!(stub.start_count(AudioChannel::Stable), 1);
    }

    #[test]
    fn test_reset_stops_and_rewinds_both_channels() {
        let (mut controller, stub, display) = controller_with_stub();

        controller.on_accelerometer_sample(3.0, 0.0, 10.0);
        assert!(stub.is_playing(AudioChannel::Movement));

        controller.reset();

        assert_eq!(controller.state(), Stability::Stable);
        assert!(!stub.is_playing(AudioChannel::Stable));
        assert!(!stub.is_playing(AudioChannel::Movement));
        assert!(stub.is_prepared(AudioChannel::Stable));
        assert!(stub.is_prepared(AudioChannel::Movement));
        assert_eq!(display.last().as_deref(), Some(STATUS_RESET));
    }

    #[test]
    fn test_full_scenario_accel_gyro_reset() {
        let (mut controller, stub, _) = controller_with_stub();

        controller.on_accelerometer_sample(0.0, 0.0, 10.0);
        assert_eq!(controller.state(), Stability::Stable);
        assert!(stub.is_playing(AudioChannel::Stable));

        controller.on_gyroscope_sample(5.0);
        assert_eq!(controller.state(), Stability::Moving);
        assert!(stub.is_playing(AudioChannel::Movement));
        assert!(!stub.is_playing(AudioChannel::Stable));

        controller.reset();
        assert_eq!(controller.state(), Stability::Stable);
        assert!(!stub.is_playing(AudioChannel::Stable));
        assert!(!stub.is_playing(AudioChannel::Movement));
        assert!(stub.is_prepared(AudioChannel::Stable));
        assert!(stub.is_prepared(AudioChannel::Movement));
    }

    #[test]
    fn test_samples_dropped_while_paused() {
        let (mut controller, stub, _) = controller_with_stub();

        controller.pause();
        controller.handle_sample(MotionSample::accelerometer(5.0, 0.0, 0.0));

        assert_eq!(controller.state(), Stability::Stable);
        assert!(!stub.is_playing(AudioChannel::Movement));

        controller.resume();
        controller.handle_sample(MotionSample::accelerometer(5.0, 0.0, 0.0));
        assert_eq!(controller.state(), Stability::Moving);
    }

    #[test]
    fn test_degraded_mode_keeps_classifying() {
        let display = CapturingDisplay::new();
        let mut controller = StabilityController::with_playback(
            StabilityThresholds::default(),
            Err(AudioError::DeviceUnavailable),
            Box::new(display.clone()),
        );
        controller.resume();

        assert!(controller.is_silent());

        controller.on_accelerometer_sample(5.0, 0.0, 0.0);
        assert_eq!(controller.state(), Stability::Moving);
        assert_eq!(display.last().as_deref(), Some(STATUS_MOVING));

        controller.reset();
        assert_eq!(controller.state(), Stability::Stable);
    }

    #[test]
    fn test_teardown_releases_playback() {
        let (mut controller, stub, _) = controller_with_stub();

        controller.on_accelerometer_sample(0.0, 0.0, 10.0);
        controller.teardown();

        assert!(stub.is_released());
        assert!(controller.is_silent());

        // Handlers still run after teardown, silently
        controller.resume();
        controller.on_accelerometer_sample(5.0, 0.0, 0.0);
        assert_eq!(controller.state(), Stability::Moving);
    }

    #[test]
    fn test_at_most_one_channel_playing_over_sequence() {
        let (mut controller, stub, _) = controller_with_stub();

        let sequence = [
            MotionSample::accelerometer(0.0, 0.0, 10.0),
            MotionSample::gyroscope(5.0),
            MotionSample::accelerometer(0.0, 0.0, 10.0),
            MotionSample::accelerometer(2.0, 2.0, 2.0),
            MotionSample::gyroscope(1.0),
            MotionSample::accelerometer(-0.5, 0.5, 9.5),
        ];
        for sample in sequence {
            controller.handle_sample(sample);
            assert_at_most_one_playing(&stub);
        }
    }

    #[test]
    fn test_events_mirror_applied_states() {
        let (mut controller, _, _) = controller_with_stub();
        let mut events = controller.subscribe_events();

        controller.on_accelerometer_sample(0.0, 0.0, 10.0);
        controller.on_gyroscope_sample(5.0);
        controller.reset();

        let first = events.try_recv().expect("accelerometer event");
        assert_eq!(first.state, Stability::Stable);
        assert_eq!(first.trigger, Trigger::Accelerometer);

        let second = events.try_recv().expect("gyroscope event");
        assert_eq!(second.state, Stability::Moving);
        assert_eq!(second.trigger, Trigger::Gyroscope);

        let third = events.try_recv().expect("reset event");
        assert_eq!(third.trigger, Trigger::Reset);
        assert_eq!(third.status_text, STATUS_RESET);
    }
}
