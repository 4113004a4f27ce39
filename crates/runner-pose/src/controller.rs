//! Capture and classification for one tick

use crate::capture::CaptureSession;
use crate::classifier::{ClassifierConfig, GestureClassifier, GestureReading};
use crate::traits::LandmarkSource;
use runner_core::{Action, GameConfig};
use std::time::Duration;

/// Pose input for the game loop: poll once, classify, hand back an action
pub struct PoseController<S: LandmarkSource> {
    session: CaptureSession<S>,
    classifier: GestureClassifier,
    last_reading: Option<GestureReading>,
}

impl<S: LandmarkSource> PoseController<S> {
    pub fn new(source: S, config: &GameConfig) -> Self {
        let session = CaptureSession::open(source)
            .with_mirror(config.gesture.mirror_input)
            .with_poll_budget(Duration::from_millis(config.gesture.capture_poll_budget_ms));
        Self {
            session,
            classifier: GestureClassifier::new(ClassifierConfig::from(config)),
            last_reading: None,
        }
    }

    pub fn session(&self) -> &CaptureSession<S> {
        &self.session
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Conditions evaluated on the most recent classified frame
    pub fn last_reading(&self) -> Option<&GestureReading> {
        self.last_reading.as_ref()
    }

    /// Action for this tick on the session clock
    pub fn next_action(&mut self) -> Action {
        let now = self.session.elapsed();
        self.next_action_at(now)
    }

    /// Action for this tick at an explicit monotonic time. A tick without a
    /// frame does not call the classifier.
    pub fn next_action_at(&mut self, now: Duration) -> Action {
        let Some(frame) = self.session.poll() else {
            return Action::None;
        };
        self.last_reading = self.classifier.classify_detailed(&frame, now);
        self.last_reading
            .map(|reading| reading.action)
            .unwrap_or(Action::None)
    }

    /// New round: clear smoothing and debounce state, keep the device
    pub fn reset(&mut self) {
        self.classifier.reset();
        self.last_reading = None;
    }

    pub fn release(&mut self) {
        self.session.release();
    }
}
