//! Landmark frame to action rules

use super::config::ClassifierConfig;
use super::window::TiltWindow;
use crate::landmarks::{BodyPoint, LandmarkFrame, Point2};
use runner_core::Action;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, trace};

/// Right wrist this far left of the hip midline (fraction of frame width) steers left
const HAND_CROSS_LEFT: f32 = 0.05;
/// Right wrist this far right of the hip midline steers right
const HAND_CROSS_RIGHT: f32 = 0.15;

/// Everything one classification looked at
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureReading {
    pub action: Action,
    pub jump: bool,
    pub duck: bool,
    pub left: bool,
    pub right: bool,
    pub tilt: f32,
    pub tilt_avg: f32,
    /// Conditions were evaluated but the debounce gate held the action back
    pub debounced: bool,
}

/// Key points every rule needs
struct Skeleton {
    nose: Point2,
    left_wrist: Point2,
    right_wrist: Point2,
    left_shoulder: Point2,
    right_shoulder: Point2,
    left_hip: Point2,
    right_hip: Point2,
}

impl Skeleton {
    fn from_frame(frame: &LandmarkFrame) -> Option<Self> {
        let point = |p: BodyPoint| frame.get(p).filter(Point2::is_finite);
        Some(Self {
            nose: point(BodyPoint::Nose)?,
            left_wrist: point(BodyPoint::LeftWrist)?,
            right_wrist: point(BodyPoint::RightWrist)?,
            left_shoulder: point(BodyPoint::LeftShoulder)?,
            right_shoulder: point(BodyPoint::RightShoulder)?,
            left_hip: point(BodyPoint::LeftHip)?,
            right_hip: point(BodyPoint::RightHip)?,
        })
    }
}

pub struct GestureClassifier {
    config: ClassifierConfig,
    window: TiltWindow,
    last_action_at: Option<Duration>,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let window = TiltWindow::new(config.smoothing_window);
        Self {
            config,
            window,
            last_action_at: None,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn window(&self) -> &TiltWindow {
        &self.window
    }

    /// Forget tilt history and the debounce timer
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_action_at = None;
    }

    /// Classify one frame taken at monotonic time `now`. Frames missing a
    /// required point classify as [`Action::None`].
    pub fn classify(&mut self, frame: &LandmarkFrame, now: Duration) -> Action {
        self.classify_detailed(frame, now)
            .map(|reading| reading.action)
            .unwrap_or(Action::None)
    }

    /// Like [`classify`](Self::classify) but returns the evaluated
    /// conditions; `None` when the frame lacks a required point.
    pub fn classify_detailed(
        &mut self,
        frame: &LandmarkFrame,
        now: Duration,
    ) -> Option<GestureReading> {
        if !(frame.width > 0.0 && frame.height > 0.0) {
            trace!(width = frame.width, height = frame.height, "empty frame size");
            return None;
        }
        let Some(s) = Skeleton::from_frame(frame) else {
            trace!("frame lacks required landmarks");
            return None;
        };

        let (w, h) = (frame.width, frame.height);
        let head_y = s.nose.y;
        let mid_shoulder_x = (s.left_shoulder.x + s.right_shoulder.x) / 2.0;
        let mid_hip_x = (s.left_hip.x + s.right_hip.x) / 2.0;
        let mid_hip_y = (s.left_hip.y + s.right_hip.y) / 2.0;

        let jump = s.left_wrist.y < head_y && s.right_wrist.y < head_y;
        let duck = (mid_hip_y - head_y) < self.config.duck_ratio * h;

        let tilt = (mid_shoulder_x - w / 2.0) / (w / 2.0);
        // The window keeps sampling while the debounce gate is closed
        self.window.push(tilt);
        let tilt_avg = self.window.mean().unwrap_or(tilt);

        let mut left = tilt_avg < -self.config.tilt_threshold;
        let mut right = tilt_avg > self.config.tilt_threshold;

        if self.config.hand_cross_gesture {
            if s.right_wrist.x < mid_hip_x - w * HAND_CROSS_LEFT {
                left = true;
            }
            if s.right_wrist.x > mid_hip_x + w * HAND_CROSS_RIGHT {
                right = true;
            }
        }

        let mut reading = GestureReading {
            action: Action::None,
            jump,
            duck,
            left,
            right,
            tilt,
            tilt_avg,
            debounced: false,
        };

        if let Some(last) = self.last_action_at {
            if now.saturating_sub(last) < self.config.debounce {
                reading.debounced = true;
                return Some(reading);
            }
        }

        reading.action = if jump {
            Action::Jump
        } else if duck {
            Action::Duck
        } else if left {
            Action::Left
        } else if right {
            Action::Right
        } else {
            Action::None
        };

        if !reading.action.is_none() {
            self.last_action_at = Some(now);
            debug!(action = reading.action.name(), tilt_avg, "gesture");
        }

        Some(reading)
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
