//! Classifier configuration

use runner_core::GameConfig;
use std::time::Duration;

/// Thresholds for the gesture rules
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Minimum gap between two emitted actions
    pub debounce: Duration,
    /// |mean tilt| beyond this steers left/right
    pub tilt_threshold: f32,
    /// Head-to-hip distance below this fraction of frame height is a duck
    pub duck_ratio: f32,
    pub smoothing_window: usize,
    pub hand_cross_gesture: bool,
}

impl From<&GameConfig> for ClassifierConfig {
    fn from(config: &GameConfig) -> Self {
        Self {
            debounce: Duration::try_from_secs_f64(config.debounce_seconds)
                .unwrap_or(Duration::ZERO),
            tilt_threshold: config.tilt_threshold,
            duck_ratio: config.duck_ratio,
            smoothing_window: config.gesture.smoothing_window,
            hand_cross_gesture: config.gesture.hand_cross_gesture,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}
