//! Error types for the game rules

use thiserror::Error;

/// Rejected configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("at least one lane position is required")]
    NoLanes,

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("spawn_jitter_factor must be >= 1.0, got {0}")]
    JitterBelowOne(f64),

    #[error("tilt_threshold must lie in (0, 1], got {0}")]
    TiltThresholdOutOfRange(f64),

    #[error("gesture smoothing window must hold at least one sample")]
    EmptySmoothingWindow,
}

/// Degenerate geometry met while resolving an encounter
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryFault {
    #[error("rectangle has a non-finite coordinate")]
    NonFinite,

    #[error("rectangle has negative size {width}x{height}")]
    NegativeSize { width: f32, height: f32 },

    #[error("lane {lane} is outside the {lanes} configured lanes")]
    UnknownLane { lane: usize, lanes: usize },
}

/// Cue playback failure reported by a sink
#[derive(Error, Debug)]
pub enum CueError {
    #[error("audio device unavailable")]
    Unavailable,

    #[error("cue output failed: {0}")]
    Io(#[from] std::io::Error),
}
