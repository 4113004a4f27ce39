//! Pose control for Kids Runner
//!
//! Turns body-landmark frames from an external pose estimator into the
//! discrete actions the game rules understand.

pub mod capture;
pub mod classifier;
pub mod controller;
pub mod error;
pub mod landmarks;

// Re-export commonly used types
pub use capture::{CaptureSession, ReplaySource};
pub use classifier::{ClassifierConfig, GestureClassifier, GestureReading, TiltWindow};
pub use controller::PoseController;
pub use error::CaptureError;
pub use landmarks::{BodyPoint, LandmarkFrame, Point2};

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Core traits for the pose pipeline
pub mod traits {
    use super::*;

    /// Anything that yields landmark frames: a camera plus estimator, a
    /// recording, a test script.
    ///
    /// `poll_frame` must not block past one frame; `Ok(None)` means no pose
    /// this tick.
    pub trait LandmarkSource {
        fn poll_frame(&mut self) -> std::result::Result<Option<LandmarkFrame>, CaptureError>;

        /// Free the device. Called at most once by [`CaptureSession`].
        fn release(&mut self) -> std::result::Result<(), CaptureError> {
            Ok(())
        }
    }
}
