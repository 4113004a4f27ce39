//! Gesture classification
//!
//! Heuristic rules over a single landmark frame, smoothed left/right tilt
//! and a debounce gate between emitted actions.

mod config;
mod gesture;
mod window;

pub use config::ClassifierConfig;
pub use gesture::{GestureClassifier, GestureReading};
pub use window::TiltWindow;
