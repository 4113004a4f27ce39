//! Capture session: scoped ownership of a landmark source

mod replay;

pub use replay::ReplaySource;

use crate::landmarks::LandmarkFrame;
use crate::traits::LandmarkSource;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Owns a [`LandmarkSource`] for the length of a round.
///
/// `poll` never fails: device faults, malformed frames and polls that
/// overrun the frame budget all read as "no frame this tick". The source is
/// released exactly once, by [`release`](Self::release) or on drop.
pub struct CaptureSession<S: LandmarkSource> {
    source: Option<S>,
    poll_budget: Duration,
    mirror: bool,
    started: Instant,
    frames: u64,
    misses: u64,
}

impl<S: LandmarkSource> CaptureSession<S> {
    pub fn open(source: S) -> Self {
        info!("capture session opened");
        Self {
            source: Some(source),
            poll_budget: Duration::from_millis(33),
            mirror: false,
            started: Instant::now(),
            frames: 0,
            misses: 0,
        }
    }

    pub fn with_poll_budget(mut self, budget: Duration) -> Self {
        self.poll_budget = budget;
        self
    }

    /// Flip every frame horizontally before handing it out
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Monotonic time since the session opened, for the classifier clock
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn frames_received(&self) -> u64 {
        self.frames
    }

    /// Ticks that produced no usable frame
    pub fn frames_missed(&self) -> u64 {
        self.misses
    }

    pub fn is_released(&self) -> bool {
        self.source.is_none()
    }

    /// Poll the source once for this tick
    pub fn poll(&mut self) -> Option<LandmarkFrame> {
        let source = self.source.as_mut()?;

        let start = Instant::now();
        let result = source.poll_frame();
        let took = start.elapsed();

        let frame = match result {
            Ok(Some(_)) if took > self.poll_budget => {
                debug!(?took, budget = ?self.poll_budget, "late frame dropped");
                None
            }
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "capture poll failed");
                None
            }
        };

        match frame {
            Some(frame) => {
                self.frames += 1;
                Some(if self.mirror { frame.mirrored() } else { frame })
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Release the source. Later calls are no-ops; teardown faults are
    /// logged and swallowed.
    pub fn release(&mut self) {
        let Some(mut source) = self.source.take() else {
            return;
        };
        match source.release() {
            Ok(()) => info!(frames = self.frames, missed = self.misses, "capture session released"),
            Err(e) => warn!(error = %e, "capture release failed"),
        }
    }
}

impl<S: LandmarkSource> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}
