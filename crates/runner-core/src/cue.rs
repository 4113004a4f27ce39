//! Side-effect sink for sound cues

use crate::error::CueError;
use tracing::debug;

/// Cues the rules ask the presentation layer to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Collision,
    Jump,
}

/// Plays cues. Failures are reported back but never affect the game state.
pub trait CueSink {
    fn play(&mut self, cue: Cue) -> Result<(), CueError>;
}

/// Sink that drops every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCues;

impl CueSink for NullCues {
    fn play(&mut self, _cue: Cue) -> Result<(), CueError> {
        Ok(())
    }
}

/// Play a cue, logging and discarding any failure
pub(crate) fn play_quietly(sink: &mut dyn CueSink, cue: Cue) {
    if let Err(e) = sink.play(cue) {
        debug!(?cue, error = %e, "cue playback failed");
    }
}
