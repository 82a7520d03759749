//! This module handles the audio cues of the game.
//!
//! Playback itself is delegated to an [`AudioSink`]. Every cue is fire-and-forget:
//! a rejected or failed playback is logged and otherwise ignored.

use tracing::{debug, trace, warn};

use crate::error::AudioError;

/// Number of distinct collect sounds the sink is expected to provide.
pub const COLLECT_VARIANTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// An item was collected; `variant` cycles through the collect sounds.
    Collect { variant: usize },
    Explode,
    UiClick,
    /// Start the looping background music from the beginning.
    MusicStart,
    MusicStop,
}

/// Destination for audio cues.
pub trait AudioSink {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// A sink that discards every cue. Used when no audio device is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        trace!(?cue, "Discarding audio cue");
        Ok(())
    }
}

/// Owns the sink and applies the mute flag.
pub struct Audio {
    sink: Box<dyn AudioSink>,
    muted: bool,
}

impl Audio {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self { sink, muted: false }
    }

    /// Plays a cue, swallowing (and logging) any playback failure.
    pub fn play(&mut self, cue: Cue) {
        if self.muted {
            trace!(?cue, "Skipping cue while muted");
            return;
        }
        match self.sink.play(cue) {
            Ok(()) => trace!(?cue, "Played cue"),
            Err(e) => warn!(?cue, error = %e, "Playback prevented"),
        }
    }

    /// Instantly mute or unmute all cues.
    pub fn set_mute(&mut self, mute: bool) {
        if mute != self.muted {
            debug!(muted = mute, "Audio mute state changed");
        }
        self.muted = mute;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl Default for Audio {
    fn default() -> Self {
        Self::new(Box::new(SilentAudio))
    }
}
