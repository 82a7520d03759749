//! Audio system for dispatching cues raised during a frame.
//!
//! The sink lives in a `NonSend` resource so hosts with main-thread-only audio
//! APIs can plug in without wrapping them for `Send`.

use bevy_ecs::{
    event::{Event, EventReader},
    system::{NonSendMut, ResMut},
};
use tracing::trace;

use crate::audio::{Audio, Cue, COLLECT_VARIANTS};
use crate::systems::AudioState;

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Play the next collect sound in the cycle
    Collect,
    /// Play a specific cue
    Play(Cue),
}

/// System that processes audio events and plays cues
pub fn audio_system(mut audio: NonSendMut<Audio>, mut state: ResMut<AudioState>, mut events: EventReader<AudioEvent>) {
    if audio.is_muted() != state.muted {
        audio.set_mute(state.muted);
    }

    for event in events.read() {
        match event {
            AudioEvent::Collect => {
                trace!(variant = state.collect_variant, "Playing collect sound");
                audio.play(Cue::Collect {
                    variant: state.collect_variant,
                });
                state.collect_variant = (state.collect_variant + 1) % COLLECT_VARIANTS;
            }
            AudioEvent::Play(cue) => audio.play(*cue),
        }
    }
}
