//! The hand-off point to whatever shows the game to the player.

use thousands::Separable;
use tracing::{debug, info, trace};

use crate::systems::DrawList;

/// The heads-up display values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub score: u32,
    pub time_remaining: u32,
}

/// Receives everything the player should see.
pub trait PresentationSink {
    /// Score or remaining time changed.
    fn hud(&mut self, hud: Hud);

    /// A frame finished; `draw_list` holds every entity to draw.
    fn frame(&mut self, _draw_list: &DrawList) {}

    /// The round is over.
    fn session_ended(&mut self, final_score: u32);
}

/// Writes HUD updates and the final score to the log. Used by the headless build.
#[derive(Debug, Default)]
pub struct LogPresentation {
    frames: u64,
}

impl PresentationSink for LogPresentation {
    fn hud(&mut self, hud: Hud) {
        debug!(score = %hud.score.separate_with_commas(), time_remaining = hud.time_remaining, "HUD");
    }

    fn frame(&mut self, draw_list: &DrawList) {
        self.frames += 1;
        trace!(frame = self.frames, commands = draw_list.0.len(), "Frame presented");
    }

    fn session_ended(&mut self, final_score: u32) {
        info!(final_score = %final_score.separate_with_commas(), frames = self.frames, "Round over");
    }
}
