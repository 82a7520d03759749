//! Translation of raw keyboard and touch input into [`GameCommand`]s.

use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::events::GameCommand;

/// Keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Enter,
    Space,
    Escape,
}

/// Something that produces player commands each time it is polled.
pub trait InputSource {
    /// Drains pending commands. `player_x` is the current left edge of the player.
    fn poll(&mut self, player_x: f32) -> Vec<GameCommand>;
}

/// Key to command mapping.
#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<Key, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let key_bindings = HashMap::from([
            (Key::Left, GameCommand::MoveLeft),
            (Key::Right, GameCommand::MoveRight),
            (Key::Enter, GameCommand::Start),
            (Key::Space, GameCommand::Restart),
            (Key::Escape, GameCommand::Exit),
        ]);
        Self { key_bindings }
    }
}

impl Bindings {
    pub fn command_for(&self, key: Key) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }
}

/// Buffers key presses between polls. Every press is one step, like a key-down event.
#[derive(Debug, Default)]
pub struct Keyboard {
    bindings: Bindings,
    pending: Vec<GameCommand>,
}

impl Keyboard {
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            pending: Vec::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if let Some(command) = self.bindings.command_for(key) {
            trace!(?key, ?command, "Key pressed");
            self.pending.push(command);
        }
    }
}

impl InputSource for Keyboard {
    fn poll(&mut self, _player_x: f32) -> Vec<GameCommand> {
        std::mem::take(&mut self.pending)
    }
}

/// Turns a touch drag into relative player movement.
#[derive(Debug, Default)]
pub struct TouchDrag {
    last_x: Option<f32>,
    accumulated: f32,
}

impl TouchDrag {
    pub fn touch_start(&mut self, x: f32) {
        self.last_x = Some(x);
    }

    pub fn touch_move(&mut self, x: f32) {
        if let Some(last) = self.last_x.replace(x) {
            self.accumulated += x - last;
        }
    }

    pub fn touch_end(&mut self) {
        self.last_x = None;
    }
}

impl InputSource for TouchDrag {
    fn poll(&mut self, _player_x: f32) -> Vec<GameCommand> {
        let dx = std::mem::take(&mut self.accumulated);
        if dx == 0.0 {
            Vec::new()
        } else {
            vec![GameCommand::DragBy(dx)]
        }
    }
}

/// Autopilot for the headless build: sweeps the player from edge to edge.
#[derive(Debug, Clone)]
pub struct Sweep {
    speed: f32,
    max_x: f32,
    rightward: bool,
    last_poll: Option<Duration>,
    now: Duration,
}

impl Sweep {
    /// `speed` in pixels per second; `max_x` is the right-most left edge of the player.
    pub fn new(speed: f32, max_x: f32) -> Self {
        Self {
            speed,
            max_x: max_x.max(0.0),
            rightward: true,
            last_poll: None,
            now: Duration::ZERO,
        }
    }

    /// Tells the autopilot the current time; movement is scaled by the time between polls.
    pub fn set_time(&mut self, now: Duration) {
        self.now = now;
    }
}

impl InputSource for Sweep {
    fn poll(&mut self, player_x: f32) -> Vec<GameCommand> {
        let elapsed = match self.last_poll.replace(self.now) {
            Some(last) => self.now.saturating_sub(last).as_secs_f32(),
            None => 0.0,
        };
        if player_x >= self.max_x {
            self.rightward = false;
        } else if player_x <= 0.0 {
            self.rightward = true;
        }

        let step = self.speed * elapsed;
        let target = if self.rightward { player_x + step } else { player_x - step };
        vec![GameCommand::MoveTo(target.clamp(0.0, self.max_x))]
    }
}
