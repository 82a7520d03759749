use bevy_ecs::prelude::*;

/// High-level requests produced by input sources and UI buttons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameCommand {
    /// One keyboard step to the left.
    MoveLeft,
    /// One keyboard step to the right.
    MoveRight,
    /// Horizontal drag delta, in pixels.
    DragBy(f32),
    /// Absolute desired x of the player's left edge.
    MoveTo(f32),
    Start,
    Restart,
    Exit,
}

/// Outcomes of collision detection within a single frame.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The player touched a collectible item.
    Collected(Entity),
    /// The player touched a bomb.
    Detonated(Entity),
}
