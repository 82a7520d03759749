//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

use bevy_ecs::event::Events;
use bevy_ecs::system::ResMut;

pub mod audio;
pub mod collision;
pub mod components;
pub mod item;
pub mod movement;
pub mod render;
pub mod spawner;

pub use self::audio::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::item::*;
pub use self::movement::*;
pub use self::render::*;
pub use self::spawner::*;

use crate::events::GameEvent;

/// Rotates the event buffers at the end of every frame so handled events are dropped.
pub fn event_maintenance_system(mut game_events: ResMut<Events<GameEvent>>, mut audio_events: ResMut<Events<AudioEvent>>) {
    game_events.update();
    audio_events.update();
}
