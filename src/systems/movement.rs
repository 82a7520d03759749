use bevy_ecs::entity::Entity;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Commands, Query, Res};
use glam::Vec2;
use tracing::trace;

use crate::systems::components::{DeltaTime, EntityType, PlayerControlled, Position, Velocity, Viewport};

impl Position {
    /// Moves the entity down by `fall_speed * elapsed` pixels.
    pub fn advance(&mut self, velocity: &Velocity, elapsed: f32) {
        self.0.y += velocity.fall_speed * elapsed;
    }

    /// Whether the top edge has passed below the bottom of the viewport.
    pub fn is_offscreen(&self, viewport_height: f32) -> bool {
        self.0.y > viewport_height
    }
}

/// Clamps a desired player x so the whole paddle stays inside the viewport.
pub fn clamp_player_x(desired: f32, viewport_width: f32, player_width: f32) -> f32 {
    let max_x = (viewport_width - player_width).max(0.0);
    desired.clamp(0.0, max_x)
}

/// The resting place of the player: horizontally centered, sitting on the bottom edge.
pub fn player_home(viewport: &Viewport, player_size: Vec2, bottom_margin: f32) -> Vec2 {
    Vec2::new(
        ((viewport.width() - player_size.x) / 2.0).max(0.0),
        viewport.height() - player_size.y - bottom_margin,
    )
}

/// Advances every falling entity by the frame's elapsed time.
pub fn fall_system(delta_time: Res<DeltaTime>, mut entities: Query<(&mut Position, &Velocity), Without<PlayerControlled>>) {
    for (mut position, velocity) in entities.iter_mut() {
        position.advance(velocity, delta_time.0);
    }
}

/// Despawns every falling entity that left the bottom of the viewport.
pub fn prune_system(
    mut commands: Commands,
    viewport: Res<Viewport>,
    entities: Query<(Entity, &Position, &EntityType), With<Velocity>>,
) {
    for (entity, position, entity_type) in entities.iter() {
        if position.is_offscreen(viewport.height()) {
            trace!(?entity, ?entity_type, y = position.0.y, "Entity left the screen");
            commands.entity(entity).despawn();
        }
    }
}
