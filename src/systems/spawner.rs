//! Entity factories driven by the periodic spawners.
//!
//! Every spawned entity starts with its top edge at `y = 0` and a random
//! horizontal offset that keeps it fully inside the viewport.

use bevy_ecs::{entity::Entity, world::World};
use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::constants::ItemKind;
use crate::systems::components::{
    BombBundle, BombCollider, Collider, EntityType, ItemBundle, ItemCollider, Position, SpawnRng, Velocity, Viewport,
};

/// Picks a left edge uniformly in `[0, viewport_width - entity_width]`.
///
/// Entities wider than the viewport are pinned to `x = 0`.
pub fn random_spawn_x<R: Rng>(rng: &mut R, viewport_width: f32, entity_width: f32) -> f32 {
    let max_x = viewport_width - entity_width;
    if max_x <= 0.0 {
        return 0.0;
    }
    rng.random_range(0.0..=max_x)
}

/// Spawns an item of a random catalog kind at a random x.
pub fn spawn_item(world: &mut World) -> Entity {
    let viewport_width = world.resource::<Viewport>().width();
    let item_size = world.resource::<GameConfig>().item_size;

    let (x, kind) = {
        let mut rng = world.resource_mut::<SpawnRng>();
        let x = random_spawn_x(&mut rng.0, viewport_width, item_size);
        let kind = *ItemKind::CATALOG.choose(&mut rng.0).unwrap_or(&ItemKind::Yuanbao);
        (x, kind)
    };

    spawn_item_at(world, kind, Vec2::new(x, 0.0))
}

/// Spawns a bomb at a random x.
pub fn spawn_bomb(world: &mut World) -> Entity {
    let viewport_width = world.resource::<Viewport>().width();
    let bomb_size = world.resource::<GameConfig>().bomb_size;

    let x = {
        let mut rng = world.resource_mut::<SpawnRng>();
        random_spawn_x(&mut rng.0, viewport_width, bomb_size)
    };

    spawn_bomb_at(world, Vec2::new(x, 0.0))
}

/// Spawns an item of `kind` with its top-left corner at `position`.
pub fn spawn_item_at(world: &mut World, kind: ItemKind, position: Vec2) -> Entity {
    let config = world.resource::<GameConfig>();
    let bundle = ItemBundle {
        position: Position(position),
        velocity: Velocity {
            fall_speed: config.item_fall_speed,
        },
        collider: Collider::square(config.item_size),
        entity_type: EntityType::Item(kind),
        item_collider: ItemCollider,
    };

    let entity = world.spawn(bundle).id();
    debug!(?entity, item = %kind, x = position.x, "Item spawned");
    entity
}

/// Spawns a bomb with its top-left corner at `position`.
pub fn spawn_bomb_at(world: &mut World, position: Vec2) -> Entity {
    let config = world.resource::<GameConfig>();
    let bundle = BombBundle {
        position: Position(position),
        velocity: Velocity {
            fall_speed: config.bomb_fall_speed(),
        },
        collider: Collider::square(config.bomb_size),
        entity_type: EntityType::Bomb,
        bomb_collider: BombCollider,
    };

    let entity = world.spawn(bundle).id();
    debug!(?entity, x = position.x, "Bomb spawned");
    entity
}
