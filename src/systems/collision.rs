use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Single};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::events::GameEvent;
use crate::systems::components::{BombCollider, Collider, ItemCollider, PlayerControlled, Position};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    pub fn from_components(position: &Position, collider: &Collider) -> Self {
        Self::new(position.0, collider.size)
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test: boxes that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left() && self.top() < other.bottom() && self.bottom() > other.top()
    }
}

/// Tests the player's bounding box against every live item, then every live bomb.
///
/// All overlapping items are reported as `GameEvent::Collected`. Only the first
/// overlapping bomb is reported; once a detonation is signaled there is nothing
/// left to check this frame.
pub fn collision_system(
    player: Single<(&Position, &Collider), With<PlayerControlled>>,
    items: Query<(Entity, &Position, &Collider), With<ItemCollider>>,
    bombs: Query<(Entity, &Position, &Collider), With<BombCollider>>,
    mut events: EventWriter<GameEvent>,
) {
    let (player_position, player_collider) = *player;
    let player_box = Aabb::from_components(player_position, player_collider);

    let collected: SmallVec<[Entity; 4]> = items
        .iter()
        .filter(|(_, position, collider)| player_box.overlaps(&Aabb::from_components(position, collider)))
        .map(|(entity, _, _)| entity)
        .collect();
    for entity in collected {
        trace!(?entity, "Player overlaps item");
        events.write(GameEvent::Collected(entity));
    }

    let hit = bombs
        .iter()
        .find(|(_, position, collider)| player_box.overlaps(&Aabb::from_components(position, collider)));
    if let Some((entity, position, _)) = hit {
        debug!(?entity, bomb_position = ?position.0, "Player hit a bomb");
        events.write(GameEvent::Detonated(entity));
    }
}
