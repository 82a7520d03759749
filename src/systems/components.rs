use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;
use rand::rngs::SmallRng;

use crate::constants::ItemKind;

/// A tag component for the entity moved by player input.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A tag component denoting the type of entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Player,
    Item(ItemKind),
    Bomb,
}

impl EntityType {
    /// The unscaled score of the entity, if it can be collected.
    pub fn point_value(&self) -> Option<u32> {
        match self {
            EntityType::Item(kind) => Some(kind.score_weight()),
            _ => None,
        }
    }

    pub fn is_collectible(&self) -> bool {
        matches!(self, EntityType::Item(_))
    }

    pub fn sprite_path(&self) -> &'static str {
        match self {
            EntityType::Player => crate::constants::sprites::PLAYER,
            EntityType::Item(kind) => kind.sprite_path(),
            EntityType::Bomb => crate::constants::sprites::BOMB,
        }
    }
}

/// The top-left corner of an entity, in pixels from the top-left of the viewport.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Constant downward speed, in pixels per second.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub fall_speed: f32,
}

/// Axis-aligned bounding box size of an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: Vec2,
}

impl Collider {
    pub fn square(edge: f32) -> Self {
        Self { size: Vec2::splat(edge) }
    }
}

/// Marker components for collision filtering
#[derive(Component, Default)]
pub struct ItemCollider;

#[derive(Component, Default)]
pub struct BombCollider;

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub collider: Collider,
    pub entity_type: EntityType,
}

#[derive(Bundle)]
pub struct ItemBundle {
    pub position: Position,
    pub velocity: Velocity,
    pub collider: Collider,
    pub entity_type: EntityType,
    pub item_collider: ItemCollider,
}

#[derive(Bundle)]
pub struct BombBundle {
    pub position: Position,
    pub velocity: Velocity,
    pub collider: Collider,
    pub entity_type: EntityType,
    pub bomb_collider: BombCollider,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

/// Whole seconds left in the round.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining(pub u32);

/// Seconds elapsed since the previous frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DeltaTime(pub f32);

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }
}

/// Set once a bomb hits the player; the session ends the round when it sees it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Detonation(pub bool);

/// Source of randomness for the spawners.
#[derive(Resource, Debug)]
pub struct SpawnRng(pub SmallRng);

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    /// Whether audio is currently muted
    pub muted: bool,
    /// Current variant for cycling through collect sounds
    pub collect_variant: usize,
}
