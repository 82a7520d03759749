use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::asset::{AssetStore, Drawable};
use crate::systems::collision::Aabb;
use crate::systems::components::{Collider, EntityType, Position};

/// A single rectangle to draw this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub bounds: Aabb,
    pub entity_type: EntityType,
    pub drawable: Drawable,
}

/// Everything to draw for the current frame, back to front.
#[derive(Resource, Debug, Default, Clone)]
pub struct DrawList(pub Vec<DrawCommand>);

fn layer(entity_type: &EntityType) -> u8 {
    match entity_type {
        EntityType::Item(_) => 0,
        EntityType::Bomb => 1,
        EntityType::Player => 2,
    }
}

/// Rebuilds the draw list from every positioned entity, resolving sprites through the asset store.
pub fn render_system(
    assets: Res<AssetStore>,
    entities: Query<(&Position, &Collider, &EntityType)>,
    mut draw_list: ResMut<DrawList>,
) {
    draw_list.0.clear();
    draw_list.0.extend(entities.iter().map(|(position, collider, entity_type)| DrawCommand {
        bounds: Aabb::from_components(position, collider),
        entity_type: *entity_type,
        drawable: assets.drawable_for(entity_type),
    }));
    draw_list.0.sort_by_key(|command| layer(&command.entity_type));
}
