use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::With,
    system::{Commands, Query, Res, ResMut},
};
use tracing::{debug, trace};

use crate::audio::Cue;
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::systems::{AudioEvent, BombCollider, Detonation, EntityType, ItemCollider, ScoreResource};

/// Credits collected items and removes them from the world.
pub fn item_system(
    mut commands: Commands,
    mut collision_events: EventReader<GameEvent>,
    mut score: ResMut<ScoreResource>,
    config: Res<GameConfig>,
    item_query: Query<(Entity, &EntityType), With<ItemCollider>>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    for event in collision_events.read() {
        let GameEvent::Collected(entity) = event else {
            continue;
        };
        let Ok((item_entity, entity_type)) = item_query.get(*entity) else {
            continue;
        };
        if !entity_type.is_collectible() {
            continue;
        }
        let Some(weight) = entity_type.point_value() else {
            continue;
        };

        // The multiplier is unbounded; the score pins at u32::MAX instead of wrapping.
        let points = weight.saturating_mul(config.score_multiplier);
        score.0 = score.0.saturating_add(points);
        trace!(?item_entity, item_type = ?entity_type, points, new_score = score.0, "Item collected by player");

        commands.entity(item_entity).despawn();
        audio_events.write(AudioEvent::Collect);
    }
}

/// Raises the detonation flag when the player touched a bomb.
pub fn bomb_system(
    mut collision_events: EventReader<GameEvent>,
    mut detonation: ResMut<Detonation>,
    bomb_query: Query<(), With<BombCollider>>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    for event in collision_events.read() {
        let GameEvent::Detonated(entity) = event else {
            continue;
        };
        if detonation.0 || bomb_query.get(*entity).is_err() {
            continue;
        }

        debug!(bomb = ?entity, "Bomb detonated");
        detonation.0 = true;
        audio_events.write(AudioEvent::Play(Cue::Explode));
    }
}
