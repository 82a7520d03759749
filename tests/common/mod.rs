#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::{
    entity::Entity,
    event::{EventRegistry, Events},
    world::World,
};
use fortune_catch::{
    asset::{manifest, AssetLoader, AssetStore},
    audio::{Audio, AudioSink, Cue},
    config::GameConfig,
    constants::ItemKind,
    error::{AssetError, AudioError},
    events::GameEvent,
    presentation::{Hud, PresentationSink},
    session::Session,
    systems::{
        AudioEvent, AudioState, Collider, DeltaTime, Detonation, DrawList, EntityType, PlayerBundle, PlayerControlled, Position,
        ScoreResource, SpawnRng, TimeRemaining, Viewport,
    },
};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub const SEED: u64 = 0x5EED;

/// Default tuning with a fixed seed.
pub fn test_config() -> GameConfig {
    GameConfig {
        seed: Some(SEED),
        ..GameConfig::default()
    }
}

/// Default tuning with both spawners slowed down past the end of a round.
pub fn quiet_config() -> GameConfig {
    GameConfig {
        item_spawn_interval_ms: 120_000,
        bomb_spawn_interval_ms: 120_000,
        ..test_config()
    }
}

/// Serves a fixed set of paths; everything else is missing.
pub struct StubLoader {
    pub available: Vec<&'static str>,
}

impl AssetLoader for StubLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        if self.available.contains(&path) {
            Ok(path.as_bytes().to_vec())
        } else {
            Err(AssetError::NotFound(path.to_string()))
        }
    }
}

/// An asset store that has attempted every sprite, all of them successfully.
pub fn loaded_assets() -> AssetStore {
    let mut store = AssetStore::new();
    store.load_all(&StubLoader { available: manifest() }, &manifest());
    store
}

#[derive(Debug, Default)]
pub struct Recorded {
    pub huds: Vec<Hud>,
    pub frames: usize,
    pub ended: Vec<u32>,
    pub cues: Vec<Cue>,
}

pub type Recorder = Rc<RefCell<Recorded>>;

pub struct RecordingPresentation(pub Recorder);

impl PresentationSink for RecordingPresentation {
    fn hud(&mut self, hud: Hud) {
        self.0.borrow_mut().huds.push(hud);
    }

    fn frame(&mut self, _draw_list: &DrawList) {
        self.0.borrow_mut().frames += 1;
    }

    fn session_ended(&mut self, final_score: u32) {
        self.0.borrow_mut().ended.push(final_score);
    }
}

pub struct RecordingAudio(pub Recorder);

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        self.0.borrow_mut().cues.push(cue);
        Ok(())
    }
}

/// Builds a session with recording sinks and loaded assets.
pub fn create_session(config: GameConfig) -> (Session, Recorder) {
    create_session_with_assets(config, loaded_assets())
}

pub fn create_session_with_assets(config: GameConfig, assets: AssetStore) -> (Session, Recorder) {
    let recorder = Recorder::default();
    let session = Session::new(
        config,
        assets,
        Audio::new(Box::new(RecordingAudio(recorder.clone()))),
        Box::new(RecordingPresentation(recorder.clone())),
    )
    .expect("test config should be valid");
    (session, recorder)
}

/// Creates a world with every resource the frame systems need.
pub fn create_test_world() -> World {
    let config = test_config();
    let mut world = World::new();

    EventRegistry::register_event::<GameEvent>(&mut world);
    EventRegistry::register_event::<AudioEvent>(&mut world);

    world.insert_resource(Viewport::new(config.viewport_width, config.viewport_height));
    world.insert_resource(ScoreResource(0));
    world.insert_resource(TimeRemaining(config.game_duration));
    world.insert_resource(DeltaTime(1.0 / 60.0));
    world.insert_resource(Detonation::default());
    world.insert_resource(AudioState::default());
    world.insert_resource(DrawList::default());
    world.insert_resource(SpawnRng(SmallRng::seed_from_u64(SEED)));
    world.insert_resource(loaded_assets());
    world.insert_resource(config);
    world.insert_non_send_resource(Audio::default());

    world
}

pub fn spawn_test_player(world: &mut World, position: Vec2) -> Entity {
    let size = world.resource::<GameConfig>().player_size;
    world
        .spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position(position),
            collider: Collider::square(size),
            entity_type: EntityType::Player,
        })
        .id()
}

pub fn spawn_test_item(world: &mut World, kind: ItemKind, position: Vec2) -> Entity {
    fortune_catch::systems::spawn_item_at(world, kind, position)
}

pub fn spawn_test_bomb(world: &mut World, position: Vec2) -> Entity {
    fortune_catch::systems::spawn_bomb_at(world, position)
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(event);
}

/// Events written since the last buffer rotation.
pub fn game_events(world: &World) -> Vec<GameEvent> {
    world
        .resource::<Events<GameEvent>>()
        .iter_current_update_events()
        .copied()
        .collect()
}

pub fn audio_events(world: &World) -> Vec<AudioEvent> {
    world
        .resource::<Events<AudioEvent>>()
        .iter_current_update_events()
        .copied()
        .collect()
}
