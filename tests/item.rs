use bevy_ecs::system::RunSystemOnce;
use fortune_catch::audio::Cue;
use fortune_catch::config::GameConfig;
use fortune_catch::constants::ItemKind;
use fortune_catch::events::GameEvent;
use fortune_catch::systems::{bomb_system, item_system, AudioEvent, Detonation, EntityType, ScoreResource};
use glam::Vec2;
use speculoos::prelude::*;

mod common;

#[test]
fn test_point_values() {
    assert_that(&EntityType::Item(ItemKind::Yuanbao).point_value()).is_equal_to(Some(1));
    assert_that(&EntityType::Item(ItemKind::Dahongbao).point_value()).is_equal_to(Some(10));
    assert_that(&EntityType::Player.point_value()).is_none();
    assert_that(&EntityType::Bomb.point_value()).is_none();
}

#[test]
fn test_is_collectible() {
    assert_that(&EntityType::Item(ItemKind::Fudai).is_collectible()).is_true();
    assert_that(&EntityType::Bomb.is_collectible()).is_false();
    assert_that(&EntityType::Player.is_collectible()).is_false();
}

#[test]
fn test_item_system_collects_and_scores() {
    let mut world = common::create_test_world();
    let item = common::spawn_test_item(&mut world, ItemKind::Jintiao, Vec2::ZERO);

    common::send_game_event(&mut world, GameEvent::Collected(item));
    world.run_system_once(item_system).expect("System should run successfully");

    // weight 4 times the default multiplier of 10
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(40);
    assert_that(&world.get_entity(item).is_ok()).is_false();
    assert_that(&common::audio_events(&world)).is_equal_to(vec![AudioEvent::Collect]);
}

#[test]
fn test_item_system_uses_configured_multiplier() {
    let mut world = common::create_test_world();
    world.resource_mut::<GameConfig>().score_multiplier = 3;
    let first = common::spawn_test_item(&mut world, ItemKind::Zhihongbao, Vec2::ZERO);
    let second = common::spawn_test_item(&mut world, ItemKind::Yuanbao, Vec2::new(60.0, 0.0));

    common::send_game_event(&mut world, GameEvent::Collected(first));
    common::send_game_event(&mut world, GameEvent::Collected(second));
    world.run_system_once(item_system).expect("System should run successfully");

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(27);
    assert_that(&common::audio_events(&world).len()).is_equal_to(2);
}

#[test]
fn test_item_system_saturates_with_huge_multiplier() {
    let mut world = common::create_test_world();
    let config = GameConfig {
        score_multiplier: u32::MAX / 5,
        ..common::quiet_config()
    };
    assert_that(&config.validate().is_ok()).is_true();
    world.insert_resource(config);

    let first = common::spawn_test_item(&mut world, ItemKind::Dahongbao, Vec2::ZERO);
    let second = common::spawn_test_item(&mut world, ItemKind::Yuanbao, Vec2::new(60.0, 0.0));
    common::send_game_event(&mut world, GameEvent::Collected(first));
    common::send_game_event(&mut world, GameEvent::Collected(second));
    world.run_system_once(item_system).expect("System should run successfully");

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(u32::MAX);
    assert_that(&world.get_entity(first).is_ok()).is_false();
    assert_that(&world.get_entity(second).is_ok()).is_false();
}

#[test]
fn test_item_system_ignores_bombs_and_missing_entities() {
    let mut world = common::create_test_world();
    let bomb = common::spawn_test_bomb(&mut world, Vec2::ZERO);
    let item = common::spawn_test_item(&mut world, ItemKind::Hongbao, Vec2::ZERO);
    world.despawn(item);

    common::send_game_event(&mut world, GameEvent::Collected(bomb));
    common::send_game_event(&mut world, GameEvent::Collected(item));
    world.run_system_once(item_system).expect("System should run successfully");

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(0);
    assert_that(&world.get_entity(bomb).is_ok()).is_true();
    assert_that(&common::audio_events(&world)).is_empty();
}

#[test]
fn test_bomb_system_raises_detonation_once() {
    let mut world = common::create_test_world();
    let first = common::spawn_test_bomb(&mut world, Vec2::ZERO);
    let second = common::spawn_test_bomb(&mut world, Vec2::new(100.0, 0.0));

    common::send_game_event(&mut world, GameEvent::Detonated(first));
    common::send_game_event(&mut world, GameEvent::Detonated(second));
    world.run_system_once(bomb_system).expect("System should run successfully");

    assert_that(&world.resource::<Detonation>().0).is_true();
    assert_that(&common::audio_events(&world)).is_equal_to(vec![AudioEvent::Play(Cue::Explode)]);
    // The bomb stays where it was; the round freezes around it.
    assert_that(&world.get_entity(first).is_ok()).is_true();
}

#[test]
fn test_bomb_system_ignores_collections() {
    let mut world = common::create_test_world();
    let item = common::spawn_test_item(&mut world, ItemKind::Yuanbao, Vec2::ZERO);

    common::send_game_event(&mut world, GameEvent::Collected(item));
    world.run_system_once(bomb_system).expect("System should run successfully");

    assert_that(&world.resource::<Detonation>().0).is_false();
}
