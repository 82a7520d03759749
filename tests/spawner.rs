use fortune_catch::constants::ItemKind;
use fortune_catch::systems::{
    random_spawn_x, spawn_bomb, spawn_item, BombCollider, Collider, EntityType, ItemCollider, Position, Velocity,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

mod common;

#[test]
fn test_random_spawn_x_stays_inside_viewport() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..1_000 {
        let x = random_spawn_x(&mut rng, 800.0, 50.0);
        assert!((0.0..=750.0).contains(&x), "x = {x}");
    }
}

#[test]
fn test_random_spawn_x_with_oversized_entity() {
    let mut rng = SmallRng::seed_from_u64(42);
    assert_that(&random_spawn_x(&mut rng, 40.0, 50.0)).is_equal_to(0.0);
    assert_that(&random_spawn_x(&mut rng, 50.0, 50.0)).is_equal_to(0.0);
}

#[test]
fn test_spawn_item_starts_at_top() {
    let mut world = common::create_test_world();

    for _ in 0..50 {
        let entity = spawn_item(&mut world);
        let position = world.get::<Position>(entity).unwrap().0;

        assert_that(&position.y).is_equal_to(0.0);
        assert!((0.0..=750.0).contains(&position.x), "x = {}", position.x);
        assert_that(&world.get::<Velocity>(entity).unwrap().fall_speed).is_equal_to(180.0);
        assert_that(&world.get::<Collider>(entity).unwrap().size.x).is_equal_to(50.0);
        assert_that(&world.get::<ItemCollider>(entity).is_some()).is_true();
        assert_that(&world.get::<EntityType>(entity).unwrap().is_collectible()).is_true();
    }
}

#[test]
fn test_spawn_item_draws_from_whole_catalog() {
    let mut world = common::create_test_world();

    let spawned: Vec<ItemKind> = (0..500)
        .filter_map(|_| {
            let entity = spawn_item(&mut world);
            match world.get::<EntityType>(entity) {
                Some(EntityType::Item(kind)) => Some(*kind),
                _ => None,
            }
        })
        .collect();

    assert_that(&spawned.len()).is_equal_to(500);
    for kind in ItemKind::iter() {
        assert!(spawned.contains(&kind), "{kind} never spawned");
    }
}

#[test]
fn test_spawn_bomb_falls_faster_than_items() {
    let mut world = common::create_test_world();
    let bomb = spawn_bomb(&mut world);

    let position = world.get::<Position>(bomb).unwrap().0;
    assert_that(&position.y).is_equal_to(0.0);
    assert!((0.0..=740.0).contains(&position.x), "x = {}", position.x);
    assert_that(&world.get::<Velocity>(bomb).unwrap().fall_speed).is_equal_to(270.0);
    assert_that(&world.get::<Collider>(bomb).unwrap().size.x).is_equal_to(60.0);
    assert_that(&world.get::<BombCollider>(bomb).is_some()).is_true();
    assert_that(world.get::<EntityType>(bomb).unwrap()).is_equal_to(&EntityType::Bomb);
}

#[test]
fn test_same_seed_same_spawns() {
    let mut first = common::create_test_world();
    let mut second = common::create_test_world();

    for _ in 0..20 {
        let a = spawn_item(&mut first);
        let b = spawn_item(&mut second);
        assert_that(first.get::<Position>(a).unwrap()).is_equal_to(second.get::<Position>(b).unwrap());
        assert_that(first.get::<EntityType>(a).unwrap()).is_equal_to(second.get::<EntityType>(b).unwrap());
    }
}
