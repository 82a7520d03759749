use figment::Jail;
use fortune_catch::asset::{manifest, placeholder_color, AssetLoader, AssetStore, Color, Drawable, FsAssetLoader};
use fortune_catch::constants::{sprites, ItemKind};
use fortune_catch::error::AssetError;
use fortune_catch::systems::EntityType;
use speculoos::prelude::*;
use strum::EnumCount;

mod common;

#[test]
fn test_manifest_lists_every_sprite() {
    let paths = manifest();
    assert_that(&paths.len()).is_equal_to(ItemKind::COUNT + 2);
    assert_that(&paths).contains(sprites::PLAYER);
    assert_that(&paths).contains(sprites::BOMB);
    assert_that(&paths).contains(ItemKind::Dahongbao.sprite_path());
}

#[test]
fn test_store_is_not_ready_before_loading() {
    let store = AssetStore::new();
    assert_that(&store.is_ready()).is_false();
    assert_that(&store.get(sprites::PLAYER).is_none()).is_true();
}

#[test]
fn test_failed_sprites_do_not_block_readiness() {
    let mut store = AssetStore::new();
    let loader = common::StubLoader {
        available: vec![sprites::PLAYER],
    };
    store.load_all(&loader, &manifest());

    assert_that(&store.is_ready()).is_true();
    assert_that(&store.failed().len()).is_equal_to(manifest().len() - 1);
    assert_that(&store.get(sprites::PLAYER).is_some()).is_true();
    assert_that(&store.get(sprites::BOMB).is_none()).is_true();

    assert_that(&matches!(store.drawable_for(&EntityType::Player), Drawable::Image { .. })).is_true();
    assert_that(&store.drawable_for(&EntityType::Bomb)).is_equal_to(Drawable::Placeholder(Color::RED));
}

#[test]
fn test_placeholder_colors() {
    assert_that(&placeholder_color(&EntityType::Item(ItemKind::Hongbao))).is_equal_to(Color::GOLD);
    assert_that(&placeholder_color(&EntityType::Bomb)).is_equal_to(Color::RED);
    assert_that(&placeholder_color(&EntityType::Player)).is_equal_to(Color::BLUE);
}

#[test]
fn test_filesystem_loader() {
    Jail::expect_with(|jail| {
        jail.create_file("sprite.png", "not really a png")?;
        jail.create_file("empty.png", "")?;

        let loader = FsAssetLoader::new(jail.directory());
        assert_eq!(loader.load("sprite.png").unwrap(), b"not really a png".to_vec());
        assert!(matches!(loader.load("empty.png"), Err(AssetError::Empty(_))));
        assert!(matches!(loader.load("missing.png"), Err(AssetError::NotFound(_))));
        Ok(())
    });
}

#[test]
fn test_filesystem_loader_feeds_store() {
    Jail::expect_with(|jail| {
        jail.create_file("bomb.png", "boom")?;

        let mut store = AssetStore::new();
        store.load_all(&FsAssetLoader::new(jail.directory()), &["bomb.png", "user.png"]);

        assert!(store.is_ready());
        assert_eq!(store.failed(), &["user.png"]);
        assert_eq!(store.get("bomb.png").map(|bytes| bytes.to_vec()), Some(b"boom".to_vec()));
        Ok(())
    });
}
