//! This module contains all the constants used in the game.

use std::time::Duration;

use strum_macros::{Display, EnumCount, EnumIter, IntoStaticStr};

/// Length of a round, in seconds.
pub const GAME_DURATION_SECS: u32 = 30;
/// Interval between two item spawns.
pub const ITEM_SPAWN_INTERVAL: Duration = Duration::from_millis(300);
/// Interval between two bomb spawns.
pub const BOMB_SPAWN_INTERVAL: Duration = Duration::from_millis(5000);
/// Interval of the round countdown.
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

/// The target frame rate of the game loop.
pub const FRAME_RATE: u32 = 60;

/// Fall speed of items, in pixels per second (3 pixels per frame at 60 FPS).
pub const ITEM_FALL_SPEED: f32 = 180.0;
/// Bombs always fall this much faster than items.
pub const BOMB_SPEED_FACTOR: f32 = 1.5;
/// Horizontal step of a single keyboard press, in pixels.
pub const PLAYER_SPEED: f32 = 15.0;
/// Points awarded per unit of item score weight.
pub const SCORE_PER_ITEM: u32 = 10;

pub mod size {
    /// Edge length of the (square) player sprite.
    pub const PLAYER: f32 = 150.0;
    pub const ITEM: f32 = 50.0;
    pub const BOMB: f32 = 60.0;
}

pub mod viewport {
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;
    /// Gap between the bottom of the player and the bottom of the viewport.
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
}

pub mod sprites {
    pub const PLAYER: &str = "image/user.png";
    pub const BOMB: &str = "image/bomb.png";
}

/// The catalog of collectible items.
///
/// Names double as sprite file stems: `image/<name>.png`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter, EnumCount)]
#[strum(serialize_all = "lowercase")]
pub enum ItemKind {
    Yuanbao,
    Hongbao,
    Fudai,
    Jintiao,
    Zhuanshi,
    Zhihongbao,
    Dahongbao,
}

impl ItemKind {
    pub const CATALOG: [ItemKind; 7] = [
        ItemKind::Yuanbao,
        ItemKind::Hongbao,
        ItemKind::Fudai,
        ItemKind::Jintiao,
        ItemKind::Zhuanshi,
        ItemKind::Zhihongbao,
        ItemKind::Dahongbao,
    ];

    /// The unscaled score of this item, multiplied by the score multiplier on collection.
    pub const fn score_weight(self) -> u32 {
        match self {
            ItemKind::Yuanbao => 1,
            ItemKind::Hongbao => 2,
            ItemKind::Fudai => 3,
            ItemKind::Jintiao => 4,
            ItemKind::Zhuanshi => 5,
            ItemKind::Zhihongbao => 8,
            ItemKind::Dahongbao => 10,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub const fn sprite_path(self) -> &'static str {
        match self {
            ItemKind::Yuanbao => "image/yuanbao.png",
            ItemKind::Hongbao => "image/hongbao.png",
            ItemKind::Fudai => "image/fudai.png",
            ItemKind::Jintiao => "image/jintiao.png",
            ItemKind::Zhuanshi => "image/zhuanshi.png",
            ItemKind::Zhihongbao => "image/zhihongbao.png",
            ItemKind::Dahongbao => "image/dahongbao.png",
        }
    }
}
