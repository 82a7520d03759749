//! Sprite preloading.
//!
//! Every sprite is attempted once before the first round may start. A sprite
//! that fails to load is logged and replaced by a solid placeholder rectangle;
//! it never blocks gameplay.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bevy_ecs::resource::Resource;
use tracing::{debug, error, info};

use crate::constants::{sprites, ItemKind};
use crate::error::AssetError;
use crate::systems::EntityType;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GOLD: Color = Color { r: 255, g: 215, b: 0 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const BLUE: Color = Color { r: 30, g: 144, b: 255 };
}

/// What to draw for an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// Raw encoded image bytes, shared between every entity using the sprite.
    Image { path: &'static str, bytes: Arc<[u8]> },
    /// Solid rectangle standing in for a sprite that failed to load.
    Placeholder(Color),
}

/// Source of raw asset bytes.
pub trait AssetLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>, AssetError>;
}

/// Loads assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    pub root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLoader for FsAssetLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let full_path = self.root.join(path);
        let bytes = fs::read(&full_path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => AssetError::NotFound(full_path.display().to_string()),
            _ => AssetError::Io {
                path: full_path.display().to_string(),
                source,
            },
        })?;
        if bytes.is_empty() {
            return Err(AssetError::Empty(path.to_string()));
        }
        Ok(bytes)
    }
}

/// Every sprite the game draws: the player, the bomb and each catalog item.
pub fn manifest() -> Vec<&'static str> {
    let mut paths = vec![sprites::PLAYER, sprites::BOMB];
    paths.extend(ItemKind::CATALOG.iter().map(|kind| kind.sprite_path()));
    paths
}

/// Cache of loaded sprites.
#[derive(Resource, Debug, Default)]
pub struct AssetStore {
    images: HashMap<&'static str, Arc<[u8]>>,
    failed: Vec<&'static str>,
    ready: bool,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts every path in `paths`, then marks the store ready.
    ///
    /// Failures are recorded and logged; the store becomes ready regardless.
    pub fn load_all(&mut self, loader: &dyn AssetLoader, paths: &[&'static str]) {
        info!(count = paths.len(), "Loading sprites");
        let total = paths.len();
        for (index, &path) in paths.iter().enumerate() {
            match loader.load(path) {
                Ok(bytes) => {
                    self.images.insert(path, Arc::from(bytes));
                    debug!(path, loaded = index + 1, total, "Loaded sprite");
                }
                Err(e) => {
                    error!(path, error = %e, "Failed to load sprite, using placeholder");
                    self.failed.push(path);
                }
            }
        }
        self.ready = true;
        info!(loaded = self.images.len(), failed = self.failed.len(), "Sprite loading finished");
    }

    /// Whether every sprite has been attempted.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Sprites that failed to load and will be drawn as placeholders.
    pub fn failed(&self) -> &[&'static str] {
        &self.failed
    }

    pub fn get(&self, path: &str) -> Option<&Arc<[u8]>> {
        self.images.get(path)
    }

    /// Resolves the sprite of an entity, falling back to its placeholder colour.
    pub fn drawable_for(&self, entity_type: &EntityType) -> Drawable {
        let path = entity_type.sprite_path();
        match self.images.get(path) {
            Some(bytes) => Drawable::Image {
                path,
                bytes: bytes.clone(),
            },
            None => Drawable::Placeholder(placeholder_color(entity_type)),
        }
    }
}

pub fn placeholder_color(entity_type: &EntityType) -> Color {
    match entity_type {
        EntityType::Item(_) => Color::GOLD,
        EntityType::Bomb => Color::RED,
        EntityType::Player => Color::BLUE,
    }
}
