//! Centralized error types for the game.
//!
//! None of these ever reach the player as a crash: asset and audio failures
//! degrade gracefully, and rejected session transitions leave state untouched.

use std::io;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error while loading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset is empty: {0}")]
    Empty(String),
}

/// Playback failures reported by an audio sink.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The host refused playback, e.g. an autoplay policy before any user gesture.
    #[error("Playback rejected: {0}")]
    Rejected(String),

    #[error("Audio device unavailable")]
    Unavailable,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid configuration value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Rejected session transitions.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Assets are still loading")]
    AssetsNotReady,

    #[error("A session is already running")]
    AlreadyRunning,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
