//! Fortune-catch game library crate.

pub mod app;
pub mod asset;
pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod input;
pub mod presentation;
pub mod scheduler;
pub mod session;
pub mod systems;
