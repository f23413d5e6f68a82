//! Duskmere - a tile-grid world simulator
//!
//! A small world of tiles around a moving observer: a precomputed
//! shadow-casting table darkens what blockers hide, an asymmetric fader
//! keeps the lighting soft, and a diagonal-aware collision checker keeps
//! the observer out of wall corners.

pub mod config;
pub mod data;
pub mod game;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use game::{Direction, Game, Observer};
pub use world::{Map, ShadeMatrix, TileKind, TileSet};
