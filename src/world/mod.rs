//! World module
//!
//! The tile catalog, the grid cell store, and the shadow-casting
//! visibility engine.

pub mod map;
pub mod shade;
pub mod tile;
pub mod visibility;

pub use map::{Cell, Map};
pub use shade::{Caster, Darkener, MirrorPass, ScanBounds, ShadeError, ShadeMatrix};
pub use tile::{TileDef, TileKind, TileSet};
pub use visibility::{advance_opacity, fade_map, update_visibility};
