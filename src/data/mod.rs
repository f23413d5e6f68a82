//! External world data
//!
//! RON schemas and loading for tile sets and maps.

pub mod loader;

pub use loader::{DataError, MapData, TileSetData};
