//! RON world loading
//!
//! Loads the tile set and map from external RON files, with fallback to
//! built-in defaults when a file is missing or broken.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::{Map, TileDef, TileKind, TileSet};

const DATA_DIR: &str = "assets/data";
const MAP_DIR: &str = "assets/maps";

/// Seed for the generated fallback map.
const FALLBACK_MAP_SEED: u64 = 0x6d65_6164_6f77;

/// Problems reading external world data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("map row {row} has {found} glyphs, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown map glyph {glyph:?} at ({col}, {row})")]
    UnknownGlyph { glyph: char, col: usize, row: usize },
    #[error("map spawn ({col}, {row}) is outside the map or solid")]
    BadSpawn { col: i32, row: i32 },
}

/// On-disk tile-set schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSetData {
    pub tiles: Vec<TileDef>,
}

/// On-disk map schema: one string per row, one glyph per cell, resolved
/// against the tile set's glyphs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapData {
    pub name: String,
    pub spawn: (i32, i32),
    pub rows: Vec<String>,
}

/// Parse a tile-set file.
pub fn load_tile_set(path: &Path) -> Result<TileSet, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let data: TileSetData = ron::from_str(&content).map_err(|source| DataError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(TileSet::with_overrides(data.tiles))
}

/// Parse a map file against a resolved tile set.
pub fn load_map(path: &Path, tiles: &TileSet) -> Result<Map, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let data: MapData = ron::from_str(&content).map_err(|source| DataError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    map_from_data(&data, tiles)
}

/// Build a map from parsed data. Every glyph must resolve through the
/// tile set, rows must agree on width, and the spawn must land on open
/// ground.
pub fn map_from_data(data: &MapData, tiles: &TileSet) -> Result<Map, DataError> {
    let height = data.rows.len() as i32;
    let width = data
        .rows
        .first()
        .map(|r| r.chars().count())
        .unwrap_or(0) as i32;

    let mut map = Map::new(width, height, TileKind::Grass, tiles);
    for (row, line) in data.rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width as usize {
            return Err(DataError::RaggedRow {
                row,
                found,
                expected: width as usize,
            });
        }
        for (col, glyph) in line.chars().enumerate() {
            let kind = tiles
                .kind_for_glyph(glyph)
                .ok_or(DataError::UnknownGlyph { glyph, col, row })?;
            map.set_kind(col as i32, row as i32, kind, tiles);
        }
    }

    let (col, row) = data.spawn;
    if !map.in_bounds(col, row) || map.is_solid(col, row) {
        return Err(DataError::BadSpawn { col, row });
    }
    map.spawn = data.spawn;

    Ok(map)
}

/// Tile set from `assets/data/tiles.ron`, or the built-in catalog.
pub fn load_tile_set_or_default() -> TileSet {
    let path = Path::new(DATA_DIR).join("tiles.ron");
    if path.exists() {
        match load_tile_set(&path) {
            Ok(tiles) => {
                log::info!("loaded tile set from {}", path.display());
                return tiles;
            }
            Err(e) => log::warn!("{}. Using built-in tiles.", e),
        }
    }
    TileSet::default()
}

/// Map from `assets/maps/meadow.ron`, or the generated fallback world.
pub fn load_map_or_default(tiles: &TileSet) -> Map {
    let path = Path::new(MAP_DIR).join("meadow.ron");
    if path.exists() {
        match load_map(&path, tiles) {
            Ok(map) => {
                log::info!("loaded map from {}", path.display());
                return map;
            }
            Err(e) => log::warn!("{}. Using generated map.", e),
        }
    }
    default_map(tiles)
}

/// Built-in fallback world: an open meadow with a pond, a walled hall and
/// scattered trees. Seeded so every run agrees.
pub fn default_map(tiles: &TileSet) -> Map {
    let width = 40;
    let height = 26;
    let mut rng = StdRng::seed_from_u64(FALLBACK_MAP_SEED);
    let mut map = Map::new(width, height, TileKind::Grass, tiles);

    // A path crossing the meadow.
    for x in 0..width {
        map.set_kind(x, 13, TileKind::Path, tiles);
    }
    for y in 0..height {
        map.set_kind(20, y, TileKind::Path, tiles);
    }

    // A pond in the southwest.
    for y in 18..23 {
        for x in 5..12 {
            map.set_kind(x, y, TileKind::Water, tiles);
        }
    }

    // A hall in the northeast with windows and a door.
    for x in 26..36 {
        map.set_kind(x, 4, TileKind::Wall, tiles);
        map.set_kind(x, 10, TileKind::Wall, tiles);
    }
    for y in 4..11 {
        map.set_kind(26, y, TileKind::Wall, tiles);
        map.set_kind(35, y, TileKind::Wall, tiles);
    }
    for y in 5..10 {
        for x in 27..35 {
            map.set_kind(x, y, TileKind::Path, tiles);
        }
    }
    map.set_kind(28, 10, TileKind::Window, tiles);
    map.set_kind(33, 10, TileKind::Window, tiles);
    map.set_kind(30, 10, TileKind::DoorOpen, tiles);

    // A pillar colonnade along the east-west path.
    for x in [4, 8, 12, 16] {
        map.set_kind(x, 11, TileKind::Pillar, tiles);
        map.set_kind(x, 15, TileKind::Pillar, tiles);
    }

    // Scattered trees, only on grass.
    for _ in 0..48 {
        let x = rng.gen_range(1..width - 1);
        let y = rng.gen_range(1..height - 1);
        let grass = map.get(x, y).map_or(false, |c| c.kind == TileKind::Grass);
        if grass {
            map.set_kind(x, y, TileKind::Tree, tiles);
        }
    }

    map.spawn = (20, 13);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map_data() -> MapData {
        MapData {
            name: "sample".to_string(),
            spawn: (1, 1),
            rows: vec![
                "####".to_string(),
                "#,,#".to_string(),
                "#,=#".to_string(),
                "####".to_string(),
            ],
        }
    }

    #[test]
    fn test_map_from_data_resolves_glyphs() {
        let tiles = TileSet::default();
        let map = map_from_data(&sample_map_data(), &tiles).unwrap();

        assert_eq!((map.width, map.height), (4, 4));
        assert_eq!(map.get(0, 0).unwrap().kind, TileKind::Wall);
        assert_eq!(map.get(1, 1).unwrap().kind, TileKind::Grass);
        assert_eq!(map.get(2, 2).unwrap().kind, TileKind::Window);
        assert_eq!(map.spawn, (1, 1));
    }

    #[test]
    fn test_unknown_glyph_is_rejected() {
        let tiles = TileSet::default();
        let mut data = sample_map_data();
        data.rows[1] = "#,?#".to_string();

        match map_from_data(&data, &tiles) {
            Err(DataError::UnknownGlyph { glyph: '?', col: 2, row: 1 }) => {}
            other => panic!("expected UnknownGlyph, got {other:?}"),
        }
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let tiles = TileSet::default();
        let mut data = sample_map_data();
        data.rows[2] = "#,#".to_string();

        match map_from_data(&data, &tiles) {
            Err(DataError::RaggedRow { row: 2, found: 3, expected: 4 }) => {}
            other => panic!("expected RaggedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_solid_spawn_is_rejected() {
        let tiles = TileSet::default();
        let mut data = sample_map_data();
        data.spawn = (0, 0);

        match map_from_data(&data, &tiles) {
            Err(DataError::BadSpawn { col: 0, row: 0 }) => {}
            other => panic!("expected BadSpawn, got {other:?}"),
        }
    }

    #[test]
    fn test_map_data_round_trips_through_ron() {
        let data = sample_map_data();
        let text = ron::ser::to_string_pretty(&data, ron::ser::PrettyConfig::default()).unwrap();
        let back: MapData = ron::from_str(&text).unwrap();
        assert_eq!(back.rows, data.rows);
        assert_eq!(back.spawn, data.spawn);
    }

    #[test]
    fn test_tile_set_data_round_trips_through_ron() {
        let data = TileSetData {
            tiles: vec![TileDef::base(TileKind::Wall), TileDef::base(TileKind::Water)],
        };
        let text = ron::ser::to_string_pretty(&data, ron::ser::PrettyConfig::default()).unwrap();
        let tiles: TileSet = {
            let parsed: TileSetData = ron::from_str(&text).unwrap();
            TileSet::with_overrides(parsed.tiles)
        };
        assert_eq!(tiles.get(TileKind::Wall), &TileDef::base(TileKind::Wall));
    }

    #[test]
    fn test_default_map_spawn_is_open() {
        let tiles = TileSet::default();
        let map = default_map(&tiles);
        let (col, row) = map.spawn;
        assert!(map.in_bounds(col, row));
        assert!(!map.is_solid(col, row));
    }

    #[test]
    fn test_default_map_is_deterministic() {
        let tiles = TileSet::default();
        let a = default_map(&tiles);
        let b = default_map(&tiles);
        let kinds_a: Vec<_> = a.cells().iter().map(|c| c.kind).collect();
        let kinds_b: Vec<_> = b.cells().iter().map(|c| c.kind).collect();
        assert_eq!(kinds_a, kinds_b);
    }
}
