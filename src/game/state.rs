//! Game state and the frame tick
//!
//! Owns the map, the shade table, and the observer, and runs one
//! simulation tick in fixed order: collision-gated movement, visibility
//! update, fade. The renderer reads the result strictly afterwards.

use crate::config::{VIEW_HALF_COLS, VIEW_HALF_ROWS};
use crate::data::loader;
use crate::world::{fade_map, update_visibility, Map, ShadeError, ShadeMatrix, TileSet};

use super::observer::{Direction, Observer};

/// The running simulation.
pub struct Game {
    map: Map,
    tiles: TileSet,
    shade: ShadeMatrix,
    observer: Observer,
    ticks: u64,
}

impl Game {
    /// Load the world (external files or built-in fallback) and build the
    /// shade table. Table construction is the startup fail-fast point.
    pub fn new() -> Result<Self, ShadeError> {
        let tiles = loader::load_tile_set_or_default();
        let map = loader::load_map_or_default(&tiles);
        let shade = ShadeMatrix::new(VIEW_HALF_COLS, VIEW_HALF_ROWS)?;
        let observer = Observer::at_cell(map.spawn.0, map.spawn.1);

        log::info!(
            "world ready: {}x{} map, {} shade casters, spawn at {:?}",
            map.width,
            map.height,
            shade.casters().len(),
            map.spawn
        );

        Ok(Self {
            map,
            tiles,
            shade,
            observer,
            ticks: 0,
        })
    }

    /// Assemble a game from explicit parts.
    pub fn from_parts(map: Map, tiles: TileSet, shade: ShadeMatrix, observer: Observer) -> Self {
        Self {
            map,
            tiles,
            shade,
            observer,
            ticks: 0,
        }
    }

    /// One simulation tick, in fixed order: movement (collision-gated
    /// inside the observer), visibility update around the new cell, fade.
    pub fn tick(&mut self, intent: Option<Direction>) {
        self.observer.update(intent, &self.map);
        update_visibility(
            &mut self.map,
            &self.shade,
            self.observer.col(),
            self.observer.row(),
        );
        fade_map(&mut self.map);
        self.ticks += 1;
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TILE_SIZE;
    use crate::world::TileKind;

    fn game_on_open_map() -> Game {
        let tiles = TileSet::default();
        let mut map = Map::new(26, 22, TileKind::Grass, &tiles);
        map.spawn = (12, 11);
        let shade = ShadeMatrix::new(VIEW_HALF_COLS, VIEW_HALF_ROWS).unwrap();
        let observer = Observer::at_cell(12, 11);
        Game::from_parts(map, tiles, shade, observer)
    }

    #[test]
    fn test_tick_lights_and_fades_in_the_same_frame() {
        let mut game = game_on_open_map();
        game.tick(None);

        let (col, row) = (game.observer().col(), game.observer().row());
        let cell = game.map().get(col, row).unwrap();
        assert_eq!(cell.target_opacity, 1.0);
        // Exactly one fade step has been applied on top of the fresh
        // targets, so the display is off the floor but far from lit.
        assert!(cell.display_opacity > 0.0 && cell.display_opacity < 1.0);
        assert_eq!(game.ticks(), 1);
    }

    #[test]
    fn test_tap_travels_a_whole_tile_over_ticks() {
        let mut game = game_on_open_map();
        let start_col = game.observer().col();

        game.tick(Some(Direction::Right));
        for _ in 0..(TILE_SIZE / crate::config::OBSERVER_SPEED) {
            game.tick(None);
        }
        assert_eq!(game.observer().col(), start_col + 1);
        assert_eq!(game.observer().shift_x(), 0);
    }

    #[test]
    fn test_display_opacity_converges_to_target() {
        let mut game = game_on_open_map();
        for _ in 0..40 {
            game.tick(None);
        }
        let (col, row) = (game.observer().col(), game.observer().row());
        let cell = game.map().get(col, row).unwrap();
        assert_eq!(cell.display_opacity, 1.0);
    }
}
