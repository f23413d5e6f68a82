//! Grid cell store
//!
//! The dense 2-D array of cells the simulation runs over. Each cell keeps
//! its tile kind, the solidity and occlusion cached from the catalog at
//! load time, and the two opacity values the visibility engine drives.

use super::tile::{TileKind, TileSet};

/// One grid position.
#[derive(Debug, Clone)]
pub struct Cell {
    pub kind: TileKind,
    pub solid: bool,
    /// How strongly this cell blocks vision, 0.0 clear to 1.0 opaque.
    pub occlusion: f32,
    /// Opacity the visibility pass wants this cell at.
    pub target_opacity: f32,
    /// Opacity currently shown; trails the target via the fader.
    pub display_opacity: f32,
}

impl Cell {
    /// Build a cell for `kind`, caching the catalog-derived values.
    /// Display opacity starts dark so a fresh map fades in.
    pub fn new(kind: TileKind, tiles: &TileSet) -> Self {
        let def = tiles.get(kind);
        Self {
            kind,
            solid: def.solid,
            occlusion: def.occlusion.clamp(0.0, 1.0),
            target_opacity: 0.0,
            display_opacity: 0.0,
        }
    }
}

/// A loaded world map.
#[derive(Debug, Clone)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
    /// Grid cell the observer starts in.
    pub spawn: (i32, i32),
}

impl Map {
    /// Create a map filled with one tile kind.
    pub fn new(width: i32, height: i32, fill: TileKind, tiles: &TileSet) -> Self {
        let cells = vec![Cell::new(fill, tiles); (width * height).max(0) as usize];
        Self {
            width,
            height,
            cells,
            spawn: (0, 0),
        }
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.idx(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.idx(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Re-tile a position, refreshing the cached catalog values.
    pub fn set_kind(&mut self, x: i32, y: i32, kind: TileKind, tiles: &TileSet) {
        if self.in_bounds(x, y) {
            let idx = self.idx(x, y);
            self.cells[idx] = Cell::new(kind, tiles);
        }
    }

    /// Whether a position blocks movement. Out of bounds reads as solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(true, |c| c.solid)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}
