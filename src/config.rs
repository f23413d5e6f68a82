//! Tuning constants
//!
//! Geometry of the tile grid, the view window, and the lighting behavior.
//! Falloff and fade values are aesthetic choices; the simulation only
//! requires them to keep opacities inside [0, 1].

/// Source tile art edge length in pixels.
pub const ORIGINAL_TILE_SIZE: i32 = 16;

/// On-screen pixel multiplier.
pub const PIXEL_SCALE: i32 = 3;

/// Tile edge in world pixels.
pub const TILE_SIZE: i32 = ORIGINAL_TILE_SIZE * PIXEL_SCALE;

/// Visible window in whole tiles, observer at the center.
pub const MAX_SCREEN_COL: i32 = 19;
pub const MAX_SCREEN_ROW: i32 = 15;

/// Half extents of the view window around the observer.
pub const VIEW_HALF_COLS: i32 = MAX_SCREEN_COL / 2;
pub const VIEW_HALF_ROWS: i32 = MAX_SCREEN_ROW / 2;

/// Pixels the observer covers per tick.
pub const OBSERVER_SPEED: i32 = PIXEL_SCALE;

/// Distance in tiles out to which cells stay fully lit.
pub const SIGHT_RADIUS: f32 = 5.0;

/// Opacity lost per tile of distance beyond the sight radius.
pub const FALLOFF_STEP: f32 = 0.45;

/// Per-frame opacity gain while a cell brightens.
pub const FADE_IN_STEP: f32 = 0.08;

/// Per-frame opacity loss while a cell dims.
pub const FADE_OUT_STEP: f32 = 0.008;

/// Opacity and occlusion values at or below this are treated as zero.
pub const OPACITY_EPSILON: f32 = 1e-4;
