//! Visibility update and opacity fading
//!
//! Each tick the window around the observer is reset from a distance
//! falloff, the shade table subtracts what blockers hide, and the fader
//! walks every displayed opacity toward its target. The split between
//! target and display is what keeps moving shadows from flickering.

use crate::config::{
    FADE_IN_STEP, FADE_OUT_STEP, FALLOFF_STEP, SIGHT_RADIUS, VIEW_HALF_COLS, VIEW_HALF_ROWS,
};

use super::map::Map;
use super::shade::ShadeMatrix;

/// Recompute target opacity for every cell in the working window around
/// the observer. Idempotent: the reset pass rebuilds the whole window
/// before the occlusion pass subtracts from it, so nothing accumulates
/// across calls. Cells outside the map are skipped.
pub fn update_visibility(map: &mut Map, shade: &ShadeMatrix, observer_col: i32, observer_row: i32) {
    // The window reaches one cell past the visible half extents, the same
    // fringe the shade table scans.
    for dy in -(VIEW_HALF_ROWS + 1)..=(VIEW_HALF_ROWS + 1) {
        for dx in -(VIEW_HALF_COLS + 1)..=(VIEW_HALF_COLS + 1) {
            if let Some(cell) = map.get_mut(observer_col + dx, observer_row + dy) {
                let distance = ((dx * dx + dy * dy) as f32).sqrt();
                cell.target_opacity = (1.0 - distance * FALLOFF_STEP + SIGHT_RADIUS * FALLOFF_STEP)
                    .clamp(0.0, 1.0);
            }
        }
    }

    shade.apply(map, observer_col, observer_row);
}

/// Advance a displayed opacity one frame toward its target.
///
/// Asymmetric on purpose: cells light up quickly and dim slowly, which
/// reads as a soft lantern rather than a hard mask. Clamped so the value
/// lands exactly on the target and never overshoots.
pub fn advance_opacity(display: f32, target: f32) -> f32 {
    if display < target {
        (display + FADE_IN_STEP).min(target)
    } else if display > target {
        (display - FADE_OUT_STEP).max(target)
    } else {
        display
    }
}

/// Fade every cell on the map one frame.
pub fn fade_map(map: &mut Map) {
    for cell in map.cells_mut() {
        cell.display_opacity = advance_opacity(cell.display_opacity, cell.target_opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tile::{TileKind, TileSet};

    fn open_map(width: i32, height: i32) -> (Map, TileSet) {
        let tiles = TileSet::default();
        let map = Map::new(width, height, TileKind::Grass, &tiles);
        (map, tiles)
    }

    fn table() -> ShadeMatrix {
        ShadeMatrix::new(crate::config::VIEW_HALF_COLS, crate::config::VIEW_HALF_ROWS).unwrap()
    }

    #[test]
    fn test_falloff_is_full_near_and_dark_far() {
        let (mut map, _tiles) = open_map(30, 30);
        let shade = table();
        update_visibility(&mut map, &shade, 15, 15);

        // Inside the sight radius the falloff term exceeds 1 and clamps.
        assert_eq!(map.get(15, 15).unwrap().target_opacity, 1.0);
        assert_eq!(map.get(18, 15).unwrap().target_opacity, 1.0);

        // Beyond it, opacity drops linearly and bottoms out at zero.
        let mid = map.get(21, 15).unwrap().target_opacity;
        assert!(mid > 0.0 && mid < 1.0, "expected partial falloff, got {mid}");
        assert_eq!(map.get(23, 15).unwrap().target_opacity, 0.0);
    }

    #[test]
    fn test_update_is_idempotent() {
        let (mut map, tiles) = open_map(26, 22);
        map.set_kind(15, 11, TileKind::Wall, &tiles);
        map.set_kind(13, 9, TileKind::Tree, &tiles);
        let shade = table();

        update_visibility(&mut map, &shade, 12, 11);
        let first: Vec<f32> = map.cells().iter().map(|c| c.target_opacity).collect();

        update_visibility(&mut map, &shade, 12, 11);
        let second: Vec<f32> = map.cells().iter().map(|c| c.target_opacity).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_targets_stay_in_unit_range() {
        let (mut map, tiles) = open_map(26, 22);
        for x in 10..20 {
            map.set_kind(x, 12, TileKind::Wall, &tiles);
        }
        let shade = table();
        update_visibility(&mut map, &shade, 12, 11);

        for cell in map.cells() {
            assert!(cell.target_opacity >= 0.0 && cell.target_opacity <= 1.0);
        }
    }

    #[test]
    fn test_wall_fully_darkens_the_line_behind_it() {
        let (mut map, tiles) = open_map(26, 22);
        map.set_kind(14, 11, TileKind::Wall, &tiles);
        let shade = table();
        update_visibility(&mut map, &shade, 12, 11);

        // The wall itself stays at its falloff value; the cells directly
        // behind it go fully dark.
        assert_eq!(map.get(14, 11).unwrap().target_opacity, 1.0);
        assert_eq!(map.get(15, 11).unwrap().target_opacity, 0.0);
        assert_eq!(map.get(16, 11).unwrap().target_opacity, 0.0);
    }

    #[test]
    fn test_partial_occluder_dims_without_blacking_out() {
        let (mut map, tiles) = open_map(26, 22);
        map.set_kind(14, 11, TileKind::Window, &tiles);
        let shade = table();
        update_visibility(&mut map, &shade, 12, 11);

        let behind = map.get(15, 11).unwrap().target_opacity;
        assert!(
            behind > 0.0 && behind < 1.0,
            "window should dim, not blind: {behind}"
        );
    }

    #[test]
    fn test_observer_near_map_edge_is_clipped_not_fatal() {
        let (mut map, _tiles) = open_map(6, 5);
        let shade = table();
        update_visibility(&mut map, &shade, 0, 0);
        assert_eq!(map.get(0, 0).unwrap().target_opacity, 1.0);
    }

    #[test]
    fn test_fade_in_is_faster_than_fade_out() {
        let up = advance_opacity(0.5, 1.0) - 0.5;
        let down = 0.5 - advance_opacity(0.5, 0.0);
        assert!(up > down);
    }

    #[test]
    fn test_fade_converges_monotonically_without_overshoot() {
        let mut display = 0.0_f32;
        let target = 0.9_f32;
        let mut gap = (display - target).abs();
        let mut steps = 0;
        while display != target {
            display = advance_opacity(display, target);
            let next_gap = (display - target).abs();
            assert!(next_gap < gap, "fade must close the gap every step");
            assert!((0.0..=1.0).contains(&display));
            gap = next_gap;
            steps += 1;
            assert!(steps < 100, "fade-in failed to converge");
        }

        let target = 0.3_f32;
        let mut steps = 0;
        while display != target {
            display = advance_opacity(display, target);
            assert!(display >= target, "fade-out must not undershoot");
            steps += 1;
            assert!(steps < 200, "fade-out failed to converge");
        }
        assert_eq!(display, target);
    }

    #[test]
    fn test_fade_map_moves_every_cell() {
        let (mut map, _tiles) = open_map(8, 8);
        let shade = table();
        update_visibility(&mut map, &shade, 4, 4);
        fade_map(&mut map);

        let lit = map.get(4, 4).unwrap();
        assert_eq!(lit.display_opacity, FADE_IN_STEP);
    }
}
