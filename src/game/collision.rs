//! Diagonal-aware collision checks
//!
//! A move is gated on up to two cells: the cell being entered, and the
//! diagonal neighbor on whichever side of the perpendicular axis the
//! observer currently leans. The second check is what keeps an observer
//! straddling a row from slipping through a wall corner.

use std::cmp::Ordering;

use crate::world::Map;

use super::observer::{Direction, Observer};

/// Whether the observer may advance one step in `direction`. Read-only.
///
/// Mid-crossing movement (nonzero shift on the movement axis) stays
/// between two cells that were vetted when the crossing began and is
/// always allowed. At a tile boundary the primary target cell is checked,
/// and the world edge wins over tile content.
pub fn can_move(map: &Map, observer: &Observer, direction: Direction) -> bool {
    let col = observer.col();
    let row = observer.row();

    match direction {
        Direction::Left | Direction::Right => {
            if observer.shift_x() != 0 {
                return true;
            }
            let target_col = match direction {
                Direction::Right => col + 1,
                _ => col - 1,
            };
            if target_col < 0 || target_col >= map.width {
                return false;
            }
            let lean = perpendicular_offset(observer.shift_y());
            !map.is_solid(target_col, row) && !map.is_solid(target_col, row + lean)
        }
        Direction::Up | Direction::Down => {
            if observer.shift_y() != 0 {
                return true;
            }
            let target_row = match direction {
                Direction::Down => row + 1,
                _ => row - 1,
            };
            if target_row < 0 || target_row >= map.height {
                return false;
            }
            let lean = perpendicular_offset(observer.shift_x());
            !map.is_solid(col, target_row) && !map.is_solid(col + lean, target_row)
        }
    }
}

/// Which side of the perpendicular axis the observer leans toward. A zero
/// shift collapses the diagonal neighbor onto the primary cell, meaning no
/// diagonal constraint at all.
fn perpendicular_offset(shift: i32) -> i32 {
    match shift.cmp(&0) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}
