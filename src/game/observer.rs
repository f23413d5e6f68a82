//! Observer state and smooth movement
//!
//! The observer lives in pixel space and crosses tiles a few pixels per
//! tick. Its authoritative grid cell is the tile its anchor sits in; the
//! sub-tile shift is what the collision checker consults to know whether
//! the observer straddles a boundary. Releasing a direction mid-tile
//! leaves the axis drifting until the next tile boundary, so taps travel
//! whole tiles.

use crate::config::{OBSERVER_SPEED, TILE_SIZE};
use crate::world::Map;

use super::collision::can_move;

/// Facing and movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The viewpoint entity: visibility and collision are evaluated around it.
#[derive(Debug, Clone)]
pub struct Observer {
    pos_x: i32,
    pos_y: i32,
    speed: i32,
    facing: Direction,
    moving_up: bool,
    moving_down: bool,
    moving_left: bool,
    moving_right: bool,
}

impl Observer {
    /// Place the observer aligned on a grid cell.
    pub fn at_cell(col: i32, row: i32) -> Self {
        Self::at_pixels(col * TILE_SIZE, row * TILE_SIZE)
    }

    /// Place the observer at an exact pixel position.
    pub fn at_pixels(pos_x: i32, pos_y: i32) -> Self {
        Self {
            pos_x,
            pos_y,
            speed: OBSERVER_SPEED,
            facing: Direction::Down,
            moving_up: false,
            moving_down: false,
            moving_left: false,
            moving_right: false,
        }
    }

    /// Authoritative grid column.
    pub fn col(&self) -> i32 {
        self.pos_x.div_euclid(TILE_SIZE)
    }

    /// Authoritative grid row.
    pub fn row(&self) -> i32 {
        self.pos_y.div_euclid(TILE_SIZE)
    }

    /// Horizontal sub-tile shift, in [0, TILE_SIZE).
    pub fn shift_x(&self) -> i32 {
        self.pos_x.rem_euclid(TILE_SIZE)
    }

    /// Vertical sub-tile shift, in [0, TILE_SIZE).
    pub fn shift_y(&self) -> i32 {
        self.pos_y.rem_euclid(TILE_SIZE)
    }

    pub fn pos_px(&self) -> (i32, i32) {
        (self.pos_x, self.pos_y)
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn is_moving(&self) -> bool {
        self.moving_up || self.moving_down || self.moving_left || self.moving_right
    }

    /// One movement tick. The intent is this tick's requested direction;
    /// each axis otherwise coasts to the next tile boundary on its own.
    pub fn update(&mut self, intent: Option<Direction>, map: &Map) {
        let up = intent == Some(Direction::Up);
        let down = intent == Some(Direction::Down);
        let left = intent == Some(Direction::Left);
        let right = intent == Some(Direction::Right);

        // Vertical axis.
        if up {
            self.facing = Direction::Up;
            self.moving_down = false;
            if can_move(map, self, Direction::Up) {
                self.moving_up = true;
                self.pos_y -= self.speed;
            } else {
                self.moving_up = false;
            }
        } else if down {
            self.facing = Direction::Down;
            self.moving_up = false;
            if can_move(map, self, Direction::Down) {
                self.moving_down = true;
                self.pos_y += self.speed;
            } else {
                self.moving_down = false;
            }
        }

        // An axis at rest on a tile boundary with no intent stops moving.
        if !up && !down && self.shift_y() == 0 {
            self.moving_up = false;
            self.moving_down = false;
        }

        // Coast to the next boundary after the intent went away.
        if !up && self.moving_up && self.shift_y() != 0 {
            let rem = self.shift_y();
            if rem < self.speed {
                self.pos_y -= rem;
                self.moving_up = false;
            } else {
                self.pos_y -= self.speed;
            }
        } else if !down && self.moving_down && self.shift_y() != 0 {
            let rem = TILE_SIZE - self.shift_y();
            if rem < self.speed {
                self.pos_y += rem;
                self.moving_down = false;
            } else {
                self.pos_y += self.speed;
            }
        }

        // Horizontal axis.
        if left {
            self.facing = Direction::Left;
            self.moving_right = false;
            if can_move(map, self, Direction::Left) {
                self.moving_left = true;
                self.pos_x -= self.speed;
            } else {
                self.moving_left = false;
            }
        } else if right {
            self.facing = Direction::Right;
            self.moving_left = false;
            if can_move(map, self, Direction::Right) {
                self.moving_right = true;
                self.pos_x += self.speed;
            } else {
                self.moving_right = false;
            }
        }

        if !left && !right && self.shift_x() == 0 {
            self.moving_left = false;
            self.moving_right = false;
        }

        if !left && self.moving_left && self.shift_x() != 0 {
            let rem = self.shift_x();
            if rem < self.speed {
                self.pos_x -= rem;
                self.moving_left = false;
            } else {
                self.pos_x -= self.speed;
            }
        } else if !right && self.moving_right && self.shift_x() != 0 {
            let rem = TILE_SIZE - self.shift_x();
            if rem < self.speed {
                self.pos_x += rem;
                self.moving_right = false;
            } else {
                self.pos_x += self.speed;
            }
        }
    }
}
