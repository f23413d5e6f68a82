//! Game module
//!
//! Observer movement, collision, and the frame tick.

pub mod collision;
pub mod observer;
pub mod state;

pub use collision::can_move;
pub use observer::{Direction, Observer};
pub use state::Game;
