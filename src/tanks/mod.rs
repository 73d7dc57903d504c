//! Turtle tanks, a toy game played through the `tanks` command.
//!
//! Each channel gets its own [`GameSession`], created on the first `tanks`
//! command and kept in the [`GameRegistry`]. A player joins by running the
//! command and gets the board back as a PNG, their own tank highlighted.
//!
//! # Modules
//!
//! - `map` - Board layout, walls and spawn points
//! - `session` - Enrolled players and their tanks
//! - `registry` - Sessions indexed by channel
//! - `render` - Board drawing

mod map;
mod registry;
mod render;
mod session;

pub use crate::tanks::registry::GameRegistry;
#[cfg(test)]
pub use crate::tanks::map::GameMap;

/// Filename of the rendered board attachment.
pub const BOARD_FILENAME: &str = "tanks.png";
