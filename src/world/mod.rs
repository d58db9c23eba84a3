//! World module - the training arena the player spawns into.

mod arena;
mod plugin;

pub use arena::{ArenaGeometry, PLAYER_START};
pub use plugin::WorldPlugin;
