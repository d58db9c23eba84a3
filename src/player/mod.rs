//! Player module - player entity, locomotion, and spawning.

mod components;
mod movement;
mod plugin;
mod spawn;

pub use components::*;
pub use movement::player_movement;
pub use plugin::PlayerPlugin;
pub use spawn::spawn_player;
