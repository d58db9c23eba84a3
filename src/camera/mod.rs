//! Camera module - third-person orbit camera that follows the player.

mod plugin;
mod rig;

pub use plugin::CameraPlugin;
pub use rig::*;
