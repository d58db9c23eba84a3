//! UI module - ability bar HUD and pause menu with the combo legend.

pub mod hud;
pub mod legend;
mod plugin;

pub use hud::{AbilityIcon, CooldownFill};
pub use plugin::UiPlugin;
