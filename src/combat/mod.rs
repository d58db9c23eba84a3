//! Combat module - abilities, combo input resolution, and cooldowns.

mod bindings;
mod data;
mod error;
mod plugin;
mod resolver;
mod systems;
mod timers;

pub use bindings::*;
pub use data::*;
pub use error::AbilityTableError;
pub use plugin::CombatPlugin;
pub use resolver::*;
pub use systems::{AbilityActivated, ComboSet};
pub use timers::{CooldownTimers, TimerHandle, TimerQueue};
