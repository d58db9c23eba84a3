//! Validation errors for ability data.

use thiserror::Error;

/// Reasons an ability table is rejected at load time.
#[derive(Debug, Error, PartialEq)]
pub enum AbilityTableError {
    /// The table has no abilities at all.
    #[error("Ability table is empty")]
    Empty,

    /// An ability has no steps.
    #[error("Ability {slot} ('{name}') has no steps")]
    NoSteps { slot: usize, name: String },

    /// Step and cooldown lists differ in length.
    #[error("Ability {slot} ('{name}') has {steps} steps but {cooldowns} cooldowns")]
    LengthMismatch {
        slot: usize,
        name: String,
        steps: usize,
        cooldowns: usize,
    },

    /// A cooldown is negative, NaN or infinite.
    #[error("Ability {slot} step {step} has invalid cooldown {value}")]
    InvalidCooldown { slot: usize, step: usize, value: f32 },

    /// An input binding points past the end of the table.
    #[error("Binding references slot {slot}, but the table only has {len} abilities")]
    MissingSlot { slot: usize, len: usize },
}
