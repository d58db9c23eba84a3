//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Locomotion,
//! camera and combo input only run while `InGame`.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - Move to `InGame` once every config resource is inserted
/// - `Paused` freezes gameplay but keeps the arena visible
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Reading RON data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
}
