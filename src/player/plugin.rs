//! Player plugin - locomotion config and movement.

use bevy::prelude::*;

use super::components::load_player_config;
use super::movement::player_movement;
use crate::combat::ComboSet;
use crate::core::GameState;

/// Player plugin - handles locomotion and its animator parameters.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_player_config).add_systems(
            Update,
            // Needs this tick's attacking flag, and must set Speed/Direction
            // before the animator picks a locomotion clip
            player_movement
                .after(ComboSet::Resolve)
                .before(ComboSet::Animate)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
