//! Camera plugin - config, mouse look, follow and cursor capture.

use bevy::prelude::*;

use super::rig::*;
use crate::core::GameState;
use crate::player::player_movement;

/// Camera plugin - orbits and follows the player during gameplay.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_camera_config)
            .add_systems(OnEnter(GameState::InGame), grab_cursor)
            .add_systems(OnExit(GameState::InGame), release_cursor)
            .add_systems(
                Update,
                // Follow reads the position the player just moved to
                (orbit_camera, follow_player)
                    .chain()
                    .after(player_movement)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
