//! World plugin - arena, player and camera setup.

use bevy::prelude::*;

use super::arena::{build_arena, ArenaGeometry, PLAYER_START};
use crate::animation::AnimationLibrary;
use crate::camera::{spawn_camera, CameraConfig};
use crate::core::GameState;
use crate::player::spawn_player;

/// World plugin - builds the arena the first time gameplay starts.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), setup_arena);
    }
}

/// Spawn the arena, the player and the follow camera.
///
/// Resuming from pause re-enters `InGame`, so an existing arena is kept.
pub fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    library: Res<AnimationLibrary>,
    camera_config: Res<CameraConfig>,
    existing: Query<(), With<ArenaGeometry>>,
) {
    if !existing.is_empty() {
        return;
    }

    info!("Building arena");

    build_arena(&mut commands, &mut meshes, &mut materials);
    spawn_player(
        &mut commands,
        &mut meshes,
        &mut materials,
        &asset_server,
        &library,
        PLAYER_START,
    );
    spawn_camera(&mut commands, &camera_config, PLAYER_START);
}
